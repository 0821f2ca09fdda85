pub mod analyze;
pub mod count;
