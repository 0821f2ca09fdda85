#![allow(dead_code)] // Not every test binary uses every helper

use mulnim::position::Position;

pub fn pos(elements: &[u32]) -> Position {
    Position::new(elements.to_vec())
}

pub fn positions(list: &[&[u32]]) -> Vec<Position> {
    list.iter().map(|e| pos(e)).collect()
}
