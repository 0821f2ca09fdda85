use mulnim::analysis::{Analysis, Classification};
use mulnim::classifier::is_losing;
use mulnim::config::{AlphabetPolicy, Config};
use mulnim::generator::{combination_count, generate_positions};
use mulnim::position::Position;
use mulnim::reduction::{classify_non_convertible, find_reduction};
use mulnim::replacement::target_product;
use proptest::prelude::*;
use std::collections::HashSet;

// --- STRATEGIES ---

prop_compose! {
    fn arb_config()(
        count in 1u32..=3,
        max_value in 1u32..=12,
        modulus in 2u32..=13,
        unrestricted in any::<bool>()
    ) -> Config {
        let policy = if unrestricted {
            AlphabetPolicy::Unrestricted
        } else {
            AlphabetPolicy::ExcludeMultiples
        };
        Config::new(count, max_value, modulus).with_policy(policy)
    }
}

/// Reference search over every downward reduction, with no modulus bound.
fn reducible_unbounded(position: &Position, modulus: u32) -> bool {
    position.elements().iter().enumerate().any(|(index, &pile)| {
        (1..pile).any(|amount| {
            let value = pile - amount;
            value % modulus != 0 && is_losing(&position.with_element(index, value), modulus)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_cardinality_matches_stars_and_bars(count in 1u32..=4, max_value in 1u32..=10) {
        let cfg = Config::new(count, max_value, 2).with_policy(AlphabetPolicy::Unrestricted);
        let generated = generate_positions(&cfg).unwrap().len() as u128;
        prop_assert_eq!(combination_count(count, max_value), Some(generated));
    }

    #[test]
    fn test_positions_are_well_formed(cfg in arb_config()) {
        let all = generate_positions(&cfg).unwrap();
        let mut seen = HashSet::new();
        for p in &all {
            prop_assert_eq!(p.len(), cfg.count as usize);
            prop_assert!(p.elements().iter().all(|&e| (1..=cfg.max_value).contains(&e)));
            prop_assert!(p.elements().windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(seen.insert(p.clone()), "duplicate position {}", p);
        }
    }

    #[test]
    fn test_exclusion_removes_multiples(
        count in 1u32..=3,
        max_value in 1u32..=15,
        modulus in 2u32..=7
    ) {
        let all = generate_positions(&Config::new(count, max_value, modulus)).unwrap();
        prop_assert!(all.iter().all(|p| !p.has_multiple_of(modulus)));
    }

    #[test]
    fn test_labels_partition_the_set(cfg in arb_config()) {
        let a = Analysis::run(&cfg).unwrap();
        let labels = a.labels();
        prop_assert_eq!(labels.len(), a.positions.len());

        let losing: HashSet<&Position> = a.losing.iter().collect();
        let nc: HashSet<&Position> = a.non_convertible.iter().collect();
        let rnc: HashSet<&Position> = a.reduced_non_convertible.iter().collect();
        prop_assert!(rnc.is_subset(&nc));
        prop_assert!(nc.is_disjoint(&losing));

        let s = a.summary();
        prop_assert_eq!(
            s.losing + s.convertible + s.non_convertible + s.reduced_non_convertible,
            s.total
        );
        for (p, label) in labels {
            let expected = match label {
                Classification::Losing => losing.contains(p),
                Classification::Convertible => !losing.contains(p) && !nc.contains(p),
                Classification::NonConvertible => nc.contains(p) && !rnc.contains(p),
                Classification::ReducedNonConvertible => rnc.contains(p),
            };
            prop_assert!(expected, "{} mislabelled as {}", p, label);
        }
    }

    #[test]
    fn test_losing_positions_stay_losing(cfg in arb_config()) {
        let a = Analysis::run(&cfg).unwrap();
        prop_assert!(classify_non_convertible(&a.losing, cfg.modulus, cfg.max_value).is_empty());
        for p in &a.losing {
            prop_assert_eq!(a.classify(p), Some(Classification::Losing));
        }
    }

    #[test]
    fn test_bounded_reduction_matches_unbounded(cfg in arb_config()) {
        let all = generate_positions(&cfg).unwrap();
        for p in all.iter().filter(|p| !is_losing(p, cfg.modulus)) {
            prop_assert_eq!(
                find_reduction(p, cfg.modulus, cfg.max_value).is_some(),
                reducible_unbounded(p, cfg.modulus),
                "verdicts differ for {}", p
            );
        }
    }

    #[test]
    fn test_reductions_only_lower_one_pile(cfg in arb_config()) {
        let all = generate_positions(&cfg).unwrap();
        for p in &all {
            if let Some(r) = find_reduction(p, cfg.modulus, cfg.max_value) {
                prop_assert!(is_losing(&r.result, cfg.modulus));
                prop_assert_eq!(r.result.sum() + u64::from(r.amount), p.sum());
                prop_assert!(r.amount < cfg.modulus);
            }
        }
    }

    #[test]
    fn test_target_product_is_nearest_residue_one(product in 1u128..1_000_000, modulus in 2u32..=50) {
        let m = u128::from(modulus);
        let t = target_product(product, modulus);
        prop_assert!(t.is_some());
        let t = t.unwrap_or_default();
        prop_assert_eq!(t % m, 1);
        prop_assert!(t <= product);
        prop_assert!(product - t < m);
    }
}
