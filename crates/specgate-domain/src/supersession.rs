//! Supersession - resolving which specifications are current
//!
//! A keyed specification is replaced by any newer one sharing its
//! `(category, key)`. Ordering is `created_at` first, then the UUIDv7 id, so
//! the result does not depend on input order.

use crate::Specification;
use std::collections::HashMap;

fn is_newer(candidate: &Specification, incumbent: &Specification) -> bool {
    (candidate.created_at, candidate.id) > (incumbent.created_at, incumbent.id)
}

/// Return the current specifications, preserving input order
///
/// # Examples
///
/// ```
/// use specgate_domain::{current_specifications, Specification};
///
/// let old = Specification::new("p", "tech_stack", "MySQL", 0.8, 10).with_key("db");
/// let new = Specification::new("p", "tech_stack", "PostgreSQL", 0.9, 20).with_key("db");
/// let specs = vec![old, new];
///
/// let current = current_specifications(&specs);
/// assert_eq!(current.len(), 1);
/// assert_eq!(current[0].content, "PostgreSQL");
/// ```
pub fn current_specifications<'a, I>(specs: I) -> Vec<&'a Specification>
where
    I: IntoIterator<Item = &'a Specification>,
{
    let specs: Vec<&'a Specification> = specs.into_iter().collect();

    let mut latest: HashMap<(&str, &str), &'a Specification> = HashMap::new();
    for &spec in &specs {
        let Some(key) = spec.key.as_deref() else {
            continue;
        };
        latest
            .entry((spec.category.as_str(), key))
            .and_modify(|incumbent| {
                if is_newer(spec, *incumbent) {
                    *incumbent = spec;
                }
            })
            .or_insert(spec);
    }

    specs
        .into_iter()
        .filter(|spec| match spec.key.as_deref() {
            None => true,
            Some(key) => latest
                .get(&(spec.category.as_str(), key))
                .is_some_and(|winner| std::ptr::eq(*winner, *spec)),
        })
        .collect()
}

/// Whether `spec` has been superseded by anything in `others`
pub fn is_superseded(spec: &Specification, others: &[Specification]) -> bool {
    let Some(key) = spec.key.as_deref() else {
        return false;
    };
    others.iter().any(|other| {
        other.category == spec.category
            && other.key.as_deref() == Some(key)
            && is_newer(other, spec)
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn spec_strategy() -> impl Strategy<Value = Specification> {
        (0u8..3, proptest::option::of(0u8..3), 0u64..50).prop_map(|(cat, key, created_at)| {
            let spec = Specification::new("p", format!("cat{}", cat), "content", 0.5, created_at);
            match key {
                Some(k) => spec.with_key(format!("k{}", k)),
                None => spec,
            }
        })
    }

    proptest! {
        /// Property: at most one current spec per (category, key)
        #[test]
        fn test_one_current_per_key(specs in proptest::collection::vec(spec_strategy(), 0..20)) {
            let current = current_specifications(&specs);
            let mut seen = HashSet::new();
            for spec in &current {
                if let Some(key) = &spec.key {
                    prop_assert!(seen.insert((spec.category.clone(), key.clone())));
                }
            }
        }

        /// Property: every keyed slot present in the input keeps exactly one current spec
        #[test]
        fn test_no_slot_disappears(specs in proptest::collection::vec(spec_strategy(), 0..20)) {
            let current = current_specifications(&specs);
            let input_slots: HashSet<_> = specs
                .iter()
                .filter_map(|s| s.key.clone().map(|k| (s.category.clone(), k)))
                .collect();
            let current_slots: HashSet<_> = current
                .iter()
                .filter_map(|s| s.key.clone().map(|k| (s.category.clone(), k)))
                .collect();
            prop_assert_eq!(input_slots, current_slots);

            for spec in &current {
                prop_assert!(!is_superseded(spec, &specs));
            }
        }
    }
}
