//! Top-N selection with optional padding.
//!
//! Selection is a stable descending sort on a numeric key: entries with equal
//! keys keep their input order, and NaN keys sort after every number. When
//! padding is requested, short selections are filled with placeholder slots
//! so the caller always renders exactly `limit` rows.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One slot of a Top-N selection.
#[derive(Debug, PartialEq)]
pub enum Slot<'a, T> {
    Entry(&'a T),
    Placeholder,
}

// Manual impls: a slot only holds a reference, so `T` need not be `Clone`.
impl<T> Clone for Slot<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<'_, T> {}

impl<'a, T> Slot<'a, T> {
    pub fn entry(&self) -> Option<&'a T> {
        match self {
            Slot::Entry(item) => Some(item),
            Slot::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Slot::Placeholder)
    }
}

/// Top-N parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopN {
    pub limit: usize,
    /// Fill short selections up to `limit` with placeholders.
    pub pad: bool,
}

impl TopN {
    pub fn new(limit: usize, pad: bool) -> Self {
        Self { limit, pad }
    }

    pub fn select<'a, T, F>(&self, items: &'a [T], key: F) -> Vec<Slot<'a, T>>
    where
        F: Fn(&T) -> f64,
    {
        let mut slots: Vec<Slot<'a, T>> = select_top(items, self.limit, key)
            .into_iter()
            .map(Slot::Entry)
            .collect();
        if self.pad {
            slots.resize(self.limit, Slot::Placeholder);
        }
        slots
    }
}

/// Descending by key, stable, at most `limit` entries.
pub fn select_top<T, F>(items: &[T], limit: usize, key: F) -> Vec<&T>
where
    F: Fn(&T) -> f64,
{
    let mut keyed: Vec<(f64, &T)> = items.iter().map(|item| (key(item), item)).collect();
    keyed.sort_by(|(a, _), (b, _)| descending_nan_last(*a, *b));
    keyed.into_iter().take(limit).map(|(_, item)| item).collect()
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unpadded_returns_what_exists() {
        let items = [3.0, 1.0, 2.0];
        let slots = TopN::new(10, false).select(&items, |v| *v);
        assert_eq!(slots.len(), 3);
        let values: Vec<f64> = slots.iter().filter_map(|s| s.entry().copied()).collect();
        assert_eq!(values, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_padded_fills_to_limit() {
        let items = [3.0, 1.0, 2.0];
        let slots = TopN::new(10, true).select(&items, |v| *v);
        assert_eq!(slots.len(), 10);
        assert!(slots[..3].iter().all(|s| !s.is_placeholder()));
        assert!(slots[3..].iter().all(Slot::is_placeholder));
    }

    #[test]
    fn test_padding_never_truncates_below_limit() {
        let items: Vec<f64> = (0..20).map(f64::from).collect();
        let slots = TopN::new(5, true).select(&items, |v| *v);
        assert_eq!(slots.len(), 5);
        assert_eq!(slots[0].entry(), Some(&19.0));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let items = [("a", 5.0), ("b", 7.0), ("c", 5.0), ("d", 5.0)];
        let top = select_top(&items, 4, |(_, v)| *v);
        let names: Vec<&str> = top.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_nan_sorts_last() {
        let items = [f64::NAN, 1.0, 4.0];
        let top = select_top(&items, 3, |v| *v);
        assert_eq!(*top[0], 4.0);
        assert_eq!(*top[1], 1.0);
        assert!(top[2].is_nan());
    }

    #[test]
    fn test_zero_limit() {
        let items = [1.0];
        assert!(TopN::new(0, true).select(&items, |v| *v).is_empty());
    }

    proptest! {
        #[test]
        fn prop_selection_length(values in proptest::collection::vec(0.0f64..1000.0, 0..40), limit in 0usize..30, pad: bool) {
            let slots = TopN::new(limit, pad).select(&values, |v| *v);
            let expected = if pad { limit } else { limit.min(values.len()) };
            prop_assert_eq!(slots.len(), expected);
        }

        #[test]
        fn prop_selection_descending(values in proptest::collection::vec(0.0f64..1000.0, 0..40)) {
            let top = select_top(&values, values.len(), |v| *v);
            prop_assert!(top.windows(2).all(|w| w[0] >= w[1]));
        }
    }
}
