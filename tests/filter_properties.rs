//! Property tests for the cross-filter store.
//!
//! Items are generated over three small dimensions so that random selections
//! hit both empty and non-empty result sets.

use std::collections::BTreeMap;

use portfolio_kernel::{FilterConfig, FilterStore, Selection};
use proptest::prelude::*;

type Item = BTreeMap<String, &'static str>;

const DIMENSIONS: [(&str, &[&str]); 3] = [
    ("color", &["red", "green", "blue"]),
    ("size", &["S", "M", "L"]),
    ("shape", &["round", "square"]),
];

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn config() -> FilterConfig<&'static str> {
    DIMENSIONS
        .iter()
        .fold(FilterConfig::new(), |config, (name, domain)| {
            config.dimension(*name, domain.iter().copied())
        })
}

fn item(indices: [usize; 3]) -> Item {
    DIMENSIONS
        .iter()
        .zip(indices)
        .map(|((name, domain), i)| (name.to_string(), domain[i % domain.len()]))
        .collect()
}

fn selection(dimension: usize, value: Option<usize>) -> (&'static str, Selection<&'static str>) {
    let (name, domain) = DIMENSIONS[dimension];
    let selection = match value {
        Some(i) => Selection::Value(domain[i % domain.len()]),
        None => Selection::Any,
    };
    (name, selection)
}

fn build(items: &[Item]) -> FilterStore<Item> {
    FilterStore::new(items.to_vec(), config()).unwrap()
}

fn apply(store: &mut FilterStore<Item>, ops: &[(usize, Option<usize>)]) {
    for &(dimension, value) in ops {
        let (name, selection) = selection(dimension, value);
        store.select(name, selection).unwrap();
    }
}

/// Brute-force reference for `filtered_items`.
fn reference(store: &FilterStore<Item>, items: &[Item]) -> Vec<Item> {
    items
        .iter()
        .filter(|item| {
            store
                .dimensions()
                .iter()
                .all(|d| d.selected().admits(&item[d.name()]))
        })
        .cloned()
        .collect()
}

fn filtered(store: &FilterStore<Item>) -> Vec<Item> {
    store.filtered_items().into_iter().cloned().collect()
}

fn items_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec((0..3usize, 0..3usize, 0..2usize), 1..30)
        .prop_map(|raw| raw.into_iter().map(|(a, b, c)| item([a, b, c])).collect())
}

fn ops_strategy() -> impl Strategy<Value = Vec<(usize, Option<usize>)>> {
    prop::collection::vec((0..3usize, prop::option::of(0..3usize)), 0..12)
}

// ─────────────────────────────────────────────────────────────────────────────
// PROPERTIES
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_matches_brute_force(items in items_strategy(), ops in ops_strategy()) {
        let mut store = build(&items);
        apply(&mut store, &ops);

        prop_assert_eq!(filtered(&store), reference(&store, &items));
    }

    #[test]
    fn prop_reset_restores_everything(items in items_strategy(), ops in ops_strategy()) {
        let mut store = build(&items);
        apply(&mut store, &ops);
        store.reset();

        prop_assert_eq!(filtered(&store), items);
        prop_assert!(store.dimensions().iter().all(|d| d.selected().is_any()));
    }

    #[test]
    fn prop_all_any_is_identity(items in items_strategy()) {
        let store = build(&items);

        prop_assert_eq!(filtered(&store), items);
        prop_assert!(!store.is_filtered());
    }

    #[test]
    fn prop_concrete_selection_never_widens(
        items in items_strategy(),
        ops in ops_strategy(),
        dimension in 0..3usize,
        value in 0..3usize,
    ) {
        let mut store = build(&items);
        apply(&mut store, &ops);

        let (name, any) = selection(dimension, None);
        store.select(name, any).unwrap();
        let before = store.filtered_len();

        let (name, concrete) = selection(dimension, Some(value));
        store.select(name, concrete).unwrap();

        prop_assert!(store.filtered_len() <= before);
    }

    #[test]
    fn prop_own_selection_does_not_affect_options(
        items in items_strategy(),
        ops in ops_strategy(),
        dimension in 0..3usize,
    ) {
        let mut store = build(&items);
        apply(&mut store, &ops);

        let (name, any) = selection(dimension, None);
        let with_own = store.available_options(name).unwrap();

        let mut cleared = store.clone();
        cleared.select(name, any).unwrap();
        let without_own = cleared.available_options(name).unwrap();

        prop_assert_eq!(with_own, without_own);
    }

    #[test]
    fn prop_options_keep_domain_order(
        items in items_strategy(),
        ops in ops_strategy(),
        dimension in 0..3usize,
    ) {
        let mut store = build(&items);
        apply(&mut store, &ops);

        let (name, domain) = DIMENSIONS[dimension];
        let positions: Vec<usize> = store
            .available_options(name)
            .unwrap()
            .into_iter()
            .map(|v| domain.iter().position(|d| d == v).unwrap())
            .collect();

        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SCENARIO
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_color_size_scenario() {
    let entry = |color: &'static str, size: &'static str| -> Item {
        [("color".to_string(), color), ("size".to_string(), size)]
            .into_iter()
            .collect()
    };
    let items = vec![entry("red", "S"), entry("red", "M"), entry("blue", "S")];
    let config = FilterConfig::new()
        .dimension("color", ["red", "blue"])
        .dimension("size", ["S", "M"]);

    let mut store = FilterStore::new(items.clone(), config).unwrap();

    store.select("color", "red").unwrap();
    assert_eq!(filtered(&store), items[..2].to_vec());
    assert_eq!(store.available_options("size").unwrap(), vec![&"S", &"M"]);
    assert_eq!(store.available_options("color").unwrap(), vec![&"red", &"blue"]);

    store.select("size", "M").unwrap();
    assert_eq!(filtered(&store), vec![entry("red", "M")]);
    assert_eq!(store.available_options("color").unwrap(), vec![&"red"]);

    store.reset();
    assert_eq!(filtered(&store), items);
}
