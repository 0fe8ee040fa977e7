#[path = "../common/mod.rs"]
mod common;

use autogroup::keys::find_longest_keys;
use autogroup::{auto_group, AutoGroupResult};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn arb_sentences() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abc ]{0,12}", 0..9)
}

fn reassemble(out: &AutoGroupResult) -> BTreeMap<usize, String> {
    let mut all = out.ungrouped().clone();
    for g in out.groups() {
        for (idx, text) in g.members() {
            assert!(all.insert(*idx, text.clone()).is_none(), "index {idx} appears twice");
        }
    }
    all
}

proptest! {
    #[test]
    fn every_member_contains_its_key(
        sentences in arb_sentences(),
        min_len in 1usize..4,
        min_group in 2usize..4,
    ) {
        let out = auto_group(&sentences, min_len, min_group).unwrap();
        for g in out.groups() {
            prop_assert!(g.len() >= min_group);
            prop_assert!(g.key().chars().count() >= min_len);
            prop_assert_eq!(g.key().trim(), g.key());
            for text in g.members().values() {
                prop_assert!(text.contains(g.key()), "{:?} lacks {:?}", text, g.key());
            }
        }
    }

    #[test]
    fn groups_and_ungrouped_partition_the_input(
        sentences in arb_sentences(),
        min_len in 1usize..4,
        min_group in 2usize..4,
    ) {
        let out = auto_group(&sentences, min_len, min_group).unwrap();
        let expected: BTreeMap<usize, String> = sentences.iter().cloned().enumerate().collect();
        prop_assert_eq!(reassemble(&out), expected);
        prop_assert_eq!(out.total(), sentences.len());
    }

    #[test]
    fn regrouping_the_leftovers_finds_nothing(
        sentences in arb_sentences(),
        min_len in 1usize..4,
        min_group in 2usize..4,
    ) {
        let out = auto_group(&sentences, min_len, min_group).unwrap();
        let rest: Vec<String> = out.ungrouped().values().cloned().collect();
        let again = auto_group(&rest, min_len, min_group).unwrap();
        prop_assert!(!again.has_groups());
    }

    #[test]
    fn grouping_is_deterministic(
        sentences in arb_sentences(),
        min_len in 1usize..4,
        min_group in 2usize..4,
    ) {
        let a = auto_group(&sentences, min_len, min_group).unwrap();
        let b = auto_group(&sentences, min_len, min_group).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn first_round_keys_match_brute_force(
        sentences in arb_sentences(),
        min_len in 1usize..4,
        min_group in 2usize..4,
    ) {
        let keys = find_longest_keys(&sentences, min_len, min_group);
        let (_, expected) = common::longest_shared_keys(&sentences, min_len, min_group);
        let got: BTreeSet<String> = keys.into_iter().collect();
        prop_assert_eq!(got, expected);
    }
}
