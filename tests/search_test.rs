//! Tests for root-to-match path search

use rstest::{fixture, rstest};

use refnet::domain::{search, transform, RawReferralRecord, ReferralTree};

// A
// ├── B
// └── Bob
#[fixture]
fn basic() -> ReferralTree {
    let raw = RawReferralRecord::named("A").with_referrals(vec![
        RawReferralRecord::named("B"),
        RawReferralRecord::named("Bob"),
    ]);
    transform(Some(&raw)).unwrap().unwrap()
}

// Alice Root
// ├── Carol
// │   ├── Dave
// │   │   └── Erin
// │   └── Sam
// └── Frank
//     ├── Sam
//     └── Grace
#[fixture]
fn network() -> ReferralTree {
    let raw = RawReferralRecord::named("Alice Root").with_referrals(vec![
        RawReferralRecord::named("Carol").with_referrals(vec![
            RawReferralRecord::named("Dave")
                .with_referrals(vec![RawReferralRecord::named("Erin")]),
            RawReferralRecord::named("Sam"),
        ]),
        RawReferralRecord::named("Frank").with_referrals(vec![
            RawReferralRecord::named("Sam"),
            RawReferralRecord::named("Grace"),
        ]),
    ]);
    transform(Some(&raw)).unwrap().unwrap()
}

#[rstest]
fn given_basic_tree_when_searching_bo_then_matches_bob_not_b(basic: ReferralTree) {
    let path = search(Some(&basic), "bo");
    assert_eq!(basic.names(&path), vec!["A", "Bob"]);
}

#[rstest]
fn given_basic_tree_when_searching_unknown_then_returns_empty(basic: ReferralTree) {
    assert!(search(Some(&basic), "xyz").is_empty());
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn given_blank_term_when_searching_then_returns_empty(basic: ReferralTree, #[case] term: &str) {
    assert!(search(Some(&basic), term).is_empty());
}

#[rstest]
#[case("")]
#[case("A")]
fn given_no_tree_when_searching_then_returns_empty(#[case] term: &str) {
    assert!(search(None, term).is_empty());
}

#[rstest]
fn given_root_match_when_searching_then_path_is_root_only(basic: ReferralTree) {
    let path = search(Some(&basic), "a");
    assert_eq!(path, vec![basic.root()]);
}

#[rstest]
#[case("ERIN", vec!["Alice Root", "Carol", "Dave", "Erin"])]
#[case("  grace ", vec!["Alice Root", "Frank", "Grace"])]
#[case("root", vec!["Alice Root"])]
#[case("r", vec!["Alice Root"])]
#[case("ra", vec!["Alice Root", "Frank"])]
fn given_network_when_searching_then_returns_path_from_root(
    network: ReferralTree,
    #[case] term: &str,
    #[case] expected: Vec<&str>,
) {
    let path = search(Some(&network), term);
    assert_eq!(network.names(&path), expected);
}

#[rstest]
fn given_matches_in_two_sibling_subtrees_when_searching_then_earlier_sibling_wins(
    network: ReferralTree,
) {
    // "Sam" exists below Carol (index 0) and below Frank (index 1)
    let path = search(Some(&network), "sam");
    assert_eq!(network.names(&path), vec!["Alice Root", "Carol", "Sam"]);
}

#[rstest]
fn given_deeper_match_in_earlier_subtree_when_searching_then_pre_order_wins(
    network: ReferralTree,
) {
    // "e" matches Alice Root first; "er" matches Erin (depth 3) before Frank's children
    let path = search(Some(&network), "er");
    assert_eq!(network.names(&path), vec!["Alice Root", "Carol", "Dave", "Erin"]);
}

#[rstest]
#[case("ar")]
#[case("d")]
#[case("ank")]
fn given_any_match_when_searching_then_path_is_well_formed(
    network: ReferralTree,
    #[case] term: &str,
) {
    let path = search(Some(&network), term);
    assert!(!path.is_empty());
    assert_eq!(path[0], network.root());

    let last = network.node(*path.last().unwrap()).unwrap();
    assert!(last.name().to_lowercase().contains(&term.to_lowercase()));

    // every step is a parent-child link
    for pair in path.windows(2) {
        assert_eq!(network.node(pair[1]).unwrap().parent, Some(pair[0]));
    }
}

#[rstest]
fn given_repeated_searches_when_searching_then_results_are_independent(network: ReferralTree) {
    let first = search(Some(&network), "grace");
    let _ = search(Some(&network), "erin");
    let again = search(Some(&network), "grace");
    assert_eq!(first, again);
    assert_eq!(network.len(), 8);
}
