use proptest::prelude::*;
use std::collections::HashSet;
use wordctl_core::{load_page, Dictionary, Paginator};

fn arb_dictionary() -> impl Strategy<Value = Dictionary> {
    prop::collection::vec("[a-z]{1,8}", 0..200)
        .prop_map(Dictionary::from_words)
}

proptest! {
    /// Property: page k holds ids (k-1)*size+1 ..= k*size, in dictionary order
    #[test]
    fn prop_page_ids_are_exact(dict in arb_dictionary(), page in 1usize..15, size in 1usize..40) {
        let stubs = load_page(&dict, page, size);
        let start = (page - 1) * size;

        prop_assert!(stubs.len() <= size);
        for (pos, stub) in stubs.iter().enumerate() {
            prop_assert_eq!(stub.id, (start + pos + 1) as u64);
            prop_assert_eq!(&stub.word, &dict.words()[start + pos]);
        }
    }

    /// Property: repeated loads append every word exactly once
    #[test]
    fn prop_loading_to_the_end_covers_dictionary(dict in arb_dictionary(), size in 1usize..40, extra in 0usize..5) {
        let mut paginator = Paginator::new(size);
        let pages_needed = dict.len() / size + 1;
        for _ in 0..pages_needed + extra {
            paginator.load_next(&dict);
        }

        prop_assert!(paginator.is_exhausted());
        prop_assert_eq!(paginator.len(), dict.len());

        let ids: Vec<u64> = paginator.words().map(|s| s.id).collect();
        let expected: Vec<u64> = (1..=dict.len() as u64).collect();
        prop_assert_eq!(ids, expected);
    }

    /// Property: a late duplicate completion never adds rows
    #[test]
    fn prop_duplicate_completion_is_ignored(dict in arb_dictionary(), size in 1usize..40) {
        let mut paginator = Paginator::new(size);
        let page = paginator.begin().unwrap();
        let stubs = load_page(&dict, page, size);
        paginator.complete(page, stubs.clone());
        let before = paginator.len();
        paginator.complete(page, stubs);

        prop_assert_eq!(paginator.len(), before);
        let unique: HashSet<u64> = paginator.words().map(|s| s.id).collect();
        prop_assert_eq!(unique.len(), paginator.len());
    }
}
