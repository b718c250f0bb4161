//! Property-based tests for tag normalization and reconciliation planning

use std::collections::HashSet;

use proptest::prelude::*;
use quillpost::backend::articles::tags::{normalize, plan};
use quillpost::shared::models::Tag;

fn tag_name() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

proptest! {
    #[test]
    fn test_normalize_yields_unique_trimmed_names(
        names in prop::collection::vec((tag_name(), " {0,2}", " {0,2}"), 0..12)
    ) {
        let raw: Vec<String> = names
            .iter()
            .map(|(name, pre, post)| format!("{}{}{}", pre, name, post))
            .collect();
        let normalized = normalize(&raw).unwrap();

        let unique: HashSet<&String> = normalized.iter().collect();
        prop_assert_eq!(unique.len(), normalized.len());
        for name in &normalized {
            prop_assert_eq!(name.trim(), name.as_str());
        }
        let expected: HashSet<&str> = names.iter().map(|(name, _, _)| name.as_str()).collect();
        let actual: HashSet<&str> = normalized.iter().map(String::as_str).collect();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn test_plan_partitions_requested_names(
        requested in prop::collection::hash_set(tag_name(), 0..10),
        existing in prop::collection::hash_set(tag_name(), 0..10),
    ) {
        let requested: Vec<String> = requested.into_iter().collect();
        let existing: Vec<Tag> = existing
            .into_iter()
            .enumerate()
            .map(|(i, name)| Tag { id: i as i64 + 1, name })
            .collect();

        let result = plan(&requested, existing.clone());

        // every requested name lands in exactly one side
        prop_assert_eq!(result.matched.len() + result.missing.len(), requested.len());
        for tag in &result.matched {
            prop_assert!(requested.contains(&tag.name));
            prop_assert!(existing.contains(tag));
        }
        for name in &result.missing {
            prop_assert!(!existing.iter().any(|tag| &tag.name == name));
        }
    }

    #[test]
    fn test_blank_names_rejected(
        names in prop::collection::vec(tag_name(), 0..5),
        blank in " {0,3}",
    ) {
        let mut raw = names;
        raw.push(blank);
        prop_assert!(normalize(&raw).is_err());
    }
}
