//! Property-based tests for option normalization

use laravel_dockerize::preset::{COMPOSE_DEV, COMPOSE_LOCAL, COMPOSE_PROD};
use laravel_dockerize::{DbFlavor, Preset};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn expected_files(raw: &str) -> Option<Vec<&'static str>> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "local" => Some(vec![COMPOSE_LOCAL]),
        "dev" => Some(vec![COMPOSE_DEV]),
        "prod" => Some(vec![COMPOSE_PROD]),
        _ => None,
    }
}

proptest! {
    #[test]
    fn preset_resolves_to_single_file_or_full_union(raw in "[ a-zA-Z]{0,8}") {
        let selection = Preset::select(Some(&raw));
        let files = selection.value.compose_files();

        match expected_files(&raw) {
            Some(expected) => {
                prop_assert_eq!(files, expected);
                prop_assert!(selection.warning.is_none());
            }
            None => {
                prop_assert_eq!(files.len(), 3);
                let unique: BTreeSet<_> = files.iter().collect();
                prop_assert_eq!(unique.len(), 3);
            }
        }
    }

    #[test]
    fn preset_case_variants_agree(
        name in prop::sample::select(vec!["local", "dev", "prod", "all"]),
        mask in prop::collection::vec(any::<bool>(), 5),
    ) {
        let mixed: String = name
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();

        prop_assert_eq!(Preset::select(Some(&mixed)), Preset::select(Some(name)));
    }

    #[test]
    fn install_db_never_panics_and_defaults_to_pgsql(raw in "\\PC{0,12}") {
        let selection = DbFlavor::select_for_install(Some(&raw), |_| true);
        let recognized = raw.trim().parse::<DbFlavor>().ok();

        match recognized {
            Some(flavor) => prop_assert_eq!(selection.value, flavor),
            None => prop_assert_eq!(selection.value, DbFlavor::Pgsql),
        }
        if raw.trim().is_empty() || recognized.is_some() {
            prop_assert!(selection.warning.is_none());
        } else {
            prop_assert!(selection.warning.is_some());
        }
    }
}
