// Property-Based Testing for the Publishing Workflow
// Checks role, readiness, batch and selection invariants over generated inputs

mod fixtures;

use courseware_workflow::batch::SelectionSet;
use courseware_workflow::config::BatchSettings;
use courseware_workflow::content::{GeoConfig, SeoConfig};
use courseware_workflow::roles::{can_delete, can_edit, can_publish};
use courseware_workflow::{
    validate, BatchAction, BatchOperationCoordinator, BatchRow, Capability, ContentKind,
    ContentStatus, PublishingConfig, Role,
};
use fixtures::{admin, bare_record, ready_record, Harness};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::HashSet;

// Generated publishing metadata, biased towards borderline lengths
#[derive(Debug, Clone, Arbitrary)]
struct MetadataInput {
    #[proptest(strategy = "slug_strategy()")]
    slug: String,
    #[proptest(strategy = "\"[a-zA-Z ]{0,80}\"")]
    seo_title: String,
    #[proptest(strategy = "\"[a-z ]{0,90}\"")]
    seo_description: String,
    #[proptest(strategy = "\"[a-z ]{0,20}\"")]
    snippet: String,
    #[proptest(strategy = "prop::collection::vec(\"[a-z ]{0,10}\", 0..6)")]
    key_points: Vec<String>,
}

impl MetadataInput {
    fn into_config(self) -> PublishingConfig {
        PublishingConfig {
            slug: self.slug,
            seo: SeoConfig {
                title: self.seo_title,
                description: self.seo_description,
            },
            geo: GeoConfig {
                snippet: self.snippet,
                key_points: self.key_points,
            },
            faq: Vec::new(),
        }
    }
}

fn slug_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[a-z0-9]{1,8}(-[a-z0-9]{1,8}){0,3}",
        "[A-Za-z _]{1,12}",
    ]
}

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Admin),
        Just(Role::Editor),
        Just(Role::Viewer),
        Just(Role::Unrecognized),
    ]
}

fn rank(role: Role) -> u8 {
    match role {
        Role::Admin => 3,
        Role::Editor => 2,
        Role::Viewer => 1,
        Role::Unrecognized => 0,
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_capabilities_grow_with_role(a in role_strategy(), b in role_strategy()) {
            let (low, high) = if rank(a) <= rank(b) { (a, b) } else { (b, a) };
            for capability in Capability::ALL {
                if low.allows(capability) {
                    prop_assert!(high.allows(capability), "{high} lacks {capability} held by {low}");
                }
            }
        }

        #[test]
        fn prop_unknown_role_strings_grant_nothing(raw in "[a-z]{1,12}") {
            let role = Role::from(raw.as_str());
            if !matches!(raw.as_str(), "admin" | "editor" | "viewer") {
                prop_assert_eq!(role, Role::Unrecognized);
                prop_assert!(!can_edit(role) && !can_delete(role) && !can_publish(role));
            }
        }

        #[test]
        fn prop_validate_is_pure(input in any::<MetadataInput>()) {
            let config = input.into_config();
            let snapshot = config.clone();

            let first = validate(&config);
            let second = validate(&config);

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&config, &snapshot);
            prop_assert_eq!(first.is_publishable, first.errors.is_empty());
        }

        #[test]
        fn prop_complete_metadata_is_publishable(
            slug in "[a-z0-9]{1,8}(-[a-z0-9]{1,8}){0,2}",
            title in "[A-Za-z][A-Za-z ]{0,40}",
            description in "[a-z]{50,80}",
            snippet in "[a-z]{1,20}",
            key_points in prop::collection::vec("[a-z]{1,10}", 3..6),
        ) {
            let config = PublishingConfig {
                slug,
                seo: SeoConfig { title, description },
                geo: GeoConfig { snippet, key_points },
                faq: Vec::new(),
            };
            let result = validate(&config);
            prop_assert!(result.is_publishable, "{:?}", result.errors);
            prop_assert!(result.errors.is_empty());
        }

        #[test]
        fn prop_range_selection_covers_span(
            len in 1usize..30,
            a in 0usize..30,
            b in 0usize..30,
        ) {
            let a = a % len;
            let b = b % len;
            let rows: Vec<BatchRow> = (0..len)
                .map(|i| BatchRow::new(ContentKind::Reading, format!("row{i}"), ContentStatus::Draft))
                .collect();
            let mut selection = SelectionSet::new(rows);

            selection.select_row(&format!("row{a}"), a, false);
            selection.select_row(&format!("row{b}"), b, true);

            let expected: Vec<String> = (a.min(b)..=a.max(b)).map(|i| format!("row{i}")).collect();
            prop_assert_eq!(selection.selected_ids(), expected);
            prop_assert_eq!(selection.last_selected_index(), Some(b));
        }
    }

    #[test]
    fn prop_batch_partitions_input() {
        let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(32));

        runner.run(&(
            prop::collection::vec(0usize..4, 0..8),
            prop::collection::vec(0usize..10, 0..12),
            prop::sample::select(vec![BatchAction::Publish, BatchAction::Archive]),
            1usize..5,
        ), |(kinds, picks, action, concurrency)| {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let harness = Harness::new();
                for (i, kind) in kinds.iter().enumerate() {
                    let id = format!("c{i}");
                    match kind {
                        0 => { harness.seed(ready_record(&id), ContentStatus::Draft).await; }
                        1 => { harness.seed(ready_record(&id), ContentStatus::InReview).await; }
                        2 => { harness.seed(ready_record(&id), ContentStatus::Published).await; }
                        _ => { harness.seed(bare_record(&id), ContentStatus::Draft).await; }
                    }
                }
                // Picks beyond the seeded range refer to missing records
                let ids: Vec<String> = picks.iter().map(|p| format!("c{p}")).collect();
                let unique: HashSet<&String> = ids.iter().collect();

                let coordinator = BatchOperationCoordinator::from_settings(
                    harness.machine.clone(),
                    &BatchSettings { max_concurrency: concurrency },
                );
                let result = coordinator.run_batch(action, &ids, &admin()).await;

                prop_assert_eq!(result.total(), unique.len());
                let succeeded: HashSet<&String> = result.success.iter().collect();
                let failed: HashSet<&String> = result.failed.iter().map(|f| &f.id).collect();
                prop_assert!(succeeded.is_disjoint(&failed));
                prop_assert_eq!(succeeded.len() + failed.len(), unique.len());
                prop_assert!(succeeded.union(&failed).all(|id| unique.contains(id)));
                prop_assert!(result.failed.iter().all(|f| !f.error.is_empty()));

                Ok(())
            })
        }).unwrap();
    }
}
