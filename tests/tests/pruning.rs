//! Pruning integration tests.
//!
//! Deletion markers and system entries declared anywhere in the chain.

use defcomp_tests::prelude::*;

mod pruning {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("pruning")
            .fixture("pruning.json")
            .expect("entity", |e| {
                e.fields(&["title", "legacyCode", "status"])
                    .regions(&["archive"])
                    .transitions(&["approve"])
            })
            .expect("case", |e| {
                e.fields(&["title"])
                    .regions(&["general"])
                    .region("general", &["status"])
                    .transitions(&["close", "approve"])
                    .absent("legacyCode")
                    .absent("archivedOn")
                    .absent("checksum")
                    .display("status", DisplayType::Editable)
            })
            .expect("complaint", |e| {
                e.fields(&["title"])
                    .region("general", &["status"])
                    .transitions(&["close"])
                    .absent("legacyCode")
                    .display("status", DisplayType::Editable)
                    // inherited as case compiled it, not from entity's system copy
                    .custom(|d| {
                        d.find_field("status")
                            .is_some_and(|f| {
                                f.uri.as_deref() == Some("FORBIDDEN") && f.declared_by("case")
                            })
                    })
            })
            .outcome(|o| o.clean().compiled(3))
    }

    #[test]
    fn test_deleted_and_system_entries_removed() {
        scenario().run().unwrap();
    }
}

mod invariants {
    use super::*;

    #[test]
    fn test_no_markers_or_system_transitions_survive() {
        let compiled = Scenario::new("invariants")
            .fixture("pruning.json")
            .run()
            .unwrap();

        for definition in &compiled {
            assert!(definition.all_fields().all(|f| !f.deleted));
            assert!(definition.regions.iter().all(|r| !r.deleted));
            assert!(definition.transitions.iter().all(|t| !t.deleted && !t.is_system()));
            assert!(definition
                .all_fields()
                .all(|f| f.display_type.is_some() && f.mandatory.is_some() && f.uri.is_some()));
        }
    }
}

mod region_deleted_by_grandparent {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("region_deleted_by_grandparent")
            .definitions(vec![
                Definition::new("root")
                    .region(Region::new("extra").field(Field::new("x", "n5"))),
                Definition::new("middle")
                    .extends("root")
                    .region(Region::new("extra").marked_deleted()),
                Definition::new("leaf")
                    .extends("middle")
                    .region(Region::new("own").field(Field::new("y", "n5"))),
            ])
            .expect("root", |e| e.regions(&["extra"]))
            .expect("middle", |e| e.regions(&[]).absent("x"))
            .expect("leaf", |e| e.regions(&["own"]).absent("x"))
            .outcome(|o| o.clean())
    }

    #[test]
    fn test_marker_reaches_grandchild() {
        scenario().run().unwrap();
    }
}
