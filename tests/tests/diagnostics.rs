//! Diagnostics integration tests.
//!
//! Problems in one definition are reported without stopping the batch.

use defcomp_tests::prelude::*;

mod batch_continues {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("batch_continues")
            .fixture("diagnostics.json")
            .expect("broken", |e| e.fields(&["orphan", "amount"]))
            .expect("stray", |e| e.fields(&["note"]))
            .expect("healthy", |e| e.fields(&["extra", "code"]).field_count(3))
            .outcome(|o| {
                o.diagnostics(7)
                    .compiled(4)
                    .roots(3)
                    .diagnostic("Error found in definition 'broken': Field [orphan] references missing region [nowhere]")
                    .diagnostic("Error found in definition 'broken': Field [amount]: Invalid type descriptor 'money'")
                    .diagnostic("Error found in definition 'stray': Parent definition [ghost] not found")
                    .diagnostic("Error found in definition 'conflict': Found duplicate VISIBLE field [code] from [conflict]")
                    .diagnostic("Error found in definition 'healthy': Found duplicate VISIBLE field [code] in [healthy/details]")
            })
    }

    #[test]
    fn test_problems_reported_per_definition() {
        scenario().run().unwrap();
    }
}

mod dangling_parent_default {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("dangling_parent_default")
            .fixture("diagnostics.json")
            .config(CompilerConfig::default())
            .outcome(|o| o.diagnostics(6).roots(3))
    }

    #[test]
    fn test_missing_parent_only_logged() {
        scenario().run().unwrap();
    }
}

mod dangling_parent_rejected {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("dangling_parent_rejected")
            .fixture("diagnostics.json")
            .config(CompilerConfig::strict())
            .outcome(|o| o.error("Unknown parent definition 'ghost' for definition 'stray'"))
    }

    #[test]
    fn test_missing_parent_rejects_batch() {
        scenario().run().unwrap();
    }
}

mod cycle {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("cycle")
            .fixture("cycle.json")
            .outcome(|o| o.error("Inheritance cycle detected: alpha -> gamma -> beta -> alpha"))
    }

    #[test]
    fn test_cycle_rejects_batch() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_self_parent_rejected() {
        Scenario::new("self_parent")
            .definitions(vec![Definition::new("loop").extends("loop")])
            .outcome(|o| o.error_matching(r"cycle detected: loop -> loop$"))
            .run()
            .unwrap();
    }
}

mod duplicate_identifier {
    use super::*;

    #[test]
    fn test_duplicate_rejects_batch() {
        Scenario::new("duplicate")
            .definitions(vec![Definition::new("twin"), Definition::new("twin")])
            .outcome(|o| o.error("Duplicate definition identifier: twin"))
            .run()
            .unwrap();
    }
}
