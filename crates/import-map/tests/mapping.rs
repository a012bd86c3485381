use std::collections::HashMap;

use import_map::{ColumnMapping, DEFAULT_LABEL};
use import_model::UploadResponse;
use proptest::prelude::*;

const COLUMNS: [&str; 4] = ["colA", "colB", "colC", "Email"];
const LABELS: [&str; 6] = ["Default", "Email", "Phone", "Price", "colA", "colC"];

fn targets() -> Vec<String> {
    ["Email", "Phone", "Price"].map(String::from).to_vec()
}

#[test]
fn second_assignment_wins() {
    let mut mapping = ColumnMapping::new(["colA", "colB"]).with_targets(targets());
    mapping.set_mapping("colA", DEFAULT_LABEL).unwrap();
    mapping.set_mapping("colB", DEFAULT_LABEL).unwrap();

    mapping.set_mapping("colA", "Email").unwrap();
    mapping.set_mapping("colB", "Email").unwrap();

    let labels: Vec<(&str, &str)> = mapping.labels().collect();
    assert_eq!(labels, [("colA", DEFAULT_LABEL), ("colB", "Email")]);
}

#[test]
fn built_from_upload_response() {
    let json = r#"{
        "data": [{"0": "x", "Name": "Ada", "unmappedColumn1": "?"}],
        "emptyFields": ["Full name"],
        "targetFields": [{"name": "Full name", "validation": "^.+$"}]
    }"#;
    let response: UploadResponse = serde_json::from_str(json).unwrap();
    let mapping = ColumnMapping::from_upload(&response);

    assert_eq!(mapping.columns(), ["Name", "unmappedColumn1"]);
    assert!(mapping.is_flagged_unmapped("unmappedColumn1"));
    assert!(!mapping.is_flagged_unmapped("Name"));
    assert!(mapping.is_target_label("Full name"));
    assert_eq!(mapping.options("Name"), ["Name", DEFAULT_LABEL, "Full name"]);
}

fn assignments() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..COLUMNS.len(), 0..LABELS.len()), 0..24)
}

proptest! {
    #[test]
    fn non_default_labels_have_one_holder(ops in assignments()) {
        let mut mapping = ColumnMapping::new(COLUMNS).with_targets(targets());
        for (column, label) in ops {
            mapping.set_mapping(COLUMNS[column], LABELS[label]).unwrap();
        }
        let mut holders: HashMap<&str, usize> = HashMap::new();
        for (_, label) in mapping.labels() {
            if label != DEFAULT_LABEL {
                *holders.entry(label).or_default() += 1;
            }
        }
        prop_assert!(holders.values().all(|count| *count == 1), "{holders:?}");
    }

    #[test]
    fn conflicting_assignment_demotes_previous_holder(
        ops in assignments(),
        column in 0..COLUMNS.len(),
        label in 1..LABELS.len(),
    ) {
        let mut mapping = ColumnMapping::new(COLUMNS).with_targets(targets());
        for (c, l) in ops {
            mapping.set_mapping(COLUMNS[c], LABELS[l]).unwrap();
        }
        let label = LABELS[label];
        let column = COLUMNS[column];
        let previous = mapping.holder(label).map(str::to_string);

        mapping.set_mapping(column, label).unwrap();

        prop_assert_eq!(mapping.label(column), Some(label));
        if let Some(previous) = previous.filter(|p| p != column) {
            prop_assert_eq!(mapping.label(&previous), Some(DEFAULT_LABEL));
        }
    }

    #[test]
    fn reapplying_current_label_is_a_no_op(ops in assignments(), column in 0..COLUMNS.len()) {
        let mut mapping = ColumnMapping::new(COLUMNS).with_targets(targets());
        for (c, l) in ops {
            mapping.set_mapping(COLUMNS[c], LABELS[l]).unwrap();
        }
        let column = COLUMNS[column];
        let current = mapping.label(column).unwrap().to_string();
        let before = mapping.clone();

        let demoted = mapping.set_mapping(column, &current).unwrap();

        prop_assert!(demoted.is_empty());
        prop_assert_eq!(mapping, before);
    }
}
