//! Property tests for blank-row filtering.

use proptest::prelude::*;
use tabmap_model::{FileData, is_blank_row};

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        Just("\t".to_string()),
        "[a-z0-9]{1,4}",
    ]
}

fn raw_rows() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(cell(), 0..5), 0..20)
}

proptest! {
    #[test]
    fn blank_rows_never_survive(rows in raw_rows()) {
        let data = FileData::from_raw_rows("f.csv", rows.clone(), Vec::new(), Vec::new());
        let expected = rows.iter().filter(|row| !is_blank_row(row)).count();
        prop_assert_eq!(data.len(), expected);
        for (position, row) in data.rows.iter().enumerate() {
            prop_assert_eq!(row.index, position);
            prop_assert!(!is_blank_row(&row.values));
        }
    }

    #[test]
    fn filtering_is_idempotent(rows in raw_rows()) {
        let once = FileData::from_raw_rows("f.csv", rows, Vec::new(), Vec::new());
        let again = FileData::from_raw_rows(
            "f.csv",
            once.rows.iter().map(|row| row.values.clone()).collect(),
            Vec::new(),
            Vec::new(),
        );
        prop_assert_eq!(once, again);
    }
}
