//! Search over the day's records.

use agilix_core::ContactRecord;

/// Records whose values contain `term`, ignoring case.
///
/// A record matches if any single field value contains the term. A blank
/// term returns every record. Order is preserved and the input is never
/// modified.
pub fn filter(records: &[ContactRecord], term: &str) -> Vec<ContactRecord> {
    if term.trim().is_empty() {
        return records.to_vec();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| record.matches_lowercase(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use agilix_test_utils::fixtures::sample_contacts;
    use agilix_test_utils::generators::arb_contacts;
    use proptest::prelude::*;

    #[test]
    fn test_empty_and_blank_terms_return_everything() {
        let records = sample_contacts(12);
        assert_eq!(filter(&records, ""), records);
        assert_eq!(filter(&records, "   "), records);
    }

    #[test]
    fn test_matches_any_field_case_insensitively() {
        let records = sample_contacts(12);

        let hits = filter(&records, "CONTACT11@");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].get("first_name"), Some("First11"));

        let directors = filter(&records, "director");
        let names: Vec<&str> = directors
            .iter()
            .filter_map(|record| record.get("first_name"))
            .collect();
        assert_eq!(
            names,
            vec!["First0", "First2", "First4", "First6", "First8", "First10"]
        );
    }

    #[test]
    fn test_no_match_yields_empty() {
        assert!(filter(&sample_contacts(5), "zzz-nobody").is_empty());
    }

    proptest! {
        #[test]
        fn prop_empty_term_is_identity(records in arb_contacts(20)) {
            prop_assert_eq!(filter(&records, ""), records);
        }

        #[test]
        fn prop_results_are_an_ordered_subset(records in arb_contacts(20), term in "[a-z]{1,3}") {
            let hits = filter(&records, &term);
            prop_assert!(hits.len() <= records.len());

            let mut remaining = records.iter();
            for hit in &hits {
                prop_assert!(remaining.any(|record| record == hit));
            }
        }
    }
}
