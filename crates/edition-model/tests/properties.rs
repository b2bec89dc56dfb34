//! Property tests for date keys and catalog ordering.

use chrono::NaiveDate;
use proptest::prelude::*;

use edition_model::{DateKey, Edition, EditionCatalog};

fn naive_date() -> impl Strategy<Value = NaiveDate> {
    // 0000-01-01 ..= 9999-12-31 as days from the common era
    let first = NaiveDate::from_ymd_opt(0, 1, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
    let span = (last - first).num_days();
    (0..=span).prop_map(move |offset| first + chrono::TimeDelta::days(offset))
}

fn date_key() -> impl Strategy<Value = DateKey> {
    naive_date().prop_map(|date| DateKey::try_from(date).unwrap())
}

proptest! {
    #[test]
    fn format_parse_round_trip(key in date_key()) {
        let text = key.to_string();
        prop_assert_eq!(text.len(), 10);
        let parsed = DateKey::parse(&text).unwrap();
        prop_assert_eq!(parsed, key);
        prop_assert_eq!(DateKey::parse(&parsed.to_string()).unwrap(), parsed);
    }

    #[test]
    fn ordering_matches_calendar(a in naive_date(), b in naive_date()) {
        let left = DateKey::try_from(a).unwrap();
        let right = DateKey::try_from(b).unwrap();
        prop_assert_eq!(left.cmp(&right), a.cmp(&b));
    }

    #[test]
    fn dates_descend_strictly(keys in prop::collection::btree_set(date_key(), 1..40)) {
        let catalog = EditionCatalog::from_editions(
            keys.iter().map(|&date| Edition::new(date, 1, "full.pdf").unwrap()),
        )
        .unwrap();

        let dates: Vec<DateKey> = catalog.all_dates_descending().collect();
        prop_assert_eq!(dates.len(), keys.len());
        for pair in dates.windows(2) {
            prop_assert!(pair[0] > pair[1]);
        }
        for key in &keys {
            prop_assert_eq!(dates.iter().filter(|d| *d == key).count(), 1);
        }
        prop_assert_eq!(catalog.newest().map(Edition::date), keys.iter().next_back().copied());
    }
}
