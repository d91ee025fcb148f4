//! Property tests for parameter merging, fault localization and dates

use april_ws::fault_messages::{localize, FAULT_MESSAGES};
use april_ws::{Credentials, ParamKey, Params, QuoteError, SoapError, SoapValue, TripDate};
use chrono::NaiveDate;
use proptest::prelude::*;
use rstest::rstest;

proptest! {
    #[test]
    fn merged_params_are_union_with_credentials_winning(
        credentials in proptest::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,8}", 0..6),
        params in proptest::collection::btree_map("[a-z]{1,6}", any::<i32>(), 0..6),
    ) {
        let creds = Credentials::new(credentials.clone());
        let call_params: Params = params.clone().into_iter().collect();

        let merged = creds.to_params().union(call_params);

        for (name, value) in &credentials {
            let expected = SoapValue::from(value.as_str());
            prop_assert_eq!(merged.get(name), Some(&expected));
        }
        for (name, value) in &params {
            if !credentials.contains_key(name) {
                let expected = SoapValue::from(*value);
                prop_assert_eq!(merged.get(name), Some(&expected));
            }
        }
        let expected_len = credentials.len()
            + params.keys().filter(|k| !credentials.contains_key(*k)).count();
        prop_assert_eq!(merged.len(), expected_len);

        // Credentials lead the merged list
        let leading: Vec<ParamKey> = merged.iter().take(credentials.len()).map(|(k, _)| k.clone()).collect();
        let expected: Vec<ParamKey> = credentials.keys().map(|k| ParamKey::Named(k.clone())).collect();
        prop_assert_eq!(leading, expected);
    }

    #[test]
    fn unknown_faults_pass_through(message in "[A-Za-z ]{1,40}") {
        prop_assume!(localize(&message).is_none());
        let err = QuoteError::from(SoapError::Fault(message.clone()));
        prop_assert_eq!(err.message(), message);
    }

    #[test]
    fn trip_date_fields_are_padded(days in 0i64..100_000) {
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + chrono::Duration::days(days);
        let trip_date = TripDate::from_date(&date);
        prop_assert_eq!(trip_date.year.len(), 4);
        prop_assert_eq!(trip_date.day.len(), 2);
        prop_assert_eq!(trip_date.month.len(), 2);
        prop_assert_eq!(
            format!("{}-{}-{}", trip_date.year, trip_date.month, trip_date.day),
            date.format("%Y-%m-%d").to_string()
        );
    }
}

#[test]
fn every_table_entry_is_localized() {
    for (code, message) in FAULT_MESSAGES {
        let err = QuoteError::from_fault(code);
        assert!(matches!(err, QuoteError::KnownRemote { .. }), "{code} should be known");
        assert_eq!(err.message(), *message);
    }
}

#[rstest]
#[case(2023, 4, 7, "2023", "07", "04")]
#[case(2023, 12, 31, "2023", "31", "12")]
#[case(999, 1, 1, "0999", "01", "01")]
fn test_trip_date_format(
    #[case] year: i32,
    #[case] month: u32,
    #[case] day: u32,
    #[case] annee: &str,
    #[case] jour: &str,
    #[case] mois: &str,
) {
    let trip_date = TripDate::from_date(&NaiveDate::from_ymd_opt(year, month, day).unwrap());
    assert_eq!(trip_date.year, annee);
    assert_eq!(trip_date.day, jour);
    assert_eq!(trip_date.month, mois);
}
