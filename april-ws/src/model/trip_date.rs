//! Trip dates in the service's split format

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use soap_client::SoapValue;

/// A date split into `annee`, `jour` and `mois` strings
///
/// The year is rendered on four digits, day and month on two, zero padded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDate {
    #[serde(rename = "annee")]
    pub year: String,
    #[serde(rename = "jour")]
    pub day: String,
    #[serde(rename = "mois")]
    pub month: String,
}

impl TripDate {
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: format!("{:04}", date.year()),
            day: format!("{:02}", date.day()),
            month: format!("{:02}", date.month()),
        }
    }

    pub fn to_soap_value(&self) -> SoapValue {
        SoapValue::Struct(vec![
            ("annee".to_string(), self.year.as_str().into()),
            ("jour".to_string(), self.day.as_str().into()),
            ("mois".to_string(), self.month.as_str().into()),
        ])
    }
}
