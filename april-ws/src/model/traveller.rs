//! Traveller covered by a quote

use serde::{Deserialize, Serialize};
use soap_client::SoapValue;

/// One traveller of the trip, as sent in the `assures` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traveller {
    #[serde(rename = "assure")]
    pub is_insured: bool,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    #[serde(rename = "prixVoyage")]
    pub trip_price: f64,
    #[serde(rename = "souscripteur")]
    pub is_subscriber: bool,
}

impl Traveller {
    pub fn new(
        is_insured: bool,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        trip_price: f64,
        is_subscriber: bool,
    ) -> Self {
        Self {
            is_insured,
            last_name: last_name.into(),
            first_name: first_name.into(),
            trip_price,
            is_subscriber,
        }
    }

    /// Wire representation: `assure`, `nom`, `prenom`, `prixVoyage`, `souscripteur`
    pub fn to_soap_value(&self) -> SoapValue {
        SoapValue::Struct(vec![
            ("assure".to_string(), self.is_insured.into()),
            ("nom".to_string(), self.last_name.as_str().into()),
            ("prenom".to_string(), self.first_name.as_str().into()),
            ("prixVoyage".to_string(), self.trip_price.into()),
            ("souscripteur".to_string(), self.is_subscriber.into()),
        ])
    }
}
