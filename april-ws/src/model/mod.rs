//! Data carried by a quote flow

mod credentials;
mod traveller;
mod trip_date;

pub use credentials::Credentials;
pub use traveller::Traveller;
pub use trip_date::TripDate;
