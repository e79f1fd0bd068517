//! HTTP clients for the permutas API and the geography service

mod client;
mod error;
mod geography;
mod traits;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use error::ApiError;
pub use geography::{GeographyClient, DEFAULT_GEOGRAPHY_URL};
pub use traits::{GeographyApi, InterestApi};

#[cfg(test)]
pub use traits::{MockGeographyApi, MockInterestApi};
