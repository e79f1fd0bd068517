//! Trait abstraction for remote clients to enable mocking in tests

use super::error::ApiError;
use crate::state::{Institution, InterestRecord, NewInterest, Region, SubRegion};
use async_trait::async_trait;

/// Authenticated calls against the permutas API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterestApi: Send + Sync {
    /// `GET /interest`
    async fn list_interests(&self, token: &str) -> Result<Vec<InterestRecord>, ApiError>;

    /// `DELETE /interest/:id`
    async fn delete_interest(&self, token: &str, id: &str) -> Result<(), ApiError>;

    /// `POST /interest`
    async fn create_interest(&self, token: &str, interest: &NewInterest) -> Result<(), ApiError>;

    /// `GET /institution`
    async fn list_institutions(&self, token: &str) -> Result<Vec<Institution>, ApiError>;
}

/// Public lookups against the geography service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeographyApi: Send + Sync {
    /// `GET /localidades/estados`
    async fn list_regions(&self) -> Result<Vec<Region>, ApiError>;

    /// `GET /localidades/estados/:id/municipios`
    async fn list_sub_regions(&self, region_id: &str) -> Result<Vec<SubRegion>, ApiError>;
}
