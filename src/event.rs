//! Results delivered from background requests to the UI loop

use crate::api::ApiError;
use crate::state::{Institution, InterestRecord, Region, SubRegion};

/// A screen event tagged with the mount it belongs to
#[derive(Debug)]
pub struct AppEvent {
    pub mount_id: u64,
    pub event: ScreenEvent,
}

#[derive(Debug)]
pub enum ScreenEvent {
    InterestsLoaded(Result<Vec<InterestRecord>, ApiError>),
    InterestDeleted {
        id: String,
        result: Result<(), ApiError>,
    },
    InterestCreated(Result<(), ApiError>),
    InstitutionsLoaded(Result<Vec<Institution>, ApiError>),
    RegionsLoaded(Result<Vec<Region>, ApiError>),
    SubRegionsLoaded {
        generation: u64,
        result: Result<Vec<SubRegion>, ApiError>,
    },
}
