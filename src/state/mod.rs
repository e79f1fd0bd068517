//! Application state module

mod app_state;
mod cascade;
mod forms;
mod models;

pub use app_state::*;
pub use cascade::*;
pub use forms::*;
pub use models::*;
