//! Form rendering module
//!
//! - `field_renderer`: text inputs with inline errors
//! - `address_form`: state/city/neighborhood step
//! - `cargo_form`: cargo step

mod address_form;
mod cargo_form;
mod field_renderer;

pub use address_form::draw as draw_address_form;
pub use cargo_form::draw as draw_cargo_form;
