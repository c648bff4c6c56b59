//! Form rendering module
//!
//! - `field_renderer`: one field box with its inline error
//! - `registration_form`: the scrolled form and its action panel
//! - `success`: confirmation screen

mod field_renderer;
mod registration_form;
mod success;

pub use registration_form::draw as draw_registration;
pub use success::draw as draw_success;
