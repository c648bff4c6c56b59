//! Application state module

mod app_state;
pub mod catalog;
mod forms;

#[cfg(test)]
pub(crate) use forms::fixtures;

pub use app_state::*;
pub use forms::*;
