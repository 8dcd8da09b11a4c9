//! Variable module

mod api;
mod models;

pub use models::{Variable, VariableAttributes, VariableCategory};
