//! Lista de Compras - Terminal Shopping List Library
//!
//! A single-screen shopping list with a running total and spreadsheet export,
//! built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
