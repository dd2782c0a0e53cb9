//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! holding the shopping list, the input form and the export action.

pub mod list;
pub mod state;
pub mod text;

pub use list::*;
pub use state::*;
