pub mod models;
pub mod services;
pub mod errors;
pub mod exporter;

pub use models::*;
pub use services::*;
pub use errors::*;
pub use exporter::*;
