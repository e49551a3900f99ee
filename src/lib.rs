pub mod error;
pub mod models;
pub mod services;
pub mod sources;
pub mod utils;

pub use error::IngestError;
pub use models::Config;
