//! Document sources.

mod local;

pub use local::LocalSource;
