//! Search provider implementations.

pub mod kendra;

pub use kendra::KendraSearchClient;
