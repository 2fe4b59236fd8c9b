pub mod error;
pub mod namespaces;
pub mod types;
