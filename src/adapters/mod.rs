// Adapters layer: concrete implementations of the domain ports.

pub mod hh_api;
pub mod json_storage;

pub use hh_api::HeadHunterApi;
pub use json_storage::JsonFileStorage;
