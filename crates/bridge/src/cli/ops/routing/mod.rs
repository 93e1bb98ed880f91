pub mod find_providers;

pub use find_providers::DhtFindProviders;
