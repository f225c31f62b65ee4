pub mod dashboard;
pub mod price_cache;
pub mod snapshot_service;
pub mod surface;
pub mod wallet_provider;
