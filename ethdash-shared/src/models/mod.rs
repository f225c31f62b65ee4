pub mod errors;
pub mod gas;
pub mod price;
pub mod snapshot;
pub mod wallet;
