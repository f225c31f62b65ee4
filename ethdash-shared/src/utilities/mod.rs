pub mod config;
pub mod exchange;
pub mod gas;
pub mod logging;
pub mod rpc;
pub mod wallet;
