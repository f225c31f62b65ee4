pub mod models;
pub mod utilities;
pub mod services;
pub mod state_machine;
pub mod views;
