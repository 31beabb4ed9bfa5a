pub mod config;
pub mod ids;
pub mod mock_api;

pub use config::{ApiConfig, Operation};
pub use mock_api::MockApi;
