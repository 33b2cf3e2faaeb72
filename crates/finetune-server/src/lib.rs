pub mod configuration;
pub mod logging;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod test_support;

pub use state::AppState;
