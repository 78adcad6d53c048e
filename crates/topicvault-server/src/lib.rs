//! TopicVault server: HTTP API over the topic registry.

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
