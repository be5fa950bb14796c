// Public API - what other modules can use
pub use errors::{AuthError, LookupError};
pub use handlers::list_clients;
pub use models::{Client, ClientSummary, Liveness};
pub use registry::{ClientRegistry, Registration};

// Internal modules
mod errors;
mod handlers;
mod models;
mod registry;
