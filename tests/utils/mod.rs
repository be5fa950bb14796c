pub mod assertions;
pub mod clients;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::MessageAssertion;
#[allow(unused_imports)]
pub use clients::TestClient;
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
