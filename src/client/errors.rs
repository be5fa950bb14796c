use thiserror::Error;

/// Registration rejected because the presented token does not prove ownership
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token does not match the one registered for client {id}")]
    TokenMismatch { id: String },

    #[error("Token is already bound to another client")]
    TokenInUse { id: String },
}

impl AuthError {
    /// Id of the client whose registration was rejected
    pub fn client_id(&self) -> &str {
        match self {
            AuthError::TokenMismatch { id } | AuthError::TokenInUse { id } => id,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No client registered with the presented token")]
    UnknownToken,
}
