// Public API
pub use connection::ConnectionHandle;
pub use dispatcher::MessageDispatcher;
pub use handler::websocket_handler;
pub use messages::{decode_inbound, DecodeError, InboundMessage, MemberView, OutboundMessage};
pub use socket::{Connection, MessageHandler, SocketError, SocketWrapper};

// Internal modules
mod connection;
mod dispatcher;
mod handler;
mod messages;
mod socket;
