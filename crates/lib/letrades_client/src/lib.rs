//! # letrades_client
//!
//! Chat client for the letrades relay: the session state machine, the HTTP
//! transport to the relay and plain-text rendering of turns.

pub mod render;
pub mod session;
pub mod transport;

pub use session::{Capabilities, ChatSession, SubmitOutcome};
pub use transport::{ClientError, HttpRelay, RelayEndpoint, RelayTransport};
