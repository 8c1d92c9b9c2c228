//! Route paths served by the relay.

/// Liveness probe.
pub const GET_API_HEALTH: &str = "/api/health";

/// Chat relay.
pub const POST_API_CHAT: &str = "/api/chat";
