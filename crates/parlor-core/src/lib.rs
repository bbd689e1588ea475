//! Parlor core — matchmaking and relay for anonymous chat sessions.
//!
//! Incoming connections are wrapped as [`Endpoint`]s and offered to the
//! [`Matcher`], which pairs them with another waiting endpoint or, after
//! the wait window, with a markov [`bot::Bot`]. Paired endpoints are piped
//! through the duplex [`relay`] until either side ends.

pub mod bot;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod matcher;
pub mod relay;

pub use config::{BotConfig, MatchConfig, ServerConfig};
pub use endpoint::Endpoint;
pub use error::{Error, Result};
pub use matcher::Matcher;
pub use relay::relay;
