//! Runtime configuration for the parlor server.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Top-level server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address for the chat page + websocket upgrade listener.
    #[serde(default = "default_http_addr")]
    pub http_addr: String,
    /// Address for the raw TCP chat listener.
    #[serde(default = "default_tcp_addr")]
    pub tcp_addr: String,
    #[serde(default)]
    pub matching: MatchConfig,
    #[serde(default)]
    pub bot: BotConfig,
    /// Words per markov prefix window.
    #[serde(default = "default_prefix_len")]
    pub prefix_len: usize,
}

fn default_http_addr() -> String {
    "127.0.0.1:4000".to_string()
}

fn default_tcp_addr() -> String {
    "127.0.0.1:4001".to_string()
}

fn default_prefix_len() -> usize {
    2
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: default_http_addr(),
            tcp_addr: default_tcp_addr(),
            matching: MatchConfig::default(),
            bot: BotConfig::default(),
            prefix_len: default_prefix_len(),
        }
    }
}

impl ServerConfig {
    pub fn http_socket_addr(&self) -> Result<SocketAddr> {
        self.http_addr
            .parse()
            .map_err(|_| Error::Config(format!("invalid http address: {}", self.http_addr)))
    }

    pub fn tcp_socket_addr(&self) -> Result<SocketAddr> {
        self.tcp_addr
            .parse()
            .map_err(|_| Error::Config(format!("invalid tcp address: {}", self.tcp_addr)))
    }
}

/// Matchmaking parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchConfig {
    /// How long an offer waits for a human partner before the bot steps in.
    #[serde(default = "default_wait_window")]
    pub wait_window: Duration,
}

fn default_wait_window() -> Duration {
    Duration::from_secs(5)
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            wait_window: default_wait_window(),
        }
    }
}

/// Bot reply behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BotConfig {
    /// Artificial thinking delay before each generated reply.
    #[serde(default = "default_reply_delay")]
    pub reply_delay: Duration,
    /// Upper bound on reply length, in words.
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

fn default_reply_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_max_words() -> usize {
    10
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            reply_delay: default_reply_delay(),
            max_words: default_max_words(),
        }
    }
}
