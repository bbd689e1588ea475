//! Parlor gateway — web portal, websocket bridge, and raw TCP listener.

pub mod page;
pub mod server;
pub mod tcp;
pub mod ws;

pub use server::start_server;
