//! Lantern - Static File Server
//!
//! Core library for the HTTP/1.1 protocol engine and the server around it.

pub mod config;
pub mod http;
pub mod server;
