//! Core library components.
//!
//! This module contains the connection target resolver: indirect variable
//! lookup, DNS service discovery, URL assembly, and the engine hand-off.

pub mod config;
pub mod connection;
pub mod constants;
pub mod discovery;
pub mod engine;
pub mod env;
pub mod types;
