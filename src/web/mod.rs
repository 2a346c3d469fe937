//! Web API module for contact-relay.
//!
//! This module provides the HTTP surface: the contact endpoint, the health
//! probe, the OpenAPI document, and the server that runs them.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
