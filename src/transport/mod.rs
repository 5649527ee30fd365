//! HTTP transport layer for talking to the Postmark API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP executors ([`HttpClient`])
//! - Production executor implementation ([`ReqwestClient`])
//! - Credential injection ([`AuthTransport`], [`Credentials`], [`ConnectionType`])

mod auth;
mod client;
mod error;
mod exchange;

#[cfg(test)]
mod auth_tests;

pub use auth::{
    ACCOUNT_TOKEN_HEADER, AuthTransport, ConnectionType, Credentials, ParseConnectionTypeError,
    SERVER_TOKEN_HEADER,
};
pub use client::ReqwestClient;
pub use error::HttpError;
pub use exchange::{HttpClient, HttpRequest, HttpResponse};
