//! Release client types for the releasify gateway.
//!
//! The gateway never computes releases itself. It validates a request,
//! hands a [`ReleaseRequest`] plus the caller's [`Credentials`] to a
//! [`ReleaseClient`], and reshapes the [`ReleaseResult`] or [`ReleaseError`]
//! it gets back.
//!
//! # Adapters
//!
//! - [`HttpReleaseClient`] forwards the request to a remote release service
//! - any other type implementing [`ReleaseClient`] can be plugged into the gateway

pub mod client;
pub mod credentials;
pub mod error;
pub mod http_client;
pub mod release;

pub use client::ReleaseClient;
pub use credentials::Credentials;
pub use error::ReleaseError;
pub use http_client::HttpReleaseClient;
pub use release::{ReleaseRequest, ReleaseResult};
