//! Reference cache client.
//!
//! The prefetch policy only talks to the `CacheClient` trait. This module
//! provides the implementation used by the host: an in-memory store filled
//! by fire-and-forget HTTP fetches, with staleness checks and in-flight
//! de-duplication per resource key.

pub mod data;
pub mod error;
pub mod http;

pub use data::CachedData;
pub use error::FetchError;
pub use http::HttpCacheClient;
