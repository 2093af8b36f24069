//! Error types for the GeoServer REST client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the safe lookups turn it into
//! `None`. `Configuration` and `Compatibility` are raised before any request
//! is sent and signal input the caller has to fix.

/// Errors returned by the client and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned an unexpected status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The base URL cannot be used as a REST root.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Missing or inconsistent caller-supplied input.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Input rejected up front because the target server version is known
    /// to mishandle it.
    #[error("server compatibility: {0}")]
    Compatibility(String),
}
