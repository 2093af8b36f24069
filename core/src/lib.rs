//! Typed client for the feature-type collection of the GeoServer REST API.
//!
//! # Overview
//! `GeoServerClient` owns configuration, credentials and a blocking
//! transport. `client.feature_types()` returns a `FeatureTypesClient` that
//! creates, updates, looks up, lists and deletes feature types, working
//! around two known server defects on the way: stores the server would
//! mis-route are dropped from the submitted payload, and GeoServer's
//! malformed encoding of empty listings is read as an empty list.
//!
//! # Design
//! - `FeatureTypesApi` is stateless and does no I/O: each endpoint has a
//!   `build_*` (produces `HttpRequest`) and a `parse_*` (consumes
//!   `HttpResponse`), so request shapes are testable without a server.
//! - `Transport` is the I/O seam; `UreqTransport` is the default.
//! - Wire DTOs (`types`) are kept apart from the domain model (`model`);
//!   `mapper` converts between them.
//! - Pre-submission checks for store-implied writes live in `ServerCompat`.

pub mod api;
pub mod client;
pub mod compat;
pub mod config;
pub mod error;
pub mod feature_types;
pub mod http;
pub mod mapper;
pub mod model;
pub mod transport;
pub mod types;

pub use api::{FeatureTypesApi, Listing};
pub use client::GeoServerClient;
pub use compat::ServerCompat;
pub use config::ClientConfig;
pub use error::ApiError;
pub use feature_types::FeatureTypesClient;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use model::{AttributeInfo, BoundingBox, FeatureTypeInfo, NamedLink, ProjectionPolicy, StoreRef};
pub use transport::{Transport, UreqTransport};
