//! Stateless request builder and response parser for the feature-type
//! endpoints of the GeoServer REST API.
//!
//! # Design
//! `FeatureTypesApi` holds only the REST root URL. Each endpoint is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`. Parsers return wire DTOs; mapping
//! to the domain model happens in `FeatureTypesClient`.

use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{FeatureTypeEnvelope, FeatureTypeList};

const JSON: &str = "application/json";

/// Which feature types a store listing returns.
///
/// Only used by direct callers of `FeatureTypesApi::build_list_by_store`;
/// `FeatureTypesClient` always lists without a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// Feature types already published.
    Configured,
    /// Native types in the store not yet published.
    Available,
    /// Like `Available`, restricted to types with a geometry.
    AvailableWithGeom,
    All,
}

impl Listing {
    fn as_str(self) -> &'static str {
        match self {
            Listing::Configured => "configured",
            Listing::Available => "available",
            Listing::AvailableWithGeom => "available_with_geom",
            Listing::All => "all",
        }
    }
}

/// Synchronous, stateless client for the feature-type endpoints.
#[derive(Debug, Clone)]
pub struct FeatureTypesApi {
    root: Url,
}

impl FeatureTypesApi {
    /// `base_url` is the GeoServer web application URL; `rest/` is appended.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut root = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        root.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(format!("{base_url}: cannot be a base")))?
            .pop_if_empty()
            .push("rest");
        Ok(Self { root })
    }

    pub fn build_create_on_default_store(
        &self,
        workspace: &str,
        body: &FeatureTypeEnvelope,
    ) -> Result<HttpRequest, ApiError> {
        let url = self.url(&["workspaces", workspace, "featuretypes"], &[]);
        json_request(HttpMethod::Post, url, body)
    }

    pub fn build_create_on_store(
        &self,
        workspace: &str,
        store: &str,
        body: &FeatureTypeEnvelope,
    ) -> Result<HttpRequest, ApiError> {
        let url = self.url(&["workspaces", workspace, "datastores", store, "featuretypes"], &[]);
        json_request(HttpMethod::Post, url, body)
    }

    pub fn build_get_by_default_store(&self, workspace: &str, name: &str, quiet_on_not_found: bool) -> HttpRequest {
        let url = self.url(
            &["workspaces", workspace, "featuretypes", name],
            &[("quietOnNotFound", bool_param(quiet_on_not_found))],
        );
        empty_request(HttpMethod::Get, url)
    }

    pub fn build_get(&self, workspace: &str, store: &str, name: &str, quiet_on_not_found: bool) -> HttpRequest {
        let url = self.url(
            &["workspaces", workspace, "datastores", store, "featuretypes", name],
            &[("quietOnNotFound", bool_param(quiet_on_not_found))],
        );
        empty_request(HttpMethod::Get, url)
    }

    /// `recalculate` names the derived properties the server should
    /// recompute (for example `nativebbox`); empty means none.
    /// `FeatureTypesClient::update` always passes none.
    pub fn build_modify(
        &self,
        workspace: &str,
        store: &str,
        current_name: &str,
        body: &FeatureTypeEnvelope,
        recalculate: &[&str],
    ) -> Result<HttpRequest, ApiError> {
        let joined = recalculate.join(",");
        let mut query = Vec::new();
        if !recalculate.is_empty() {
            query.push(("recalculate", joined.as_str()));
        }
        let url = self.url(
            &["workspaces", workspace, "datastores", store, "featuretypes", current_name],
            &query,
        );
        json_request(HttpMethod::Put, url, body)
    }

    pub fn build_list_by_store(
        &self,
        workspace: &str,
        store: &str,
        listing: Option<Listing>,
        quiet_on_not_found: bool,
    ) -> HttpRequest {
        let mut query = Vec::with_capacity(2);
        if let Some(listing) = listing {
            query.push(("list", listing.as_str()));
        }
        query.push(("quietOnNotFound", bool_param(quiet_on_not_found)));
        let url = self.url(&["workspaces", workspace, "datastores", store, "featuretypes"], &query);
        empty_request(HttpMethod::Get, url)
    }

    pub fn build_delete(&self, workspace: &str, store: &str, name: &str, recurse: bool) -> HttpRequest {
        let url = self.url(
            &["workspaces", workspace, "datastores", store, "featuretypes", name],
            &[("recurse", bool_param(recurse))],
        );
        empty_request(HttpMethod::Delete, url)
    }

    /// The server answers a create with 201 and the new name as plain text.
    pub fn parse_created(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response, 201)?;
        Ok(response.body)
    }

    pub fn parse_feature_type(&self, response: HttpResponse) -> Result<FeatureTypeEnvelope, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_modified(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<FeatureTypeList, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_deleted(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> String {
        let mut url = self.root.clone();
        // `new` already proved the root can be a base.
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url.into()
    }
}

fn bool_param(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn empty_request(method: HttpMethod, url: String) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: vec![("accept".to_string(), JSON.to_string())],
        body: None,
    }
}

fn json_request(method: HttpMethod, url: String, body: &FeatureTypeEnvelope) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![
            ("accept".to_string(), JSON.to_string()),
            ("content-type".to_string(), JSON.to_string()),
        ],
        body: Some(body),
    })
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
