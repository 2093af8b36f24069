//! The owning client: configuration, credentials and transport.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::api::FeatureTypesApi;
use crate::compat::ServerCompat;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::feature_types::FeatureTypesClient;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Entry point to a GeoServer REST API.
///
/// Cheap to share: the transport sits behind an `Arc` and nothing else is
/// mutated after construction. Resource-specific operations hang off
/// accessors such as [`feature_types`](Self::feature_types).
#[derive(Clone)]
pub struct GeoServerClient {
    feature_types_api: FeatureTypesApi,
    authorization: Option<String>,
    compat: ServerCompat,
    transport: Arc<dyn Transport>,
}

impl GeoServerClient {
    /// Client using a blocking `ureq` transport.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = Arc::new(UreqTransport::new(config.timeout));
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, ApiError> {
        let authorization = match (&config.username, &config.password) {
            (Some(user), Some(password)) => {
                let encoded = STANDARD.encode(format!("{user}:{password}"));
                Some(format!("Basic {encoded}"))
            }
            _ => None,
        };
        Ok(Self {
            feature_types_api: FeatureTypesApi::new(&config.base_url)?,
            authorization,
            compat: config.compat,
            transport,
        })
    }

    /// Client configured from `GEOSERVER_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn feature_types(&self) -> FeatureTypesClient<'_> {
        FeatureTypesClient::new(self)
    }

    pub fn compat(&self) -> ServerCompat {
        self.compat
    }

    pub(crate) fn feature_types_api(&self) -> &FeatureTypesApi {
        &self.feature_types_api
    }

    /// Authenticate and send `request`, returning the raw response.
    pub fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(authorization) = &self.authorization {
            request
                .headers
                .push(("authorization".to_string(), authorization.clone()));
        }
        let method = request.method.as_str();
        let url = request.url.clone();
        match self.transport.execute(request) {
            Ok(response) => {
                tracing::debug!(method, %url, status = response.status, "geoserver request completed");
                Ok(response)
            }
            Err(err) => {
                tracing::debug!(method, %url, error = %err, "geoserver request failed");
                Err(err)
            }
        }
    }
}

impl fmt::Debug for GeoServerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoServerClient")
            .field("feature_types_api", &self.feature_types_api)
            .field("authenticated", &self.authorization.is_some())
            .field("compat", &self.compat)
            .finish_non_exhaustive()
    }
}
