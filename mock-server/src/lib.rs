//! In-memory emulation of the GeoServer REST feature-type endpoints.
//!
//! Reproduces the server behaviors the client works around: a create whose
//! body lacks `nativeName` fails with 500 (GeoServer 2.15.2), a body naming
//! a store other than the target collection's fails with 500, and an empty
//! store listing is encoded as `{"featureTypes": ""}`.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreLink>,
    /// Everything else is stored and echoed back verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreLink {
    #[serde(rename = "@class", default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "featureType")]
    pub feature_type: FeatureType,
}

#[derive(Debug, Default)]
struct Workspace {
    default_store: Option<String>,
    stores: HashMap<String, Vec<FeatureType>>,
}

/// Workspaces, their stores and the feature types published on each store.
///
/// Feature types keep their insertion order within a store.
#[derive(Debug, Default)]
pub struct Catalog {
    workspaces: HashMap<String, Workspace>,
}

type Failure = (StatusCode, String);

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `store` to `workspace`. The first store of a workspace becomes
    /// its default store.
    pub fn with_store(mut self, workspace: &str, store: &str) -> Self {
        let ws = self.workspaces.entry(workspace.to_string()).or_default();
        ws.default_store.get_or_insert_with(|| store.to_string());
        ws.stores.entry(store.to_string()).or_default();
        self
    }

    fn default_store(&self, workspace: &str) -> Result<String, Failure> {
        let ws = self
            .workspaces
            .get(workspace)
            .ok_or_else(|| not_found(format!("No such workspace: {workspace}")))?;
        ws.default_store
            .clone()
            .ok_or_else(|| not_found(format!("No default store in workspace {workspace}")))
    }

    fn store(&self, workspace: &str, store: &str) -> Result<&Vec<FeatureType>, Failure> {
        self.workspaces
            .get(workspace)
            .and_then(|ws| ws.stores.get(store))
            .ok_or_else(|| not_found(format!("No such data store: {workspace},{store}")))
    }

    fn store_mut(&mut self, workspace: &str, store: &str) -> Result<&mut Vec<FeatureType>, Failure> {
        self.workspaces
            .get_mut(workspace)
            .and_then(|ws| ws.stores.get_mut(store))
            .ok_or_else(|| not_found(format!("No such data store: {workspace},{store}")))
    }

    fn insert(&mut self, workspace: &str, store: &str, mut feature_type: FeatureType) -> Result<String, Failure> {
        check_submission(store, &feature_type)?;
        let native_name = feature_type
            .native_name
            .clone()
            .ok_or_else(|| server_error("nativeName is required".to_string()))?;
        let name = feature_type.name.get_or_insert(native_name).clone();
        feature_type.store = Some(store_link(workspace, store));

        let entries = self.store_mut(workspace, store)?;
        if entries.iter().any(|ft| ft.name.as_deref() == Some(name.as_str())) {
            return Err((
                StatusCode::CONFLICT,
                format!("Resource named '{name}' already exists in store: '{store}'"),
            ));
        }
        entries.push(feature_type);
        Ok(name)
    }
}

pub type Db = Arc<RwLock<Catalog>>;

pub fn app() -> Router {
    app_with(Catalog::new())
}

pub fn app_with(catalog: Catalog) -> Router {
    let db: Db = Arc::new(RwLock::new(catalog));
    Router::new()
        .route("/rest/workspaces/{ws}/featuretypes", post(create_on_default_store))
        .route("/rest/workspaces/{ws}/featuretypes/{name}", get(get_by_default_store))
        .route(
            "/rest/workspaces/{ws}/datastores/{store}/featuretypes",
            get(list_feature_types).post(create_on_store),
        )
        .route(
            "/rest/workspaces/{ws}/datastores/{store}/featuretypes/{name}",
            get(get_feature_type).put(update_feature_type).delete(delete_feature_type),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(catalog)).await
}

async fn create_on_default_store(
    State(db): State<Db>,
    Path(ws): Path<String>,
    Json(input): Json<Envelope>,
) -> Result<(StatusCode, String), Failure> {
    let mut catalog = db.write().await;
    let store = catalog.default_store(&ws)?;
    let name = catalog.insert(&ws, &store, input.feature_type)?;
    tracing::info!(workspace = %ws, %store, %name, "created feature type on default store");
    Ok((StatusCode::CREATED, name))
}

async fn create_on_store(
    State(db): State<Db>,
    Path((ws, store)): Path<(String, String)>,
    Json(input): Json<Envelope>,
) -> Result<(StatusCode, String), Failure> {
    let name = db.write().await.insert(&ws, &store, input.feature_type)?;
    tracing::info!(workspace = %ws, %store, %name, "created feature type");
    Ok((StatusCode::CREATED, name))
}

async fn get_by_default_store(
    State(db): State<Db>,
    Path((ws, name)): Path<(String, String)>,
) -> Result<Json<Envelope>, Failure> {
    let catalog = db.read().await;
    let store = catalog.default_store(&ws)?;
    find(catalog.store(&ws, &store)?, &name).map(Json)
}

async fn get_feature_type(
    State(db): State<Db>,
    Path((ws, store, name)): Path<(String, String, String)>,
) -> Result<Json<Envelope>, Failure> {
    let catalog = db.read().await;
    find(catalog.store(&ws, &store)?, &name).map(Json)
}

async fn list_feature_types(
    State(db): State<Db>,
    Path((ws, store)): Path<(String, String)>,
) -> Result<Json<Value>, Failure> {
    let catalog = db.read().await;
    let entries = catalog.store(&ws, &store)?;
    if entries.is_empty() {
        // GeoServer's encoding of an empty collection.
        return Ok(Json(json!({ "featureTypes": "" })));
    }
    let links: Vec<Value> = entries
        .iter()
        .filter_map(|ft| ft.name.as_deref())
        .map(|name| json!({ "name": name, "href": href(&ws, &store, name) }))
        .collect();
    Ok(Json(json!({ "featureTypes": { "featureType": links } })))
}

async fn update_feature_type(
    State(db): State<Db>,
    Path((ws, store, current)): Path<(String, String, String)>,
    Json(input): Json<Envelope>,
) -> Result<StatusCode, Failure> {
    let mut update = input.feature_type;
    check_submission(&store, &update)?;
    let native_name = update
        .native_name
        .clone()
        .ok_or_else(|| server_error("nativeName is required".to_string()))?;
    let name = update.name.get_or_insert(native_name).clone();

    let mut catalog = db.write().await;
    let entries = catalog.store_mut(&ws, &store)?;
    if name != current && entries.iter().any(|ft| ft.name.as_deref() == Some(name.as_str())) {
        return Err((StatusCode::CONFLICT, format!("Resource named '{name}' already exists")));
    }
    let existing = entries
        .iter_mut()
        .find(|ft| ft.name.as_deref() == Some(current.as_str()))
        .ok_or_else(|| not_found(format!("No such feature type: {ws},{store},{current}")))?;
    update.store = Some(store_link(&ws, &store));
    *existing = update;
    tracing::info!(workspace = %ws, %store, %current, %name, "updated feature type");
    Ok(StatusCode::OK)
}

async fn delete_feature_type(
    State(db): State<Db>,
    Path((ws, store, name)): Path<(String, String, String)>,
) -> Result<StatusCode, Failure> {
    let mut catalog = db.write().await;
    let entries = catalog.store_mut(&ws, &store)?;
    let before = entries.len();
    entries.retain(|ft| ft.name.as_deref() != Some(name.as_str()));
    if entries.len() == before {
        return Err(not_found(format!("No such feature type: {ws},{store},{name}")));
    }
    Ok(StatusCode::OK)
}

/// Reject bodies whose store reference points somewhere else.
fn check_submission(store: &str, feature_type: &FeatureType) -> Result<(), Failure> {
    if let Some(link) = &feature_type.store {
        let requested = link.name.rsplit(':').next().unwrap_or(&link.name);
        if requested != store {
            return Err(server_error(format!(
                "Expected store {store} but client specified {}",
                link.name
            )));
        }
    }
    Ok(())
}

fn find(entries: &[FeatureType], name: &str) -> Result<Envelope, Failure> {
    entries
        .iter()
        .find(|ft| ft.name.as_deref() == Some(name))
        .cloned()
        .map(|feature_type| Envelope { feature_type })
        .ok_or_else(|| not_found(format!("No such feature type: {name}")))
}

fn store_link(workspace: &str, store: &str) -> StoreLink {
    StoreLink {
        class: Some("dataStore".to_string()),
        name: format!("{workspace}:{store}"),
        href: Some(format!(
            "http://localhost/geoserver/rest/workspaces/{workspace}/datastores/{store}.json"
        )),
    }
}

fn href(workspace: &str, store: &str, name: &str) -> String {
    format!("http://localhost/geoserver/rest/workspaces/{workspace}/datastores/{store}/featuretypes/{name}.json")
}

fn not_found(message: String) -> Failure {
    (StatusCode::NOT_FOUND, message)
}

fn server_error(message: String) -> Failure {
    (StatusCode::INTERNAL_SERVER_ERROR, message)
}
