//! Domain model handed to and returned from `FeatureTypesClient`.
//!
//! # Design
//! These types are what callers build and inspect. They are decoupled from
//! the GeoServer JSON envelopes in `types`; `mapper` converts between the
//! two. All fields are owned so a defensive copy is a plain `clone()`.

use serde::{Deserialize, Serialize};

/// Configuration record of a single feature type on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureTypeInfo {
    /// Published (display) name.
    pub name: Option<String>,
    /// Name of the type in the underlying data source.
    pub native_name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub srs: Option<String>,
    pub projection_policy: Option<ProjectionPolicy>,
    pub enabled: Option<bool>,
    /// Owning data store. Only used to route requests.
    pub store: Option<StoreRef>,
    pub attributes: Vec<AttributeInfo>,
    pub native_bounding_box: Option<BoundingBox>,
    pub lat_lon_bounding_box: Option<BoundingBox>,
}

impl FeatureTypeInfo {
    /// Descriptor with only the native name set.
    pub fn new(native_name: impl Into<String>) -> Self {
        Self {
            native_name: Some(native_name.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_store(mut self, store: StoreRef) -> Self {
        self.store = Some(store);
        self
    }

    /// Display name, falling back to the native name.
    pub fn effective_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.native_name.as_deref())
    }
}

/// Named pointer to a data store, optionally qualified by its workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRef {
    pub name: String,
    pub workspace: Option<String>,
}

impl StoreRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            workspace: None,
        }
    }

    pub fn qualified(workspace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            workspace: Some(workspace.into()),
        }
    }
}

/// A (name, reference) pair returned by collection listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedLink {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// How the server reconciles native and declared CRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectionPolicy {
    ForceDeclared,
    ReprojectToDeclared,
    KeepNative,
    None,
}

/// A single attribute of a feature type's schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInfo {
    pub name: String,
    pub min_occurs: Option<u32>,
    pub max_occurs: Option<u32>,
    pub nillable: Option<bool>,
    /// Fully qualified Java binding class reported by the server.
    pub binding: Option<String>,
    pub length: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub minx: f64,
    pub maxx: f64,
    pub miny: f64,
    pub maxy: f64,
    /// CRS code such as `EPSG:4326`.
    pub crs: Option<String>,
}
