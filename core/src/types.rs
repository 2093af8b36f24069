//! Wire DTOs for the GeoServer REST feature-type endpoints.
//!
//! # Design
//! These mirror the JSON GeoServer emits and accepts, envelopes included.
//! They are defined independently from the mock-server crate; the
//! integration tests catch schema drift between the two.

use serde::{Deserialize, Serialize};

use crate::model::{NamedLink, ProjectionPolicy};

/// `{"featureType": {...}}` envelope used for request and response bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureTypeEnvelope {
    #[serde(rename = "featureType")]
    pub feature_type: FeatureTypeBody,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureTypeBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<KeywordList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection_policy: Option<ProjectionPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_bounding_box: Option<BoundingBoxBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat_lon_bounding_box: Option<BoundingBoxBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordList {
    #[serde(default)]
    pub string: Vec<String>,
}

/// Store reference as GeoServer encodes it; `name` is `workspace:store`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreLink {
    #[serde(rename = "@class", default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeList {
    #[serde(default)]
    pub attribute: Vec<AttributeBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeBody {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_occurs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_occurs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nillable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundingBoxBody {
    pub minx: f64,
    pub maxx: f64,
    pub miny: f64,
    pub maxy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<CrsBody>,
}

/// GeoServer writes a CRS either as a bare code or as a tagged object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CrsBody {
    Code(String),
    Tagged {
        #[serde(rename = "@class", default, skip_serializing_if = "Option::is_none")]
        class: Option<String>,
        #[serde(rename = "$")]
        code: String,
    },
}

/// Response of the store-scoped listing endpoint.
///
/// An empty collection comes back as `{"featureTypes": ""}`, which does not
/// decode into this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureTypeList {
    #[serde(rename = "featureTypes", default)]
    pub feature_types: Option<FeatureTypesListWrapper>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureTypesListWrapper {
    #[serde(rename = "featureType", default)]
    pub feature_type: Option<Vec<NamedLink>>,
}
