//! Conversion between the wire DTOs and the domain model.

use crate::model::{AttributeInfo, BoundingBox, FeatureTypeInfo, StoreRef};
use crate::types::{
    AttributeBody, AttributeList, BoundingBoxBody, CrsBody, FeatureTypeBody, FeatureTypeEnvelope,
    KeywordList, StoreLink,
};

/// Map a feature type received from the server into the domain model.
pub fn to_domain(body: FeatureTypeBody) -> FeatureTypeInfo {
    FeatureTypeInfo {
        name: body.name,
        native_name: body.native_name,
        title: body.title,
        description: body.abstract_,
        keywords: body.keywords.map(|k| k.string).unwrap_or_default(),
        srs: body.srs,
        projection_policy: body.projection_policy,
        enabled: body.enabled,
        store: body.store.map(store_ref),
        attributes: body
            .attributes
            .map(|list| list.attribute.into_iter().map(attribute_info).collect())
            .unwrap_or_default(),
        native_bounding_box: body.native_bounding_box.map(bounding_box),
        lat_lon_bounding_box: body.lat_lon_bounding_box.map(bounding_box),
    }
}

/// Build the request envelope for a domain descriptor.
pub fn to_envelope(info: &FeatureTypeInfo) -> FeatureTypeEnvelope {
    FeatureTypeEnvelope {
        feature_type: to_wire(info),
    }
}

pub fn to_wire(info: &FeatureTypeInfo) -> FeatureTypeBody {
    FeatureTypeBody {
        name: info.name.clone(),
        native_name: info.native_name.clone(),
        title: info.title.clone(),
        abstract_: info.description.clone(),
        keywords: (!info.keywords.is_empty()).then(|| KeywordList {
            string: info.keywords.clone(),
        }),
        srs: info.srs.clone(),
        projection_policy: info.projection_policy,
        enabled: info.enabled,
        store: info.store.as_ref().map(store_link),
        attributes: (!info.attributes.is_empty()).then(|| AttributeList {
            attribute: info.attributes.iter().map(attribute_body).collect(),
        }),
        native_bounding_box: info.native_bounding_box.as_ref().map(bounding_box_body),
        lat_lon_bounding_box: info.lat_lon_bounding_box.as_ref().map(bounding_box_body),
    }
}

/// Split a `workspace:store` qualified name.
fn store_ref(link: StoreLink) -> StoreRef {
    match link.name.split_once(':') {
        Some((workspace, name)) => StoreRef::qualified(workspace, name),
        None => StoreRef::new(link.name),
    }
}

fn store_link(store: &StoreRef) -> StoreLink {
    let name = match &store.workspace {
        Some(workspace) => format!("{workspace}:{}", store.name),
        None => store.name.clone(),
    };
    StoreLink {
        class: Some("dataStore".to_string()),
        name,
        href: None,
    }
}

fn attribute_info(body: AttributeBody) -> AttributeInfo {
    AttributeInfo {
        name: body.name,
        min_occurs: body.min_occurs,
        max_occurs: body.max_occurs,
        nillable: body.nillable,
        binding: body.binding,
        length: body.length,
    }
}

fn attribute_body(info: &AttributeInfo) -> AttributeBody {
    AttributeBody {
        name: info.name.clone(),
        min_occurs: info.min_occurs,
        max_occurs: info.max_occurs,
        nillable: info.nillable,
        binding: info.binding.clone(),
        length: info.length,
    }
}

fn bounding_box(body: BoundingBoxBody) -> BoundingBox {
    BoundingBox {
        minx: body.minx,
        maxx: body.maxx,
        miny: body.miny,
        maxy: body.maxy,
        crs: body.crs.map(|crs| match crs {
            CrsBody::Code(code) | CrsBody::Tagged { code, .. } => code,
        }),
    }
}

fn bounding_box_body(bbox: &BoundingBox) -> BoundingBoxBody {
    BoundingBoxBody {
        minx: bbox.minx,
        maxx: bbox.maxx,
        miny: bbox.miny,
        maxy: bbox.maxy,
        crs: bbox.crs.clone().map(CrsBody::Code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectionPolicy;

    const SERVER_FEATURE_TYPE: &str = r#"{
        "featureType": {
            "name": "roads",
            "nativeName": "roads_v2",
            "title": "Roads",
            "abstract": "Road network",
            "keywords": {"string": ["roads", "features"]},
            "srs": "EPSG:4326",
            "projectionPolicy": "FORCE_DECLARED",
            "enabled": true,
            "store": {"@class": "dataStore", "name": "topp:pg", "href": "http://localhost/rest/workspaces/topp/datastores/pg.json"},
            "attributes": {"attribute": [
                {"name": "the_geom", "minOccurs": 0, "maxOccurs": 1, "nillable": true, "binding": "org.locationtech.jts.geom.MultiLineString"},
                {"name": "label", "minOccurs": 0, "maxOccurs": 1, "nillable": true, "binding": "java.lang.String", "length": 80}
            ]},
            "nativeBoundingBox": {"minx": -10.0, "maxx": 10.0, "miny": -5.0, "maxy": 5.0, "crs": {"@class": "projected", "$": "EPSG:3857"}},
            "latLonBoundingBox": {"minx": -1.0, "maxx": 1.0, "miny": -0.5, "maxy": 0.5, "crs": "EPSG:4326"}
        }
    }"#;

    #[test]
    fn maps_full_server_representation() {
        let envelope: FeatureTypeEnvelope = serde_json::from_str(SERVER_FEATURE_TYPE).unwrap();
        let info = to_domain(envelope.feature_type);

        assert_eq!(info.name.as_deref(), Some("roads"));
        assert_eq!(info.native_name.as_deref(), Some("roads_v2"));
        assert_eq!(info.description.as_deref(), Some("Road network"));
        assert_eq!(info.keywords, vec!["roads", "features"]);
        assert_eq!(info.projection_policy, Some(ProjectionPolicy::ForceDeclared));
        assert_eq!(info.store, Some(StoreRef::qualified("topp", "pg")));
        assert_eq!(info.attributes.len(), 2);
        assert_eq!(info.attributes[1].length, Some(80));
        assert_eq!(
            info.native_bounding_box.unwrap().crs.as_deref(),
            Some("EPSG:3857")
        );
        assert_eq!(
            info.lat_lon_bounding_box.unwrap().crs.as_deref(),
            Some("EPSG:4326")
        );
    }

    #[test]
    fn unqualified_store_name_has_no_workspace() {
        let body = FeatureTypeBody {
            store: Some(StoreLink {
                class: None,
                name: "pg".to_string(),
                href: None,
            }),
            ..FeatureTypeBody::default()
        };
        assert_eq!(to_domain(body).store, Some(StoreRef::new("pg")));
    }

    #[test]
    fn request_body_joins_qualified_store_name() {
        let info = FeatureTypeInfo::new("roads").with_store(StoreRef::qualified("topp", "pg"));
        let json = serde_json::to_value(to_envelope(&info)).unwrap();
        assert_eq!(json["featureType"]["store"]["name"], "topp:pg");
        assert_eq!(json["featureType"]["store"]["@class"], "dataStore");
    }

    #[test]
    fn request_body_skips_empty_collections() {
        let json = serde_json::to_value(to_envelope(&FeatureTypeInfo::new("roads"))).unwrap();
        let body = json["featureType"].as_object().unwrap();
        assert!(!body.contains_key("keywords"));
        assert!(!body.contains_key("attributes"));
        assert!(!body.contains_key("store"));
    }
}
