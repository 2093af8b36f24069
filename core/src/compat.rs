//! Input normalization applied before store-scoped writes.
//!
//! GeoServer 2.15.2 fails to create or update a feature type whose
//! `nativeName` is unset, and it does not default the published name from
//! the native one. `ServerCompat` decides how strictly descriptors are
//! checked and patched before they are submitted.

use std::str::FromStr;

use crate::error::ApiError;
use crate::model::FeatureTypeInfo;

/// Server-compatibility mode for pre-submission checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServerCompat {
    /// Require `native_name` and default `name` from it.
    #[default]
    GeoServer215,
    /// Default `name` from `native_name` when possible, require neither.
    Lenient,
}

/// Routing data resolved from a normalized descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    pub store: String,
    pub name: String,
}

impl ServerCompat {
    pub fn requires_native_name(self) -> bool {
        matches!(self, ServerCompat::GeoServer215)
    }

    /// Validate `info` for a write whose store is implied by the descriptor.
    ///
    /// Fails before any request is built. A missing display name is filled
    /// in from the native name on `info` itself.
    pub(crate) fn normalize(self, info: &mut FeatureTypeInfo) -> Result<Target, ApiError> {
        let store = match &info.store {
            Some(store) => store.name.clone(),
            None => return Err(ApiError::Configuration("target store not provided".to_string())),
        };
        if self.requires_native_name() && info.native_name.is_none() {
            return Err(ApiError::Compatibility(
                "GeoServer 2.15.2 requires nativeName to be set".to_string(),
            ));
        }
        if info.name.is_none() {
            info.name = info.native_name.clone();
        }
        let name = info
            .name
            .clone()
            .ok_or_else(|| ApiError::Configuration("feature type name not provided".to_string()))?;
        Ok(Target { store, name })
    }
}

impl FromStr for ServerCompat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2.15" | "geoserver-2.15" => Ok(ServerCompat::GeoServer215),
            "lenient" => Ok(ServerCompat::Lenient),
            other => Err(ApiError::Configuration(format!(
                "unknown server compatibility mode: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StoreRef;

    #[test]
    fn missing_store_is_a_configuration_error() {
        let mut info = FeatureTypeInfo::new("roads");
        let err = ServerCompat::default().normalize(&mut info).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(msg) if msg.contains("target store")));
    }

    #[test]
    fn store_is_checked_before_native_name() {
        let mut info = FeatureTypeInfo::default().with_name("roads");
        let err = ServerCompat::GeoServer215.normalize(&mut info).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn missing_native_name_is_a_compatibility_error() {
        let mut info = FeatureTypeInfo::default()
            .with_name("roads")
            .with_store(StoreRef::new("pg"));
        let err = ServerCompat::GeoServer215.normalize(&mut info).unwrap_err();
        assert!(matches!(err, ApiError::Compatibility(_)));
    }

    #[test]
    fn name_defaults_to_native_name_in_place() {
        let mut info = FeatureTypeInfo::new("roads_v2").with_store(StoreRef::new("pg"));
        let target = ServerCompat::GeoServer215.normalize(&mut info).unwrap();
        assert_eq!(info.name.as_deref(), Some("roads_v2"));
        assert_eq!(
            target,
            Target {
                store: "pg".to_string(),
                name: "roads_v2".to_string()
            }
        );
    }

    #[test]
    fn existing_name_is_kept() {
        let mut info = FeatureTypeInfo::new("roads_v2")
            .with_name("roads")
            .with_store(StoreRef::qualified("topp", "pg"));
        let target = ServerCompat::GeoServer215.normalize(&mut info).unwrap();
        assert_eq!(target.name, "roads");
        assert_eq!(target.store, "pg");
    }

    #[test]
    fn lenient_accepts_missing_native_name() {
        let mut info = FeatureTypeInfo::default()
            .with_name("roads")
            .with_store(StoreRef::new("pg"));
        let target = ServerCompat::Lenient.normalize(&mut info).unwrap();
        assert_eq!(target.name, "roads");
        assert!(info.native_name.is_none());
    }

    #[test]
    fn lenient_still_needs_some_name() {
        let mut info = FeatureTypeInfo::default().with_store(StoreRef::new("pg"));
        let err = ServerCompat::Lenient.normalize(&mut info).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(msg) if msg.contains("name")));
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("2.15".parse::<ServerCompat>().unwrap(), ServerCompat::GeoServer215);
        assert_eq!(" Lenient ".parse::<ServerCompat>().unwrap(), ServerCompat::Lenient);
        assert!("2.99".parse::<ServerCompat>().is_err());
    }
}
