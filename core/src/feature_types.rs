//! Create, update and lookup operations over a workspace's feature types.
//!
//! # Design
//! Every method is a short sequence: normalize the input, execute one
//! request, optionally read the resource back, map the response into the
//! domain model. Store references the server would trip over are dropped
//! from an owned copy so the caller's descriptor is never touched; the
//! display-name default applied by [`FeatureTypesClient::create`] and
//! [`FeatureTypesClient::update`] is the one in-place change, which is why
//! those take `&mut FeatureTypeInfo`.

use std::borrow::Cow;

use crate::api::FeatureTypesApi;
use crate::client::GeoServerClient;
use crate::error::ApiError;
use crate::mapper;
use crate::model::{FeatureTypeInfo, NamedLink};

/// Feature-type operations of a [`GeoServerClient`].
#[derive(Debug, Clone, Copy)]
pub struct FeatureTypesClient<'a> {
    client: &'a GeoServerClient,
}

impl<'a> FeatureTypesClient<'a> {
    pub(crate) fn new(client: &'a GeoServerClient) -> Self {
        Self { client }
    }

    fn api(&self) -> &'a FeatureTypesApi {
        self.client.feature_types_api()
    }

    /// Create a feature type on the workspace's default store.
    ///
    /// If `info` names a store, the payload sent to the server has it
    /// removed so the server resolves the default store; `info` itself is
    /// left untouched. The created resource is read back through the
    /// default-store endpoint, and a missing resource is an error.
    pub fn create_on_default_store(
        &self,
        workspace: &str,
        info: &FeatureTypeInfo,
    ) -> Result<FeatureTypeInfo, ApiError> {
        let name = required_name(info)?.to_string();
        let submitted = match &info.store {
            Some(store) => {
                tracing::info!(
                    store = %store.name,
                    workspace,
                    "unsetting feature type store so the server creates it on the workspace default store"
                );
                Cow::Owned(without_store(info))
            }
            None => Cow::Borrowed(info),
        };

        let request = self
            .api()
            .build_create_on_default_store(workspace, &mapper::to_envelope(&submitted))?;
        self.api().parse_created(self.client.execute(request)?)?;

        let request = self.api().build_get_by_default_store(workspace, &name, true);
        let envelope = self.api().parse_feature_type(self.client.execute(request)?)?;
        Ok(mapper::to_domain(envelope.feature_type))
    }

    /// Create a feature type on `store_name`.
    ///
    /// A store reference on `info` naming a different store is removed from
    /// the submitted copy so the server honors `store_name`.
    pub fn create_on_store(
        &self,
        workspace: &str,
        store_name: &str,
        info: &FeatureTypeInfo,
    ) -> Result<FeatureTypeInfo, ApiError> {
        let name = required_name(info)?.to_string();
        let submitted = match &info.store {
            Some(store) if store.name != store_name => {
                tracing::info!(
                    store = %store.name,
                    requested = store_name,
                    "unsetting feature type store so the server creates it on the requested store"
                );
                Cow::Owned(without_store(info))
            }
            _ => Cow::Borrowed(info),
        };

        let request = self
            .api()
            .build_create_on_store(workspace, store_name, &mapper::to_envelope(&submitted))?;
        self.api().parse_created(self.client.execute(request)?)?;

        self.get_feature_type(workspace, store_name, &name)?
            .ok_or(ApiError::NotFound)
    }

    /// Create a feature type on the store referenced by `info`.
    ///
    /// `info` must carry a store reference, and under
    /// [`ServerCompat::GeoServer215`](crate::ServerCompat::GeoServer215) a
    /// native name. An unset `info.name` is set to the native name.
    pub fn create(&self, workspace: &str, info: &mut FeatureTypeInfo) -> Result<FeatureTypeInfo, ApiError> {
        let target = self.client.compat().normalize(info)?;

        let request = self
            .api()
            .build_create_on_store(workspace, &target.store, &mapper::to_envelope(info))?;
        self.api().parse_created(self.client.execute(request)?)?;

        self.get_feature_type(workspace, &target.store, &target.name)?
            .ok_or(ApiError::NotFound)
    }

    /// Replace the feature type currently named `current_name`.
    ///
    /// Same preconditions and name defaulting as [`create`](Self::create).
    /// No derived properties are recalculated.
    pub fn update(
        &self,
        workspace: &str,
        current_name: &str,
        info: &mut FeatureTypeInfo,
    ) -> Result<FeatureTypeInfo, ApiError> {
        let target = self.client.compat().normalize(info)?;

        let request = self.api().build_modify(
            workspace,
            &target.store,
            current_name,
            &mapper::to_envelope(info),
            &[],
        )?;
        self.api().parse_modified(self.client.execute(request)?)?;

        self.get_feature_type(workspace, &target.store, &target.name)?
            .ok_or(ApiError::NotFound)
    }

    /// Look up a feature type; `Ok(None)` when the server reports 404.
    pub fn get_feature_type(
        &self,
        workspace: &str,
        store: &str,
        name: &str,
    ) -> Result<Option<FeatureTypeInfo>, ApiError> {
        let request = self.api().build_get(workspace, store, name, true);
        match self
            .client
            .execute(request)
            .and_then(|response| self.api().parse_feature_type(response))
        {
            Ok(envelope) => Ok(Some(mapper::to_domain(envelope.feature_type))),
            Err(ApiError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// List the feature types published on a store, in server order.
    ///
    /// GeoServer encodes an empty collection in a shape that does not decode
    /// as a listing, so any failure of the listing call is logged and
    /// reported as an empty list. This also hides unknown stores, server
    /// errors and connection failures.
    pub fn find_feature_types(&self, workspace: &str, store_name: &str) -> Result<Vec<NamedLink>, ApiError> {
        let request = self.api().build_list_by_store(workspace, store_name, None, true);
        let list = match self
            .client
            .execute(request)
            .and_then(|response| self.api().parse_list(response))
        {
            Ok(list) => list,
            Err(err) => {
                tracing::debug!(
                    workspace,
                    store = store_name,
                    error = %err,
                    "got api error due to geoserver incompatible encoding of empty lists"
                );
                return Ok(Vec::new());
            }
        };
        Ok(list
            .feature_types
            .and_then(|wrapper| wrapper.feature_type)
            .unwrap_or_default())
    }

    /// Delete a feature type; `Ok(false)` when it did not exist.
    ///
    /// With `recurse` the server also removes the layers publishing it.
    pub fn delete(&self, workspace: &str, store: &str, name: &str, recurse: bool) -> Result<bool, ApiError> {
        let request = self.api().build_delete(workspace, store, name, recurse);
        match self
            .client
            .execute(request)
            .and_then(|response| self.api().parse_deleted(response))
        {
            Ok(()) => Ok(true),
            Err(ApiError::NotFound) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

fn required_name(info: &FeatureTypeInfo) -> Result<&str, ApiError> {
    info.effective_name()
        .ok_or_else(|| ApiError::Configuration("feature type name not provided".to_string()))
}

fn without_store(info: &FeatureTypeInfo) -> FeatureTypeInfo {
    let mut copy = info.clone();
    copy.store = None;
    copy
}
