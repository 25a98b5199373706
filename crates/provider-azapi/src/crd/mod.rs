//! Custom resource definitions of the `resources.azapi.upbound.io` API group.
//!
//! Every kind lives in its own module, which contains one submodule per
//! schema version (`v1beta1` and `v1beta2`). The fields which are identical
//! between versions are declared once and are generic over the payload type,
//! which is the only part that differs, see [`payload`].

use std::str::FromStr;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{CustomResourceExt as _, core::crd::MergeError};
use serde::{Serialize, de::DeserializeOwned};
use snafu::Snafu;
use strum::{EnumIter, IntoStaticStr};

use crate::{crd::managed::ManagedResource, version::SchemaVersion};

/// The API group all azapi kinds are served in.
pub const GROUP: &str = "resources.azapi.upbound.io";

/// Implements [`ManagedResource`] and [`VersionedResource`] for a custom
/// resource, given its kind, version and payload types.
macro_rules! versioned_resource {
    ($object:ty, $kind:expr, $version:expr, $request:ty, $response:ty) => {
        impl $crate::crd::managed::ManagedResource for $object {
            fn managed_spec(&self) -> &$crate::crd::managed::ManagedResourceSpec {
                &self.spec.managed
            }

            fn managed_spec_mut(&mut self) -> &mut $crate::crd::managed::ManagedResourceSpec {
                &mut self.spec.managed
            }

            fn managed_status(&self) -> Option<&$crate::crd::managed::ManagedResourceStatus> {
                self.status.as_ref().map(|status| &status.managed)
            }

            fn managed_status_mut(&mut self) -> &mut $crate::crd::managed::ManagedResourceStatus {
                &mut self.status.get_or_insert_with(Default::default).managed
            }
        }

        impl $crate::crd::VersionedResource for $object {
            type Request = $request;
            type Response = $response;

            const KIND: $crate::crd::ResourceKind = $kind;
            const VERSION: $crate::version::SchemaVersion = $version;

            fn for_provider(&self) -> &Self::Request {
                &self.spec.for_provider.payload
            }

            fn for_provider_mut(&mut self) -> &mut Self::Request {
                &mut self.spec.for_provider.payload
            }

            fn init_provider(&self) -> Option<&Self::Request> {
                self.spec.init_provider.as_ref().map(|init| &init.payload)
            }

            fn init_provider_mut(&mut self) -> &mut Self::Request {
                &mut self
                    .spec
                    .init_provider
                    .get_or_insert_with(Default::default)
                    .payload
            }

            fn at_provider(&self) -> Option<&Self::Response> {
                self.status
                    .as_ref()
                    .and_then(|status| status.at_provider.as_ref())
                    .map(|observation| &observation.payload)
            }

            fn at_provider_mut(&mut self) -> &mut Self::Response {
                &mut self
                    .status
                    .get_or_insert_with(Default::default)
                    .at_provider
                    .get_or_insert_with(Default::default)
                    .payload
            }
        }
    };
}

pub mod data_plane_resource;
pub mod managed;
pub mod payload;
pub mod resource;
pub mod resource_action;
pub mod update_resource;

pub use data_plane_resource::DataPlaneResourceParameters;
pub use resource::ResourceParameters;
pub use resource_action::ResourceActionParameters;
pub use update_resource::UpdateResourceParameters;

// Group all v1beta1 items in one module.
pub mod v1beta1 {
    pub use super::{
        data_plane_resource::v1beta1::*, payload::v1beta1::*, resource::v1beta1::*,
        resource_action::v1beta1::*, update_resource::v1beta1::*,
    };
}

// Group all v1beta2 items in one module.
pub mod v1beta2 {
    pub use super::{
        data_plane_resource::v1beta2::*, payload::v1beta2::*, resource::v1beta2::*,
        resource_action::v1beta2::*, update_resource::v1beta2::*,
    };
}

/// A custom resource of one azapi kind in one schema version.
///
/// The associated payload types expose the designated fields of the three
/// sections: `spec.forProvider`, `spec.initProvider` and `status.atProvider`.
pub trait VersionedResource: ManagedResource + Serialize + DeserializeOwned {
    /// The designated fields of `spec.forProvider` and `spec.initProvider`.
    type Request: Default;

    /// The designated fields of `status.atProvider`.
    type Response: Default;

    const KIND: ResourceKind;
    const VERSION: SchemaVersion;

    fn for_provider(&self) -> &Self::Request;
    fn for_provider_mut(&mut self) -> &mut Self::Request;

    fn init_provider(&self) -> Option<&Self::Request>;

    /// Returns the `initProvider` payload, creating an empty `initProvider` if
    /// the resource has none yet.
    fn init_provider_mut(&mut self) -> &mut Self::Request;

    fn at_provider(&self) -> Option<&Self::Response>;

    /// Returns the `atProvider` payload, creating an empty status and
    /// `atProvider` if the resource has none yet.
    fn at_provider_mut(&mut self) -> &mut Self::Response;
}

#[derive(Debug, Eq, PartialEq, Snafu)]
#[snafu(display("unknown kind {input:?} in group {GROUP:?}"))]
pub struct ParseResourceKindError {
    input: String,
}

/// The kinds served by the provider.
#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, IntoStaticStr, Ord, PartialEq, PartialOrd)]
pub enum ResourceKind {
    Resource,
    DataPlaneResource,
    ResourceAction,
    UpdateResource,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// The name of the Terraform resource backing this kind.
    pub fn terraform_name(&self) -> &'static str {
        match self {
            Self::Resource => "azapi_resource",
            Self::DataPlaneResource => "azapi_data_plane_resource",
            Self::ResourceAction => "azapi_resource_action",
            Self::UpdateResource => "azapi_update_resource",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Self::Resource => "resources",
            Self::DataPlaneResource => "dataplaneresources",
            Self::ResourceAction => "resourceactions",
            Self::UpdateResource => "updateresources",
        }
    }

    /// Returns the CRDs of all served versions of this kind, oldest first.
    pub fn crds(&self) -> Vec<CustomResourceDefinition> {
        match self {
            Self::Resource => vec![
                resource::v1beta1::Resource::crd(),
                resource::v1beta2::Resource::crd(),
            ],
            Self::DataPlaneResource => vec![
                data_plane_resource::v1beta1::DataPlaneResource::crd(),
                data_plane_resource::v1beta2::DataPlaneResource::crd(),
            ],
            Self::ResourceAction => vec![
                resource_action::v1beta1::ResourceAction::crd(),
                resource_action::v1beta2::ResourceAction::crd(),
            ],
            Self::UpdateResource => vec![
                update_resource::v1beta1::UpdateResource::crd(),
                update_resource::v1beta2::UpdateResource::crd(),
            ],
        }
    }

    /// Generates a merged CRD containing all versions and marking
    /// `stored_version` as stored.
    pub fn merged_crd(
        &self,
        stored_version: SchemaVersion,
    ) -> Result<CustomResourceDefinition, MergeError> {
        kube::core::crd::merge_crds(self.crds(), stored_version.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ParseResourceKindError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "Resource" => Ok(Self::Resource),
            "DataPlaneResource" => Ok(Self::DataPlaneResource),
            "ResourceAction" => Ok(Self::ResourceAction),
            "UpdateResource" => Ok(Self::UpdateResource),
            _ => ParseResourceKindSnafu { input }.fail(),
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator as _;

    use super::*;
    use crate::version::STORAGE_VERSION;

    #[rstest]
    #[case("Resource", ResourceKind::Resource)]
    #[case("DataPlaneResource", ResourceKind::DataPlaneResource)]
    #[case("ResourceAction", ResourceKind::ResourceAction)]
    #[case("UpdateResource", ResourceKind::UpdateResource)]
    fn parse_kind(#[case] input: &str, #[case] expected: ResourceKind) {
        let kind = ResourceKind::from_str(input).expect("known kind");
        assert_eq!(kind, expected);
        assert_eq!(kind.to_string(), input);
    }

    #[test]
    fn parse_unknown_kind() {
        let err = ResourceKind::from_str("resource").expect_err("kinds are case sensitive");
        assert_eq!(
            err,
            ParseResourceKindError {
                input: "resource".to_owned()
            }
        );
    }

    #[test]
    fn merged_crds_store_v1beta1() {
        for kind in ResourceKind::iter() {
            let crd = kind
                .merged_crd(STORAGE_VERSION)
                .expect("both versions of a kind must be mergeable");

            assert_eq!(crd.spec.group, GROUP);
            assert_eq!(crd.spec.names.kind, kind.as_str());
            assert_eq!(crd.spec.names.plural, kind.plural());
            assert_eq!(crd.spec.scope, "Cluster");

            let versions: Vec<_> = crd
                .spec
                .versions
                .iter()
                .map(|v| (v.name.as_str(), v.served, v.storage))
                .collect();
            assert_eq!(
                versions,
                vec![("v1beta1", true, true), ("v1beta2", true, false)]
            );
        }
    }
}
