//! `Resource` manages an arbitrary Azure resource through the ARM API
//! (Terraform resource `azapi_resource`).

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A managed identity assigned to the resource.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// The Type of Identity which should be used for this azure resource.
    /// Possible values are `SystemAssigned`, `UserAssigned` and
    /// `SystemAssigned,UserAssigned`.
    #[serde(rename = "type")]
    pub type_: String,

    /// A list of User Managed Identity ID's which should be assigned to the
    /// azure resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_ids: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceParameters<P> {
    #[serde(flatten)]
    pub payload: P,

    /// Whether ignore the casing of the property names in the response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_casing: Option<bool>,

    /// Whether ignore not returned properties like credentials in `body` to
    /// suppress plan-diff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_missing_property: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Vec<Identity>>,

    /// The location of the azure resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// A list of ARM resource IDs which are used to avoid create/modify/delete
    /// azapi resources at the same time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locks: Option<Vec<String>>,

    /// Specifies the name of the azure resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The ID of the azure resource in which this resource is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Whether enabled the validation on `type` and `body` with embedded schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_validation_enabled: Option<bool>,

    /// A mapping of tags which should be assigned to the azure resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,

    /// In a format like `<resource-type>@<api-version>`, for example
    /// `Microsoft.Storage/storageAccounts@2023-01-01`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceObservation<P> {
    #[serde(flatten)]
    pub payload: P,

    /// The ID of the azure resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_casing: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_missing_property: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Vec<Identity>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locks: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_validation_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

pub mod v1beta1 {
    use kube::CustomResource;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    use super::{ResourceObservation, ResourceParameters};
    use crate::{
        crd::{
            ResourceKind,
            managed::{ManagedResourceSpec, ManagedResourceStatus},
            payload::v1beta1::{RequestPayload, ResponsePayload},
        },
        version::SchemaVersion,
    };

    /// Resource is the Schema for the Resources API. Manages an arbitrary
    /// Azure resource through the ARM API, with the request body encoded as
    /// JSON text.
    #[derive(CustomResource, Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[kube(
        group = "resources.azapi.upbound.io",
        version = "v1beta1",
        kind = "Resource",
        plural = "resources",
        status = "ResourceStatus",
        category = "crossplane",
        category = "managed",
        category = "upjet-azapi",
        derive = "PartialEq"
    )]
    #[serde(rename_all = "camelCase")]
    pub struct ResourceSpec {
        #[serde(flatten)]
        pub managed: ManagedResourceSpec,

        pub for_provider: ResourceParameters<RequestPayload>,

        /// Fields which are merged into `forProvider` when the resource is
        /// created, and are ignored on later updates.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub init_provider: Option<ResourceParameters<RequestPayload>>,
    }

    #[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResourceStatus {
        #[serde(flatten)]
        pub managed: ManagedResourceStatus,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub at_provider: Option<ResourceObservation<ResponsePayload>>,
    }

    versioned_resource!(
        Resource,
        ResourceKind::Resource,
        SchemaVersion::V1Beta1,
        RequestPayload,
        ResponsePayload
    );
}

pub mod v1beta2 {
    use kube::CustomResource;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    use super::{ResourceObservation, ResourceParameters};
    use crate::{
        crd::{
            ResourceKind,
            managed::{ManagedResourceSpec, ManagedResourceStatus},
            payload::v1beta2::{RequestPayload, ResponsePayload},
        },
        version::SchemaVersion,
    };

    /// Resource is the Schema for the Resources API. Manages an arbitrary
    /// Azure resource through the ARM API, with the request body as a
    /// structured JSON value.
    #[derive(CustomResource, Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[kube(
        group = "resources.azapi.upbound.io",
        version = "v1beta2",
        kind = "Resource",
        plural = "resources",
        status = "ResourceStatus",
        category = "crossplane",
        category = "managed",
        category = "upjet-azapi",
        derive = "PartialEq"
    )]
    #[serde(rename_all = "camelCase")]
    pub struct ResourceSpec {
        #[serde(flatten)]
        pub managed: ManagedResourceSpec,

        pub for_provider: ResourceParameters<RequestPayload>,

        /// Fields which are merged into `forProvider` when the resource is
        /// created, and are ignored on later updates.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub init_provider: Option<ResourceParameters<RequestPayload>>,
    }

    #[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResourceStatus {
        #[serde(flatten)]
        pub managed: ManagedResourceStatus,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub at_provider: Option<ResourceObservation<ResponsePayload>>,
    }

    versioned_resource!(
        Resource,
        ResourceKind::Resource,
        SchemaVersion::V1Beta2,
        RequestPayload,
        ResponsePayload
    );
}
