//! `UpdateResource` manages a subset of an existing Azure resource's
//! properties (Terraform resource `azapi_update_resource`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceParameters<P> {
    #[serde(flatten)]
    pub payload: P,

    /// Whether ignore the casing of the property names in the response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_casing: Option<bool>,

    /// Whether ignore not returned properties like credentials in `body` to
    /// suppress plan-diff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_missing_property: Option<bool>,

    /// A list of ARM resource IDs which are used to avoid create/modify/delete
    /// azapi resources at the same time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locks: Option<Vec<String>>,

    /// Specifies the name of the azure resource. Ignored during late
    /// initialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The ID of the azure resource in which this resource is created. Ignored
    /// during late initialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// The ID of an existing azure resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    /// In a format like `<resource-type>@<api-version>`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceObservation<P> {
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
    pub locks: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

pub mod v1beta1 {
    use kube::CustomResource;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    use super::{UpdateResourceObservation, UpdateResourceParameters};
    use crate::{
        crd::{
            ResourceKind,
            managed::{ManagedResourceSpec, ManagedResourceStatus},
            payload::v1beta1::{RequestPayload, ResponsePayload},
        },
        version::SchemaVersion,
    };

    /// UpdateResource is the Schema for the UpdateResources API. Manages a
    /// subset of an existing azure resource's properties.
    #[derive(CustomResource, Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[kube(
        group = "resources.azapi.upbound.io",
        version = "v1beta1",
        kind = "UpdateResource",
        plural = "updateresources",
        status = "UpdateResourceStatus",
        category = "crossplane",
        category = "managed",
        category = "upjet-azapi",
        derive = "PartialEq"
    )]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateResourceSpec {
        #[serde(flatten)]
        pub managed: ManagedResourceSpec,

        pub for_provider: UpdateResourceParameters<RequestPayload>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub init_provider: Option<UpdateResourceParameters<RequestPayload>>,
    }

    #[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateResourceStatus {
        #[serde(flatten)]
        pub managed: ManagedResourceStatus,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub at_provider: Option<UpdateResourceObservation<ResponsePayload>>,
    }

    versioned_resource!(
        UpdateResource,
        ResourceKind::UpdateResource,
        SchemaVersion::V1Beta1,
        RequestPayload,
        ResponsePayload
    );
}

pub mod v1beta2 {
    use kube::CustomResource;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    use super::{UpdateResourceObservation, UpdateResourceParameters};
    use crate::{
        crd::{
            ResourceKind,
            managed::{ManagedResourceSpec, ManagedResourceStatus},
            payload::v1beta2::{RequestPayload, ResponsePayload},
        },
        version::SchemaVersion,
    };

    /// UpdateResource is the Schema for the UpdateResources API. Manages a
    /// subset of an existing azure resource's properties.
    #[derive(CustomResource, Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[kube(
        group = "resources.azapi.upbound.io",
        version = "v1beta2",
        kind = "UpdateResource",
        plural = "updateresources",
        status = "UpdateResourceStatus",
        category = "crossplane",
        category = "managed",
        category = "upjet-azapi",
        derive = "PartialEq"
    )]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateResourceSpec {
        #[serde(flatten)]
        pub managed: ManagedResourceSpec,

        pub for_provider: UpdateResourceParameters<RequestPayload>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub init_provider: Option<UpdateResourceParameters<RequestPayload>>,
    }

    #[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateResourceStatus {
        #[serde(flatten)]
        pub managed: ManagedResourceStatus,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub at_provider: Option<UpdateResourceObservation<ResponsePayload>>,
    }

    versioned_resource!(
        UpdateResource,
        ResourceKind::UpdateResource,
        SchemaVersion::V1Beta2,
        RequestPayload,
        ResponsePayload
    );
}
