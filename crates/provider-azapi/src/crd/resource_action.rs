//! `ResourceAction` performs an action on an existing Azure resource
//! (Terraform resource `azapi_resource_action`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceActionParameters<P> {
    #[serde(flatten)]
    pub payload: P,

    /// The name of the resource action. It's also possible to make HTTP
    /// requests towards the resource ID if this field is left empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// A list of ARM resource IDs which are used to avoid modify azapi
    /// resources at the same time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locks: Option<Vec<String>>,

    /// Specifies the HTTP method of the azure resource action. Allowed values
    /// are `POST`, `PATCH`, `PUT` and `DELETE`. Defaults to `POST`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// The ID of an existing azure resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    /// In a format like `<resource-type>@<api-version>`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// When to perform the action, value must be one of `apply` or `destroy`.
    /// Defaults to `apply`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceActionObservation<P> {
    #[serde(flatten)]
    pub payload: P,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// The ID of the azure resource action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locks: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
}

pub mod v1beta1 {
    use kube::CustomResource;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    use super::{ResourceActionObservation, ResourceActionParameters};
    use crate::{
        crd::{
            ResourceKind,
            managed::{ManagedResourceSpec, ManagedResourceStatus},
            payload::v1beta1::{RequestPayload, ResponsePayload},
        },
        version::SchemaVersion,
    };

    /// ResourceAction is the Schema for the ResourceActions API. Performs a
    /// resource action which changes an existing resource's state.
    #[derive(CustomResource, Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[kube(
        group = "resources.azapi.upbound.io",
        version = "v1beta1",
        kind = "ResourceAction",
        plural = "resourceactions",
        status = "ResourceActionStatus",
        category = "crossplane",
        category = "managed",
        category = "upjet-azapi",
        derive = "PartialEq"
    )]
    #[serde(rename_all = "camelCase")]
    pub struct ResourceActionSpec {
        #[serde(flatten)]
        pub managed: ManagedResourceSpec,

        pub for_provider: ResourceActionParameters<RequestPayload>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub init_provider: Option<ResourceActionParameters<RequestPayload>>,
    }

    #[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResourceActionStatus {
        #[serde(flatten)]
        pub managed: ManagedResourceStatus,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub at_provider: Option<ResourceActionObservation<ResponsePayload>>,
    }

    versioned_resource!(
        ResourceAction,
        ResourceKind::ResourceAction,
        SchemaVersion::V1Beta1,
        RequestPayload,
        ResponsePayload
    );
}

pub mod v1beta2 {
    use kube::CustomResource;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    use super::{ResourceActionObservation, ResourceActionParameters};
    use crate::{
        crd::{
            ResourceKind,
            managed::{ManagedResourceSpec, ManagedResourceStatus},
            payload::v1beta2::{RequestPayload, ResponsePayload},
        },
        version::SchemaVersion,
    };

    /// ResourceAction is the Schema for the ResourceActions API. Performs a
    /// resource action which changes an existing resource's state.
    #[derive(CustomResource, Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[kube(
        group = "resources.azapi.upbound.io",
        version = "v1beta2",
        kind = "ResourceAction",
        plural = "resourceactions",
        status = "ResourceActionStatus",
        category = "crossplane",
        category = "managed",
        category = "upjet-azapi",
        derive = "PartialEq"
    )]
    #[serde(rename_all = "camelCase")]
    pub struct ResourceActionSpec {
        #[serde(flatten)]
        pub managed: ManagedResourceSpec,

        pub for_provider: ResourceActionParameters<RequestPayload>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub init_provider: Option<ResourceActionParameters<RequestPayload>>,
    }

    #[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResourceActionStatus {
        #[serde(flatten)]
        pub managed: ManagedResourceStatus,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub at_provider: Option<ResourceActionObservation<ResponsePayload>>,
    }

    versioned_resource!(
        ResourceAction,
        ResourceKind::ResourceAction,
        SchemaVersion::V1Beta2,
        RequestPayload,
        ResponsePayload
    );
}
