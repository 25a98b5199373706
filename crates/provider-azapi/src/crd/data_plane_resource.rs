//! `DataPlaneResource` manages a resource of an Azure data plane API
//! (Terraform resource `azapi_data_plane_resource`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPlaneResourceParameters<P> {
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

    /// Specifies the name of the data plane resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The ID of the azure resource in which this resource is created, e.g. the
    /// endpoint of an App Configuration store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// In a format like `<resource-type>@<api-version>`, for example
    /// `Microsoft.AppConfiguration/configurationStores/keyValues@1.0`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPlaneResourceObservation<P> {
    #[serde(flatten)]
    pub payload: P,

    /// The ID of the data plane resource.
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

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

pub mod v1beta1 {
    use kube::CustomResource;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    use super::{DataPlaneResourceObservation, DataPlaneResourceParameters};
    use crate::{
        crd::{
            ResourceKind,
            managed::{ManagedResourceSpec, ManagedResourceStatus},
            payload::v1beta1::{RequestPayload, ResponsePayload},
        },
        version::SchemaVersion,
    };

    /// DataPlaneResource is the Schema for the DataPlaneResources API.
    #[derive(CustomResource, Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[kube(
        group = "resources.azapi.upbound.io",
        version = "v1beta1",
        kind = "DataPlaneResource",
        plural = "dataplaneresources",
        status = "DataPlaneResourceStatus",
        category = "crossplane",
        category = "managed",
        category = "upjet-azapi",
        derive = "PartialEq"
    )]
    #[serde(rename_all = "camelCase")]
    pub struct DataPlaneResourceSpec {
        #[serde(flatten)]
        pub managed: ManagedResourceSpec,

        pub for_provider: DataPlaneResourceParameters<RequestPayload>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub init_provider: Option<DataPlaneResourceParameters<RequestPayload>>,
    }

    #[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DataPlaneResourceStatus {
        #[serde(flatten)]
        pub managed: ManagedResourceStatus,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub at_provider: Option<DataPlaneResourceObservation<ResponsePayload>>,
    }

    versioned_resource!(
        DataPlaneResource,
        ResourceKind::DataPlaneResource,
        SchemaVersion::V1Beta1,
        RequestPayload,
        ResponsePayload
    );
}

pub mod v1beta2 {
    use kube::CustomResource;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    use super::{DataPlaneResourceObservation, DataPlaneResourceParameters};
    use crate::{
        crd::{
            ResourceKind,
            managed::{ManagedResourceSpec, ManagedResourceStatus},
            payload::v1beta2::{RequestPayload, ResponsePayload},
        },
        version::SchemaVersion,
    };

    /// DataPlaneResource is the Schema for the DataPlaneResources API.
    #[derive(CustomResource, Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[kube(
        group = "resources.azapi.upbound.io",
        version = "v1beta2",
        kind = "DataPlaneResource",
        plural = "dataplaneresources",
        status = "DataPlaneResourceStatus",
        category = "crossplane",
        category = "managed",
        category = "upjet-azapi",
        derive = "PartialEq"
    )]
    #[serde(rename_all = "camelCase")]
    pub struct DataPlaneResourceSpec {
        #[serde(flatten)]
        pub managed: ManagedResourceSpec,

        pub for_provider: DataPlaneResourceParameters<RequestPayload>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub init_provider: Option<DataPlaneResourceParameters<RequestPayload>>,
    }

    #[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DataPlaneResourceStatus {
        #[serde(flatten)]
        pub managed: ManagedResourceStatus,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub at_provider: Option<DataPlaneResourceObservation<ResponsePayload>>,
    }

    versioned_resource!(
        DataPlaneResource,
        ResourceKind::DataPlaneResource,
        SchemaVersion::V1Beta2,
        RequestPayload,
        ResponsePayload
    );
}
