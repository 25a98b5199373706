//! The designated fields, which change their encoding between the schema
//! versions. Each kind flattens the request payload into `forProvider` and
//! `initProvider`, and the response payload into `atProvider`.

pub mod v1beta1 {
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestPayload {
        /// A JSON object that contains the request body.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub body: Option<String>,

        /// A list of paths that need to be exported from the response body.
        /// Setting it to `["*"]` will export the full response body.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub response_export_values: Option<Vec<String>>,
    }

    #[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponsePayload {
        /// A JSON object that contains the request body.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub body: Option<String>,

        /// The output JSON containing the properties specified in
        /// `responseExportValues`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub output: Option<String>,

        /// A list of paths that need to be exported from the response body.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub response_export_values: Option<Vec<String>>,
    }
}

pub mod v1beta2 {
    use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::JSON;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestPayload {
        /// A dynamic attribute that contains the request body.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub body: Option<JSON>,

        /// The attribute can accept either a list or a map of paths that need to
        /// be exported from the response body.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub response_export_values: Option<JSON>,
    }

    #[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponsePayload {
        /// A dynamic attribute that contains the request body.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub body: Option<JSON>,

        /// The output object containing the properties specified in
        /// `responseExportValues`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub output: Option<JSON>,

        /// The attribute can accept either a list or a map of paths that need to
        /// be exported from the response body.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub response_export_values: Option<JSON>,
    }
}
