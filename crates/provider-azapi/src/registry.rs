//! Dispatch of conversion requests to the typed converters.
//!
//! The [`ConversionRegistry`] maps `(kind, source version, target version)` to
//! exactly one converter. Converting an object first copies every field of the
//! source into the target, except the type-changing designated fields, and then
//! lets the registered converter fill in those fields. The registry is built
//! once at start-up and is immutable afterwards, so it can be shared between
//! threads behind an [`Arc`](std::sync::Arc).

use std::{collections::HashMap, fmt::Display, str::FromStr};

use kube::core::{
    conversion::{ConversionRequest, ConversionResponse, ConversionReview},
    response::Status,
};
use serde_json::{Map, Value};
use snafu::{OptionExt, ResultExt, Snafu, ensure};
use strum::IntoEnumIterator as _;
use tracing::{debug, instrument, warn};

use crate::{
    conversion::{self, ConversionError, ConversionErrorKind, FieldPath, Section},
    crd::{
        ParseResourceKindError, ResourceKind, VersionedResource, data_plane_resource, resource,
        resource_action, update_resource,
    },
    version::{ParseApiVersionError, SchemaVersion},
};

/// The fields which change their type between the schema versions.
pub const TYPE_CHANGING_FIELDS: [&str; 3] = ["body", "output", "responseExportValues"];

/// The sections below which the [`TYPE_CHANGING_FIELDS`] live.
pub const TYPE_CHANGING_PATH_PREFIXES: [&str; 3] =
    ["spec.forProvider", "spec.initProvider", "status.atProvider"];

/// A typed conversion from `S` into `T`.
pub type ConverterFn<S, T> = fn(&S, &mut T) -> Result<(), ConversionError>;

#[derive(Debug, Snafu)]
pub enum RegistryError {
    #[snafu(display("a converter for {key} is already registered"))]
    DuplicateConverter { key: ConverterKey },

    #[snafu(display("cannot register a converter from kind {from_kind} into kind {to_kind}"))]
    KindMismatch {
        from_kind: ResourceKind,
        to_kind: ResourceKind,
    },

    #[snafu(display("cannot register a converter for {key}, both versions are the same"))]
    SameVersion { key: ConverterKey },
}

#[derive(Debug, Snafu)]
pub enum ConvertObjectError {
    #[snafu(display("failed to parse desired API version"))]
    ParseDesiredApiVersion { source: ParseApiVersionError },

    #[snafu(display("the object is not a JSON object"))]
    NotAnObject,

    #[snafu(display("the field {field:?} is not present"))]
    FieldNotPresent { field: &'static str },

    #[snafu(display("the field {field:?} is not a string"))]
    FieldNotStr { field: &'static str },

    #[snafu(display("failed to parse object kind"))]
    ParseKind { source: ParseResourceKindError },

    #[snafu(display("failed to parse current API version of the object"))]
    ParseCurrentApiVersion { source: ParseApiVersionError },

    #[snafu(display("no converter registered for {key}"))]
    NoConverter { key: ConverterKey },

    #[snafu(display("failed to deserialize object as {kind} {version}"))]
    DeserializeObject {
        source: serde_json::Error,
        kind: ResourceKind,
        version: SchemaVersion,
    },

    #[snafu(display("failed to convert {key}"))]
    ConvertFields {
        source: ConversionError,
        key: ConverterKey,
    },

    #[snafu(display("failed to serialize object as {kind} {version}"))]
    SerializeObject {
        source: serde_json::Error,
        kind: ResourceKind,
        version: SchemaVersion,
    },

    #[snafu(display("failed to write converted field {field} into the object"))]
    WriteField { field: FieldPath },
}

impl ConvertObjectError {
    /// The HTTP status code reported back to the API server.
    ///
    /// Malformed input is reported as `400 Bad Request`, failures which hint at
    /// a problem of the converter itself as `500 Internal Server Error`.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::ParseDesiredApiVersion { .. }
            | Self::NotAnObject
            | Self::FieldNotPresent { .. }
            | Self::FieldNotStr { .. }
            | Self::ParseKind { .. }
            | Self::ParseCurrentApiVersion { .. }
            | Self::DeserializeObject { .. } => 400,
            Self::ConvertFields { source, .. } => match source.kind() {
                ConversionErrorKind::DeserializationFailure => 400,
                ConversionErrorKind::SerializationFailure => 500,
            },
            Self::NoConverter { .. }
            | Self::SerializeObject { .. }
            | Self::WriteField { .. } => 500,
        }
    }

    /// Renders this error and all its sources into one message, separated by
    /// `: `.
    pub fn join_errors(&self) -> String {
        let mut messages = Vec::new();
        let mut current: Option<&dyn std::error::Error> = Some(self);

        while let Some(err) = current {
            messages.push(err.to_string());
            current = err.source();
        }

        messages.join(": ")
    }
}

/// The key a converter is registered under.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ConverterKey {
    pub kind: ResourceKind,
    pub from: SchemaVersion,
    pub to: SchemaVersion,
}

impl ConverterKey {
    pub fn new(kind: ResourceKind, from: SchemaVersion, to: SchemaVersion) -> Self {
        Self { kind, from, to }
    }
}

impl Display for ConverterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} from {} to {}", self.kind, self.from, self.to)
    }
}

/// A converter which operates on untyped objects.
pub trait ObjectConverter: Send + Sync {
    fn key(&self) -> ConverterKey;

    /// Converts the designated fields of `source` into `target`.
    ///
    /// `target` already holds the identity conversion of `source`, see
    /// [`identity_conversion`]. Every other field of `target` is kept as is.
    fn convert(&self, source: &Value, target: &mut Value) -> Result<(), ConvertObjectError>;
}

struct TypedConverter<S, T> {
    convert: ConverterFn<S, T>,
}

impl<S, T> ObjectConverter for TypedConverter<S, T>
where
    S: VersionedResource,
    T: VersionedResource,
{
    fn key(&self) -> ConverterKey {
        ConverterKey::new(S::KIND, S::VERSION, T::VERSION)
    }

    fn convert(&self, source: &Value, target: &mut Value) -> Result<(), ConvertObjectError> {
        let key = self.key();

        let typed_source = S::deserialize(source).context(DeserializeObjectSnafu {
            kind: S::KIND,
            version: S::VERSION,
        })?;
        let mut typed_target = T::deserialize(&*target).context(DeserializeObjectSnafu {
            kind: T::KIND,
            version: T::VERSION,
        })?;

        (self.convert)(&typed_source, &mut typed_target).context(ConvertFieldsSnafu { key })?;

        // Only the designated fields are taken from the typed target, so
        // fields unknown to the typed model survive the conversion.
        let converted = serde_json::to_value(&typed_target).context(SerializeObjectSnafu {
            kind: T::KIND,
            version: T::VERSION,
        })?;

        for section in Section::iter() {
            for field in section.fields() {
                let field = FieldPath::new(section, *field);
                if let Some(value) = converted.pointer(&json_pointer(field)) {
                    write_field(target, field, value.clone())?;
                }
            }
        }

        Ok(())
    }
}

/// Maps `(kind, source version, target version)` to exactly one converter.
#[derive(Default)]
pub struct ConversionRegistry {
    converters: HashMap<ConverterKey, Box<dyn ObjectConverter>>,
}

impl std::fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.converters.keys().map(ToString::to_string).collect();
        keys.sort();

        f.debug_struct("ConversionRegistry")
            .field("converters", &keys)
            .finish()
    }
}

impl ConversionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the converters of all azapi kinds in both
    /// directions.
    pub fn azapi() -> Result<Self, RegistryError> {
        let mut registry = Self::new();

        registry.register_converter::<resource::v1beta1::Resource, resource::v1beta2::Resource>(
            conversion::upgrade,
        )?;
        registry.register_converter::<resource::v1beta2::Resource, resource::v1beta1::Resource>(
            conversion::downgrade,
        )?;

        registry.register_converter::<
            data_plane_resource::v1beta1::DataPlaneResource,
            data_plane_resource::v1beta2::DataPlaneResource,
        >(conversion::upgrade)?;
        registry.register_converter::<
            data_plane_resource::v1beta2::DataPlaneResource,
            data_plane_resource::v1beta1::DataPlaneResource,
        >(conversion::downgrade)?;

        registry.register_converter::<
            resource_action::v1beta1::ResourceAction,
            resource_action::v1beta2::ResourceAction,
        >(conversion::upgrade)?;
        registry.register_converter::<
            resource_action::v1beta2::ResourceAction,
            resource_action::v1beta1::ResourceAction,
        >(conversion::downgrade)?;

        registry.register_converter::<
            update_resource::v1beta1::UpdateResource,
            update_resource::v1beta2::UpdateResource,
        >(conversion::upgrade)?;
        registry.register_converter::<
            update_resource::v1beta2::UpdateResource,
            update_resource::v1beta1::UpdateResource,
        >(conversion::downgrade)?;

        Ok(registry)
    }

    /// Registers the converter from `S` into `T`.
    ///
    /// The key is taken from the kinds and versions of `S` and `T`. Each key
    /// can be registered once.
    pub fn register_converter<S, T>(
        &mut self,
        convert: ConverterFn<S, T>,
    ) -> Result<(), RegistryError>
    where
        S: VersionedResource + 'static,
        T: VersionedResource + 'static,
    {
        ensure!(
            S::KIND == T::KIND,
            KindMismatchSnafu {
                from_kind: S::KIND,
                to_kind: T::KIND,
            }
        );

        let converter = TypedConverter { convert };
        let key = converter.key();
        ensure!(key.from != key.to, SameVersionSnafu { key });
        ensure!(
            !self.converters.contains_key(&key),
            DuplicateConverterSnafu { key }
        );

        debug!(%key, "registered converter");
        self.converters.insert(key, Box::new(converter));

        Ok(())
    }

    /// Returns the converter registered for the given kind and version pair.
    pub fn lookup(
        &self,
        kind: ResourceKind,
        from: SchemaVersion,
        to: SchemaVersion,
    ) -> Option<&dyn ObjectConverter> {
        self.converters
            .get(&ConverterKey::new(kind, from, to))
            .map(|converter| &**converter)
    }

    /// Returns the keys of all registered converters in a stable order.
    pub fn keys(&self) -> Vec<ConverterKey> {
        let mut keys: Vec<_> = self.converters.keys().copied().collect();
        keys.sort_by_key(|key| (key.kind, key.from, key.to));
        keys
    }

    /// Converts one object into `desired_api_version`, which is either a bare
    /// schema version or a full `<group>/<version>` API version.
    ///
    /// Objects which already are in the desired version are returned
    /// unchanged. The source object is never modified.
    pub fn convert_object(
        &self,
        object: Value,
        desired_api_version: &str,
    ) -> Result<Value, ConvertObjectError> {
        let desired_version = SchemaVersion::from_api_version(desired_api_version)
            .context(ParseDesiredApiVersionSnafu)?;

        self.convert_object_to(object, desired_version)
    }

    /// Answers a conversion review of the Kubernetes API server.
    ///
    /// A review without a request is answered with an invalid response and
    /// status code `400`. Otherwise all objects of the request are converted.
    /// The first object which fails to convert fails the whole review, in
    /// which case no converted objects are returned.
    #[instrument(
        skip_all,
        fields(
            k8s.crd.conversion.api_version = review.types.api_version,
            k8s.crd.conversion.kind = review.types.kind,
        )
    )]
    pub fn try_convert(&self, review: ConversionReview) -> ConversionReview {
        let request = match ConversionRequest::from_review(review) {
            Ok(request) => request,
            Err(err) => {
                warn!(?err, "received invalid conversion review");

                let message = err.to_string();
                return ConversionResponse::invalid(
                    Status::failure(&message, &message).with_code(400),
                )
                .into_review();
            }
        };

        // ConversionResponse::for_request cannot be used here, the objects of
        // the request are moved into convert_objects.
        let response = match self.convert_objects(request.objects, &request.desired_api_version) {
            Ok(converted_objects) => {
                debug!(
                    k8s.crd.conversion.converted_object_count = converted_objects.len(),
                    "Successfully converted objects"
                );

                ConversionResponse {
                    result: Status::success(),
                    types: request.types,
                    uid: request.uid,
                    converted_objects,
                }
            }
            Err(err) => {
                let code = err.http_status_code();
                let message = err.join_errors();
                warn!(code, error = %message, "failed to convert objects");

                ConversionResponse {
                    result: Status::failure(&message, &message).with_code(code),
                    types: request.types,
                    uid: request.uid,
                    converted_objects: vec![],
                }
            }
        };

        response.into_review()
    }

    #[instrument(skip_all, err)]
    fn convert_objects(
        &self,
        objects: Vec<Value>,
        desired_api_version: &str,
    ) -> Result<Vec<Value>, ConvertObjectError> {
        let desired_version = SchemaVersion::from_api_version(desired_api_version)
            .context(ParseDesiredApiVersionSnafu)?;

        objects
            .into_iter()
            .map(|object| self.convert_object_to(object, desired_version))
            .collect()
    }

    fn convert_object_to(
        &self,
        object: Value,
        desired_version: SchemaVersion,
    ) -> Result<Value, ConvertObjectError> {
        let kind = string_field(&object, "kind")?;
        let kind = ResourceKind::from_str(kind).context(ParseKindSnafu)?;

        let api_version = string_field(&object, "apiVersion")?;
        let current_version =
            SchemaVersion::from_api_version(api_version).context(ParseCurrentApiVersionSnafu)?;

        // The API server should never ask for this, but converting an object
        // into its own version is a noop.
        if current_version == desired_version {
            return Ok(object);
        }

        let key = ConverterKey::new(kind, current_version, desired_version);
        let converter = self
            .lookup(kind, current_version, desired_version)
            .context(NoConverterSnafu { key })?;

        let mut converted = identity_conversion(&object, desired_version)?;
        converter.convert(&object, &mut converted)?;

        debug!(%key, name = ?object.pointer("/metadata/name"), "converted object");
        Ok(converted)
    }
}

/// Copies `object` into a new object of `desired_version`.
///
/// All fields are copied unchanged, except the [`TYPE_CHANGING_FIELDS`] below
/// each of the [`TYPE_CHANGING_PATH_PREFIXES`], which are left out.
/// `apiVersion` is set to the desired version.
pub fn identity_conversion(
    object: &Value,
    desired_version: SchemaVersion,
) -> Result<Value, ConvertObjectError> {
    let mut target = object.clone();

    let map = target.as_object_mut().context(NotAnObjectSnafu)?;
    map.insert(
        "apiVersion".to_owned(),
        Value::String(desired_version.api_version()),
    );

    for prefix in TYPE_CHANGING_PATH_PREFIXES {
        let pointer = format!("/{}", prefix.replace('.', "/"));
        if let Some(section) = target.pointer_mut(&pointer).and_then(Value::as_object_mut) {
            for field in TYPE_CHANGING_FIELDS {
                section.remove(field);
            }
        }
    }

    Ok(target)
}

fn string_field<'a>(
    object: &'a Value,
    field: &'static str,
) -> Result<&'a str, ConvertObjectError> {
    object
        .get(field)
        .context(FieldNotPresentSnafu { field })?
        .as_str()
        .context(FieldNotStrSnafu { field })
}

fn json_pointer(field: FieldPath) -> String {
    format!(
        "/{}/{}",
        field.section.path().replace('.', "/"),
        field.field.as_str()
    )
}

/// Writes `value` to the location of `field`, creating missing parent objects.
fn write_field(
    object: &mut Value,
    field: FieldPath,
    value: Value,
) -> Result<(), ConvertObjectError> {
    let mut current = object;
    for segment in field.section.path().split('.') {
        current = current
            .as_object_mut()
            .context(WriteFieldSnafu { field })?
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()));
    }

    current
        .as_object_mut()
        .context(WriteFieldSnafu { field })?
        .insert(field.field.as_str().to_owned(), value);

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use indoc::indoc;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::crd::v1beta1;

    fn registry() -> ConversionRegistry {
        ConversionRegistry::azapi().expect("the azapi converters must register")
    }

    fn v1beta1_object() -> Value {
        let yaml = indoc! {r#"
            apiVersion: resources.azapi.upbound.io/v1beta1
            kind: Resource
            metadata:
              name: example-storage
              annotations:
                crossplane.io/external-name: storageaccount
            spec:
              deletionPolicy: Orphan
              forProvider:
                type: Microsoft.Storage/storageAccounts@2023-01-01
                name: storageaccount
                parentId: /subscriptions/0000/resourceGroups/example
                location: westeurope
                body: '{"kind":"StorageV2","sku":{"name":"Standard_LRS"}}'
                responseExportValues:
                  - properties.primaryEndpoints
                  - id
                tags:
                  env: test
              initProvider:
                body: '{"properties":{"isHnsEnabled":true}}'
              providerConfigRef:
                name: default
            status:
              atProvider:
                id: /subscriptions/0000/resourceGroups/example
                output: '{"id":"/subscriptions/0000"}'
              conditions:
                - type: Ready
                  status: "True"
                  reason: Available
                  lastTransitionTime: "2024-01-01T00:00:00Z"
        "#};

        serde_yaml::from_str(yaml).expect("valid YAML object")
    }

    #[test]
    fn azapi_registers_all_kinds_in_both_directions() {
        let registry = registry();

        let keys = registry.keys();
        assert_eq!(keys.len(), 8);

        for kind in ResourceKind::iter() {
            for (from, to) in [
                (SchemaVersion::V1Beta1, SchemaVersion::V1Beta2),
                (SchemaVersion::V1Beta2, SchemaVersion::V1Beta1),
            ] {
                let converter = registry
                    .lookup(kind, from, to)
                    .expect("converter must be registered");
                assert_eq!(converter.key(), ConverterKey::new(kind, from, to));
            }
        }
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = registry();

        let err = registry
            .register_converter::<v1beta1::Resource, crate::crd::v1beta2::Resource>(
                conversion::upgrade,
            )
            .expect_err("the key is already taken");

        assert!(matches!(
            err,
            RegistryError::DuplicateConverter { key }
                if key == ConverterKey::new(
                    ResourceKind::Resource,
                    SchemaVersion::V1Beta1,
                    SchemaVersion::V1Beta2
                )
        ));
    }

    #[test]
    fn kind_mismatch_fails() {
        let mut registry = ConversionRegistry::new();

        let err = registry
            .register_converter::<v1beta1::Resource, crate::crd::v1beta2::UpdateResource>(
                conversion::upgrade,
            )
            .expect_err("kinds differ");

        assert!(matches!(
            err,
            RegistryError::KindMismatch {
                from_kind: ResourceKind::Resource,
                to_kind: ResourceKind::UpdateResource,
            }
        ));
        assert!(registry.keys().is_empty());
    }

    #[test]
    fn lookup_on_empty_registry() {
        let registry = ConversionRegistry::new();
        assert!(
            registry
                .lookup(
                    ResourceKind::Resource,
                    SchemaVersion::V1Beta1,
                    SchemaVersion::V1Beta2
                )
                .is_none()
        );
    }

    #[test]
    fn identity_conversion_strips_designated_fields() {
        let object = v1beta1_object();

        let target = identity_conversion(&object, SchemaVersion::V1Beta2).expect("object");

        assert_eq!(target["apiVersion"], "resources.azapi.upbound.io/v1beta2");
        assert_eq!(target["kind"], "Resource");
        assert_eq!(target["metadata"], object["metadata"]);
        assert_eq!(target["spec"]["deletionPolicy"], "Orphan");
        assert_eq!(target["spec"]["forProvider"]["location"], "westeurope");
        assert_eq!(target["spec"]["forProvider"]["tags"], json!({"env": "test"}));
        assert_eq!(target["status"]["conditions"], object["status"]["conditions"]);

        for prefix in ["/spec/forProvider", "/spec/initProvider", "/status/atProvider"] {
            let section = target.pointer(prefix).expect("section is copied");
            for field in TYPE_CHANGING_FIELDS {
                assert!(section.get(field).is_none(), "{prefix}/{field} must be stripped");
            }
        }

        // The source is left untouched
        assert_eq!(object, v1beta1_object());
    }

    #[test]
    fn convert_object_round_trip() {
        let registry = registry();
        let original = v1beta1_object();

        let upgraded = registry
            .convert_object(original.clone(), "resources.azapi.upbound.io/v1beta2")
            .expect("valid v1beta1 object");

        assert_eq!(upgraded["apiVersion"], "resources.azapi.upbound.io/v1beta2");
        assert_eq!(
            upgraded["spec"]["forProvider"]["body"],
            json!({"kind": "StorageV2", "sku": {"name": "Standard_LRS"}})
        );
        assert_eq!(
            upgraded["spec"]["forProvider"]["responseExportValues"],
            json!(["properties.primaryEndpoints", "id"])
        );
        assert_eq!(
            upgraded["spec"]["initProvider"]["body"],
            json!({"properties": {"isHnsEnabled": true}})
        );
        assert_eq!(
            upgraded["status"]["atProvider"]["output"],
            json!({"id": "/subscriptions/0000"})
        );
        assert!(upgraded["status"]["atProvider"].get("body").is_none());
        assert_eq!(
            upgraded["metadata"]["annotations"]["crossplane.io/external-name"],
            "storageaccount"
        );

        let downgraded = registry
            .convert_object(upgraded, "v1beta1")
            .expect("valid v1beta2 object");
        assert_eq!(downgraded, original);
    }

    #[test]
    fn same_version_is_a_noop() {
        let object = v1beta1_object();

        let converted = registry()
            .convert_object(object.clone(), "resources.azapi.upbound.io/v1beta1")
            .expect("noop conversion");

        assert_eq!(converted, object);
    }

    #[test]
    fn unknown_fields_survive() {
        let mut object = v1beta1_object();
        object["spec"]["forProvider"]["futureField"] = json!({"nested": [1, 2]});

        let upgraded = registry()
            .convert_object(object, "v1beta2")
            .expect("valid v1beta1 object");

        assert_eq!(
            upgraded["spec"]["forProvider"]["futureField"],
            json!({"nested": [1, 2]})
        );
    }

    #[rstest]
    #[case::missing_kind(
        json!({"apiVersion": "resources.azapi.upbound.io/v1beta1"}),
        400,
        "the field \"kind\" is not present"
    )]
    #[case::kind_not_a_string(
        json!({"kind": 1, "apiVersion": "resources.azapi.upbound.io/v1beta1"}),
        400,
        "the field \"kind\" is not a string"
    )]
    #[case::unknown_kind(
        json!({"kind": "Workspace", "apiVersion": "resources.azapi.upbound.io/v1beta1"}),
        400,
        "failed to parse object kind"
    )]
    #[case::foreign_group(
        json!({"kind": "Resource", "apiVersion": "apps/v1beta1"}),
        400,
        "failed to parse current API version of the object"
    )]
    #[case::missing_for_provider(
        json!({
            "kind": "Resource",
            "apiVersion": "resources.azapi.upbound.io/v1beta1",
            "metadata": {"name": "x"},
            "spec": {}
        }),
        400,
        "failed to deserialize object as Resource v1beta1"
    )]
    #[case::invalid_body(
        json!({
            "kind": "Resource",
            "apiVersion": "resources.azapi.upbound.io/v1beta1",
            "metadata": {"name": "x"},
            "spec": {"forProvider": {"body": "{"}}
        }),
        400,
        concat!(
            "failed to convert Resource from v1beta1 to v1beta2: ",
            "failed to deserialize spec.forProvider.body"
        )
    )]
    fn convert_object_errors(
        #[case] object: Value,
        #[case] code: u16,
        #[case] message_prefix: &str,
    ) {
        let err = registry()
            .convert_object(object, "resources.azapi.upbound.io/v1beta2")
            .expect_err("invalid object");

        assert_eq!(err.http_status_code(), code);
        assert!(
            err.join_errors().starts_with(message_prefix),
            "unexpected message {:?}",
            err.join_errors()
        );
    }

    #[test]
    fn missing_converter() {
        let err = ConversionRegistry::new()
            .convert_object(v1beta1_object(), "v1beta2")
            .expect_err("empty registry");

        assert_eq!(err.http_status_code(), 500);
        assert_eq!(
            err.to_string(),
            "no converter registered for Resource from v1beta1 to v1beta2"
        );
    }

    #[test]
    fn non_string_export_values_are_rejected() {
        let object = json!({
            "apiVersion": "resources.azapi.upbound.io/v1beta2",
            "kind": "ResourceAction",
            "metadata": {"name": "restart"},
            "spec": {"forProvider": {"responseExportValues": [1, 2]}}
        });

        let err = registry()
            .convert_object(object, "v1beta1")
            .expect_err("non-string elements");

        assert!(
            matches!(
                &err,
                ConvertObjectError::ConvertFields { source, .. }
                    if source.kind() == ConversionErrorKind::DeserializationFailure
                        && source.field().to_string() == "spec.forProvider.responseExportValues"
            ),
            "unexpected error {err:?}"
        );
        assert_eq!(err.http_status_code(), 400);
    }

    /// Threads sharing one registry don't affect each other: objects with an
    /// invalid `status.atProvider.output` fail on that field, while the other
    /// objects convert their `spec.forProvider.body` as usual.
    #[test]
    fn shared_registry_converts_concurrently() {
        let registry = Arc::new(registry());

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let registry = Arc::clone(&registry);
                    scope.spawn(move || {
                        let mut object = v1beta1_object();
                        object["spec"]["forProvider"]["body"] =
                            Value::String(format!(r#"{{"index":{i}}}"#));
                        object["spec"]["initProvider"]["body"] =
                            Value::String(format!(r#"{{"init":{i}}}"#));
                        if i % 2 == 1 {
                            object["status"]["atProvider"]["output"] =
                                Value::String(r#"{"id":"#.to_owned());
                        }

                        (i, registry.convert_object(object, "v1beta2"))
                    })
                })
                .collect();

            for handle in handles {
                let (i, result) = handle.join().expect("conversion thread must not panic");

                if i % 2 == 1 {
                    let err = result.expect_err("the output is invalid JSON text");
                    assert!(
                        matches!(
                            &err,
                            ConvertObjectError::ConvertFields { source, .. }
                                if source.kind() == ConversionErrorKind::DeserializationFailure
                                    && source.field().to_string() == "status.atProvider.output"
                        ),
                        "unexpected error {err:?}"
                    );
                    continue;
                }

                let upgraded = result.expect("valid object");
                assert_eq!(upgraded["spec"]["forProvider"]["body"], json!({"index": i}));
                assert_eq!(upgraded["spec"]["initProvider"]["body"], json!({"init": i}));
                assert_eq!(
                    upgraded["status"]["atProvider"]["output"],
                    json!({"id": "/subscriptions/0000"})
                );
            }
        });
    }
}
