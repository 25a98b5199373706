use std::{io::Read as _, path::PathBuf};

use provider_azapi::{
    registry::{ConversionRegistry, ConvertObjectError, RegistryError},
    yaml::{self, SerializeOptions, YamlSchema as _},
};
use serde_json::Value;
use snafu::{ResultExt, Snafu};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to read object from {path}", path = path.display()))]
    ReadFile {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to read object from stdin"))]
    ReadStdin { source: std::io::Error },

    #[snafu(display("failed to parse object as YAML or JSON"))]
    ParseObject { source: serde_yaml::Error },

    #[snafu(display("failed to build conversion registry"))]
    BuildRegistry { source: RegistryError },

    #[snafu(display("failed to convert object to {api_version:?}"))]
    ConvertObject {
        source: ConvertObjectError,
        api_version: String,
    },

    #[snafu(display("failed to print converted object"))]
    PrintObject { source: yaml::Error },
}

#[derive(Debug, clap::Args)]
pub struct ConvertArguments {
    /// The desired API version, either `v1beta2` or the full
    /// `resources.azapi.upbound.io/v1beta2`.
    #[arg(long)]
    pub to: String,

    /// YAML or JSON file containing the object. Read from stdin if not set.
    pub file: Option<PathBuf>,
}

pub fn run(arguments: &ConvertArguments) -> Result<(), Error> {
    let input = match &arguments.file {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|_| ReadFileSnafu { path: path.clone() })?
        }
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context(ReadStdinSnafu)?;
            input
        }
    };

    let converted = convert(&input, &arguments.to)?;
    converted
        .print_yaml(SerializeOptions::default())
        .context(PrintObjectSnafu)
}

/// Parses `input` (YAML, and thereby also JSON) and converts it into
/// `api_version`.
pub fn convert(input: &str, api_version: &str) -> Result<Value, Error> {
    let object: Value = serde_yaml::from_str(input).context(ParseObjectSnafu)?;
    let registry = ConversionRegistry::azapi().context(BuildRegistrySnafu)?;

    registry
        .convert_object(object, api_version)
        .context(ConvertObjectSnafu { api_version })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    const V1BETA1_OBJECT: &str = r#"
apiVersion: resources.azapi.upbound.io/v1beta1
kind: UpdateResource
metadata:
  name: enable-https
spec:
  forProvider:
    type: Microsoft.Web/sites@2022-09-01
    resourceId: /subscriptions/0/resourceGroups/example/providers/Microsoft.Web/sites/app
    body: '{"properties":{"httpsOnly":true}}'
    responseExportValues:
      - properties.httpsOnly
"#;

    #[rstest]
    #[case("v1beta2")]
    #[case("resources.azapi.upbound.io/v1beta2")]
    fn converts_yaml_input(#[case] api_version: &str) {
        let converted = convert(V1BETA1_OBJECT, api_version).expect("valid object");

        assert_eq!(converted["apiVersion"], "resources.azapi.upbound.io/v1beta2");
        assert_eq!(
            converted["spec"]["forProvider"]["body"],
            json!({"properties": {"httpsOnly": true}})
        );
        assert_eq!(
            converted["spec"]["forProvider"]["responseExportValues"],
            json!(["properties.httpsOnly"])
        );
    }

    #[test]
    fn converts_json_input() {
        let input = json!({
            "apiVersion": "resources.azapi.upbound.io/v1beta2",
            "kind": "Resource",
            "metadata": {"name": "rg"},
            "spec": {"forProvider": {"body": {"location": "eastus"}}}
        })
        .to_string();

        let converted = convert(&input, "v1beta1").expect("valid object");
        assert_eq!(
            converted["spec"]["forProvider"]["body"],
            r#"{"location":"eastus"}"#
        );
    }

    #[test]
    fn rejects_unknown_version() {
        let err = convert(V1BETA1_OBJECT, "v2").expect_err("unknown version");
        assert!(matches!(err, Error::ConvertObject { .. }));
    }
}
