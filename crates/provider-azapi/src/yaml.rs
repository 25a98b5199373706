//! Utility functions for processing data in the YAML file format
use std::{io::Write, path::Path};

use snafu::{ResultExt, Snafu};

type Result<T, E = Error> = std::result::Result<T, E>;

/// Represents every error which can be encountered during YAML serialization.
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to serialize YAML"))]
    SerializeYaml { source: serde_yaml::Error },

    #[snafu(display("failed to write YAML document separator"))]
    WriteDocumentSeparator { source: std::io::Error },

    #[snafu(display("failed to write YAML to file"))]
    WriteToFile { source: std::io::Error },

    #[snafu(display("failed to write YAML to stdout"))]
    WriteToStdout { source: std::io::Error },

    #[snafu(display("failed to parse bytes as valid UTF-8 string"))]
    ParseUtf8Bytes { source: std::string::FromUtf8Error },
}

/// Provides configurable options during YAML serialization.
///
/// For most people the default implementation [`SerializeOptions::default()`] is sufficient as it
/// enables explicit document and singleton map serialization.
#[derive(Clone, Copy, Debug)]
pub struct SerializeOptions {
    /// Adds leading triple dashes (`---`) to the output string.
    pub explicit_document: bool,

    /// Serialize enum variants as YAML maps using the variant name as the key.
    pub singleton_map: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            explicit_document: true,
            singleton_map: true,
        }
    }
}

/// Renders any [serializable](serde::Serialize) type as YAML using the provided
/// [`SerializeOptions`].
///
/// Used for both generated CRDs and converted objects.
pub trait YamlSchema: Sized + serde::Serialize {
    /// Renders `self` as a YAML string.
    fn to_yaml_string(&self, options: SerializeOptions) -> Result<String> {
        let mut buffer = Vec::new();
        serialize(&self, &mut buffer, options)?;

        String::from_utf8(buffer).context(ParseUtf8BytesSnafu)
    }

    /// Renders `self` as YAML and writes it to a file at `path`.
    fn write_yaml<P: AsRef<Path>>(&self, path: P, options: SerializeOptions) -> Result<()> {
        let yaml = self.to_yaml_string(options)?;
        std::fs::write(path, yaml).context(WriteToFileSnafu)
    }

    /// Renders `self` as YAML and prints it to stdout.
    fn print_yaml(&self, options: SerializeOptions) -> Result<()> {
        let yaml = self.to_yaml_string(options)?;

        let mut writer = std::io::stdout();
        writer
            .write_all(yaml.as_bytes())
            .context(WriteToStdoutSnafu)
    }
}

impl<T> YamlSchema for T where T: serde::ser::Serialize {}

/// Serializes the given data structure and writes it to a [`Writer`](Write).
pub fn serialize<T, W>(value: &T, mut writer: W, options: SerializeOptions) -> Result<()>
where
    T: serde::Serialize,
    W: std::io::Write,
{
    if options.explicit_document {
        writer
            .write_all(b"---\n")
            .context(WriteDocumentSeparatorSnafu)?;
    }

    let mut serializer = serde_yaml::Serializer::new(writer);

    if options.singleton_map {
        serde_yaml::with::singleton_map_recursive::serialize(value, &mut serializer)
            .context(SerializeYamlSnafu)?;
    } else {
        value
            .serialize(&mut serializer)
            .context(SerializeYamlSnafu)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    enum Policy {
        Orphan(String),
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Spec {
        deletion_policy: Policy,
        locks: Vec<String>,
    }

    fn spec() -> Spec {
        Spec {
            deletion_policy: Policy::Orphan("always".to_owned()),
            locks: vec!["/subscriptions/0".to_owned()],
        }
    }

    #[test]
    fn explicit_document_with_singleton_maps() {
        let yaml = spec()
            .to_yaml_string(SerializeOptions::default())
            .expect("serializable");

        assert_eq!(
            yaml,
            indoc! {"
                ---
                deletionPolicy:
                  orphan: always
                locks:
                - /subscriptions/0
            "}
        );
    }

    #[test]
    fn bare_document() {
        let yaml = serde_json::json!({"apiVersion": "v1", "kind": "Resource"})
            .to_yaml_string(SerializeOptions {
                explicit_document: false,
                singleton_map: false,
            })
            .expect("serializable");

        assert_eq!(yaml, "apiVersion: v1\nkind: Resource\n");
    }
}
