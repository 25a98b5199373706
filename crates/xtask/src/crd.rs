use std::path::PathBuf;

use provider_azapi::{
    crd::ResourceKind,
    kube::core::crd::MergeError,
    version::{STORAGE_VERSION, SchemaVersion},
    yaml::{self, SerializeOptions, YamlSchema as _},
};
use snafu::{ResultExt, Snafu};
use strum::IntoEnumIterator as _;
use tracing::info;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to create output directory {path}", path = path.display()))]
    CreateOutputDirectory {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to merge {kind} CRD"))]
    MergeCrd {
        source: MergeError,
        kind: ResourceKind,
    },

    #[snafu(display("failed to write CRD to file at {path}", path = path.display()))]
    WriteCrd { source: yaml::Error, path: PathBuf },

    #[snafu(display("failed to print {kind} CRD"))]
    PrintCrd {
        source: yaml::Error,
        kind: ResourceKind,
    },
}

#[derive(Debug, clap::Args)]
pub struct CrdArguments {
    /// Directory the `<Kind>.yaml` files are written to. The CRDs are printed
    /// to stdout if not set.
    #[arg(long, short, env = "AZAPI_CRD_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// The schema version the API server persists objects in.
    #[arg(long, default_value_t = STORAGE_VERSION)]
    pub stored_version: SchemaVersion,
}

pub fn generate(arguments: &CrdArguments) -> Result<(), Error> {
    if let Some(path) = &arguments.output_dir {
        std::fs::create_dir_all(path)
            .with_context(|_| CreateOutputDirectorySnafu { path: path.clone() })?;
    }

    for kind in ResourceKind::iter() {
        let merged = kind
            .merged_crd(arguments.stored_version)
            .context(MergeCrdSnafu { kind })?;

        match &arguments.output_dir {
            Some(directory) => {
                let mut path = directory.join(kind.as_str());
                path.set_extension("yaml");

                merged
                    .write_yaml(&path, SerializeOptions::default())
                    .with_context(|_| WriteCrdSnafu { path: path.clone() })?;
                info!(%kind, path = %path.display(), "wrote CRD");
            }
            None => merged
                .print_yaml(SerializeOptions::default())
                .context(PrintCrdSnafu { kind })?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_file_per_kind() {
        let directory = tempfile::tempdir().expect("temporary directory");
        let output_dir = directory.path().join("crds");

        generate(&CrdArguments {
            output_dir: Some(output_dir.clone()),
            stored_version: STORAGE_VERSION,
        })
        .expect("CRDs are generated");

        for kind in ResourceKind::iter() {
            let yaml = std::fs::read_to_string(output_dir.join(format!("{kind}.yaml")))
                .expect("one file per kind");

            assert!(yaml.starts_with("---\n"));
            assert!(yaml.contains("kind: CustomResourceDefinition"));
            assert!(yaml.contains(&format!("name: {}.resources.azapi.upbound.io", kind.plural())));
        }
    }
}
