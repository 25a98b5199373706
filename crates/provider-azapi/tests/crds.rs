use insta::{assert_snapshot, with_settings};
use provider_azapi::{
    crd::ResourceKind,
    version::STORAGE_VERSION,
    yaml::{SerializeOptions, YamlSchema as _},
};
use strum::IntoEnumIterator as _;

/// The generated OpenAPI schemas are left out, everything else of the merged
/// CRD is pinned.
#[test]
fn merged_crd() {
    for kind in ResourceKind::iter() {
        let mut crd = kind
            .merged_crd(STORAGE_VERSION)
            .expect("the CRDs must be mergeable");

        for version in &mut crd.spec.versions {
            assert!(
                version.schema.is_some(),
                "{kind} {name} has no schema",
                name = version.name
            );
            version.schema = None;
        }

        let yaml = crd
            .to_yaml_string(SerializeOptions {
                explicit_document: false,
                singleton_map: true,
            })
            .expect("CRDs serialize to YAML");

        with_settings!({ snapshot_suffix => kind.as_str() }, {
            assert_snapshot!(yaml);
        });
    }
}
