//! Schema versions served by the azapi CRDs.
//!
//! Every kind is served as `v1beta1` (JSON payloads encoded as text, the
//! storage version) and `v1beta2` (JSON payloads as structured values, the
//! version the controller reconciles).

use std::str::FromStr;

use snafu::{ResultExt, Snafu, ensure};
use strum::{EnumIter, IntoStaticStr};

use crate::crd::GROUP;

/// The version the custom resources are persisted in by the API server.
pub const STORAGE_VERSION: SchemaVersion = SchemaVersion::V1Beta1;

/// The version the controllers reconcile.
pub const RECONCILE_VERSION: SchemaVersion = SchemaVersion::V1Beta2;

#[derive(Debug, Eq, PartialEq, Snafu)]
pub enum ParseSchemaVersionError {
    #[snafu(display(
        "unknown schema version {input:?}, expected one of \"v1beta1\" or \"v1beta2\""
    ))]
    UnknownVersion { input: String },
}

#[derive(Debug, Eq, PartialEq, Snafu)]
pub enum ParseApiVersionError {
    #[snafu(display("group cannot be empty"))]
    EmptyGroup,

    #[snafu(display("API group {group:?} is not served by this provider, expected {GROUP:?}"))]
    ForeignGroup { group: String },

    #[snafu(display("failed to parse schema version"))]
    ParseVersion { source: ParseSchemaVersionError },
}

/// A schema version of the `resources.azapi.upbound.io` API group.
///
/// Variants are ordered from oldest to newest.
#[derive(
    Clone, Copy, Debug, EnumIter, Eq, Hash, IntoStaticStr, Ord, PartialEq, PartialOrd,
)]
#[strum(serialize_all = "lowercase")]
pub enum SchemaVersion {
    V1Beta1,
    V1Beta2,
}

impl SchemaVersion {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Returns the full `<group>/<version>` API version, e.g.
    /// `resources.azapi.upbound.io/v1beta2`.
    pub fn api_version(&self) -> String {
        format!("{GROUP}/{version}", version = self.as_str())
    }

    /// Parses either a bare version (`v1beta1`) or a full API version
    /// (`resources.azapi.upbound.io/v1beta1`).
    pub fn from_api_version(api_version: &str) -> Result<Self, ParseApiVersionError> {
        let version = match api_version.split_once('/') {
            Some((group, version)) => {
                ensure!(!group.is_empty(), EmptyGroupSnafu);
                ensure!(group == GROUP, ForeignGroupSnafu { group });
                version
            }
            None => api_version,
        };

        Self::from_str(version).context(ParseVersionSnafu)
    }
}

impl FromStr for SchemaVersion {
    type Err = ParseSchemaVersionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "v1beta1" => Ok(Self::V1Beta1),
            "v1beta2" => Ok(Self::V1Beta2),
            _ => UnknownVersionSnafu { input }.fail(),
        }
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator as _;

    use super::*;

    #[rstest]
    #[case("v1beta1", SchemaVersion::V1Beta1)]
    #[case("v1beta2", SchemaVersion::V1Beta2)]
    #[case("resources.azapi.upbound.io/v1beta1", SchemaVersion::V1Beta1)]
    #[case("resources.azapi.upbound.io/v1beta2", SchemaVersion::V1Beta2)]
    fn valid_api_version(#[case] input: &str, #[case] expected: SchemaVersion) {
        let version = SchemaVersion::from_api_version(input).expect("valid azapi API version");
        assert_eq!(version, expected);
    }

    fn unknown_version(input: &str) -> ParseApiVersionError {
        ParseApiVersionError::ParseVersion {
            source: ParseSchemaVersionError::UnknownVersion {
                input: input.to_owned(),
            },
        }
    }

    #[rstest]
    #[case("/v1beta1", ParseApiVersionError::EmptyGroup)]
    #[case("apps/v1beta1", ParseApiVersionError::ForeignGroup { group: "apps".to_owned() })]
    #[case("v1", unknown_version("v1"))]
    #[case("resources.azapi.upbound.io/v1alpha1", unknown_version("v1alpha1"))]
    fn invalid_api_version(#[case] input: &str, #[case] error: ParseApiVersionError) {
        let err = SchemaVersion::from_api_version(input).expect_err("invalid azapi API version");
        assert_eq!(err, error);
    }

    #[test]
    fn display_roundtrip() {
        for version in SchemaVersion::iter() {
            let parsed =
                SchemaVersion::from_str(&version.to_string()).expect("displayed versions parse");
            assert_eq!(parsed, version);
        }
    }

    #[test]
    fn ordering() {
        assert!(SchemaVersion::V1Beta1 < SchemaVersion::V1Beta2);
        assert!(STORAGE_VERSION < RECONCILE_VERSION);
    }

    #[test]
    fn full_api_version() {
        assert_eq!(
            SchemaVersion::V1Beta2.api_version(),
            "resources.azapi.upbound.io/v1beta2"
        );
    }
}
