//! Conversion of the designated fields between `v1beta1` and `v1beta2`.
//!
//! Three fields change their encoding between the schema versions:
//!
//! | Field                  | `v1beta1`              | `v1beta2`                  |
//! |------------------------|------------------------|----------------------------|
//! | `body`                 | JSON text              | structured JSON value      |
//! | `responseExportValues` | list of strings        | structured JSON array      |
//! | `output`               | JSON text              | structured JSON value      |
//!
//! [`upgrade`] and [`downgrade`] convert these fields of all three sections
//! (`spec.forProvider`, `spec.initProvider` and `status.atProvider`) of one
//! object into a target object. They only ever touch the designated fields,
//! copying everything else is the job of the
//! [`ConversionRegistry`](crate::registry::ConversionRegistry).
//!
//! The logical value of a field survives a round trip unchanged, and a field
//! which is absent in the source stays absent in the target. Text produced by
//! [`structured_to_string`] is compact JSON, so a `v1beta1` value which was
//! itself produced by this module survives `v1beta1 -> v1beta2 -> v1beta1`
//! byte for byte.

use std::fmt::Display;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::JSON;
use serde::{Deserialize as _, de::Error as _};
use serde_json::Value;
use snafu::{ResultExt, Snafu};
use strum::{EnumIter, IntoStaticStr};
use tracing::trace;

use crate::crd::{VersionedResource, v1beta1, v1beta2};

/// One of the three sections of a managed resource carrying designated fields.
#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq)]
pub enum Section {
    ForProvider,
    InitProvider,
    AtProvider,
}

impl Section {
    /// The dotted path of the section within the object.
    pub fn path(&self) -> &'static str {
        match self {
            Self::ForProvider => "spec.forProvider",
            Self::InitProvider => "spec.initProvider",
            Self::AtProvider => "status.atProvider",
        }
    }

    /// The designated fields of this section in conversion order.
    pub fn fields(&self) -> &'static [DesignatedField] {
        match self {
            Self::ForProvider | Self::InitProvider => {
                &[DesignatedField::Body, DesignatedField::ResponseExportValues]
            }
            Self::AtProvider => &[
                DesignatedField::Body,
                DesignatedField::ResponseExportValues,
                DesignatedField::Output,
            ],
        }
    }
}

/// A field which changes its encoding between the schema versions.
#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, IntoStaticStr, PartialEq)]
#[strum(serialize_all = "camelCase")]
pub enum DesignatedField {
    Body,
    ResponseExportValues,
    Output,
}

impl DesignatedField {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// The location of a designated field, displayed as a dotted path like
/// `status.atProvider.output`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FieldPath {
    pub section: Section,
    pub field: DesignatedField,
}

impl FieldPath {
    pub fn new(section: Section, field: DesignatedField) -> Self {
        Self { section, field }
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.section.path(), self.field.as_str())
    }
}

/// The coarse category of a [`ConversionError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConversionErrorKind {
    SerializationFailure,
    DeserializationFailure,
}

/// Converting a designated field failed.
///
/// Both variants are deterministic: retrying the same conversion yields the
/// same error.
#[derive(Debug, Snafu)]
pub enum ConversionError {
    #[snafu(display("failed to serialize {field}"))]
    SerializeField {
        source: serde_json::Error,
        field: FieldPath,
    },

    #[snafu(display("failed to deserialize {field}"))]
    DeserializeField {
        source: serde_json::Error,
        field: FieldPath,
    },
}

impl ConversionError {
    pub fn kind(&self) -> ConversionErrorKind {
        match self {
            Self::SerializeField { .. } => ConversionErrorKind::SerializationFailure,
            Self::DeserializeField { .. } => ConversionErrorKind::DeserializationFailure,
        }
    }

    /// The field the conversion failed for.
    pub fn field(&self) -> FieldPath {
        match self {
            Self::SerializeField { field, .. } | Self::DeserializeField { field, .. } => *field,
        }
    }
}

/// Encodes a structured value as compact JSON text.
pub fn structured_to_string(
    value: Option<&JSON>,
    field: FieldPath,
) -> Result<Option<String>, ConversionError> {
    value
        .map(|JSON(value)| serde_json::to_string(value).context(SerializeFieldSnafu { field }))
        .transpose()
}

/// Parses JSON text into a structured value.
///
/// An empty string is treated the same as an absent field. Text which cannot
/// be represented exactly by a structured value is rejected: numbers which
/// would lose precision and objects with duplicate keys.
pub fn string_to_structured(
    text: Option<&str>,
    field: FieldPath,
) -> Result<Option<JSON>, ConversionError> {
    text.filter(|text| !text.is_empty())
        .map(|text| -> Result<JSON, ConversionError> {
            let value: Value =
                serde_json::from_str(text).context(DeserializeFieldSnafu { field })?;
            ensure_exact(text, &value).context(DeserializeFieldSnafu { field })?;
            Ok(JSON(value))
        })
        .transpose()
}

/// Turns a structured JSON array of strings into a list of strings, keeping the
/// element order. Any other shape (a map, or an array containing non-string
/// elements) is rejected.
pub fn structured_to_string_list(
    value: Option<&JSON>,
    field: FieldPath,
) -> Result<Option<Vec<String>>, ConversionError> {
    value
        .map(|JSON(value)| {
            Vec::<String>::deserialize(value).context(DeserializeFieldSnafu { field })
        })
        .transpose()
}

/// Turns a list of strings into a structured JSON array, keeping the element
/// order.
pub fn string_list_to_structured(
    list: Option<&[String]>,
    field: FieldPath,
) -> Result<Option<JSON>, ConversionError> {
    list.map(|list| {
        serde_json::to_value(list)
            .map(JSON)
            .context(SerializeFieldSnafu { field })
    })
    .transpose()
}

/// Checks that `value`, parsed from `text`, still holds every object member
/// and the exact value of every number of `text`.
///
/// Parsing silently keeps only the last of duplicate keys and rounds numbers
/// which don't fit into `i64`, `u64` or `f64`. Both show up when comparing the
/// original text with the text rendered from the parsed value.
fn ensure_exact(text: &str, value: &Value) -> Result<(), serde_json::Error> {
    let rendered = serde_json::to_string(value)?;

    let (Some(original), Some(rendered)) = (TextShape::scan(text), TextShape::scan(&rendered))
    else {
        return Err(serde_json::Error::custom("number exponent out of range"));
    };

    if original.members != rendered.members {
        return Err(serde_json::Error::custom("duplicate object key"));
    }

    if original.numbers != rendered.numbers {
        return Err(serde_json::Error::custom(
            "number cannot be represented without losing precision",
        ));
    }

    Ok(())
}

/// The object members and numbers found in a JSON text.
#[derive(Debug, Default)]
struct TextShape {
    members: usize,

    /// Sorted, as the order of object keys is not preserved.
    numbers: Vec<Decimal>,
}

impl TextShape {
    /// Scans valid JSON text. Returns [`None`] if an exponent doesn't fit into
    /// an [`i64`].
    fn scan(text: &str) -> Option<Self> {
        let mut shape = Self::default();
        let mut chars = text.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            match c {
                '"' => {
                    while let Some((_, c)) = chars.next() {
                        match c {
                            '\\' => {
                                chars.next();
                            }
                            '"' => break,
                            _ => {}
                        }
                    }
                }
                ':' => shape.members += 1,
                '-' | '0'..='9' => {
                    let mut end = start + 1;
                    while let Some(&(index, c)) =
                        chars.peek().filter(|(_, c)| is_number_char(*c))
                    {
                        end = index + c.len_utf8();
                        chars.next();
                    }

                    shape.numbers.push(Decimal::parse(&text[start..end])?);
                }
                _ => {}
            }
        }

        shape.numbers.sort();
        Some(shape)
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')
}

/// A JSON number as `digits * 10^exponent`, without leading or trailing zeros
/// in `digits`. Zero has no digits.
#[derive(Debug, Eq, Ord, PartialEq, PartialOrd)]
struct Decimal {
    negative: bool,
    digits: String,
    exponent: i64,
}

impl Decimal {
    fn parse(token: &str) -> Option<Self> {
        let (negative, unsigned) = match token.strip_prefix('-') {
            Some(unsigned) => (true, unsigned),
            None => (false, token),
        };

        let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
            None => (unsigned, 0),
        };
        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let digits = format!("{integer}{fraction}");
        let digits = digits.trim_start_matches('0');
        let significant = digits.trim_end_matches('0');

        if significant.is_empty() {
            return Some(Self {
                negative: false,
                digits: String::new(),
                exponent: 0,
            });
        }

        let exponent = exponent
            .checked_sub(i64::try_from(fraction.len()).ok()?)?
            .checked_add(i64::try_from(digits.len() - significant.len()).ok()?)?;

        Some(Self {
            negative,
            digits: significant.to_owned(),
            exponent,
        })
    }
}

/// Converts the designated fields of a `v1beta1` object into the structured
/// representation of a `v1beta2` object of the same kind.
///
/// Sections which are absent in `source` are not touched in `target`. The
/// first failing field aborts the conversion. `target` is then only partially
/// converted and must be discarded.
pub fn upgrade<S, T>(source: &S, target: &mut T) -> Result<(), ConversionError>
where
    S: VersionedResource<Request = v1beta1::RequestPayload, Response = v1beta1::ResponsePayload>,
    T: VersionedResource<Request = v1beta2::RequestPayload, Response = v1beta2::ResponsePayload>,
{
    upgrade_request(
        Section::ForProvider,
        source.for_provider(),
        target.for_provider_mut(),
    )?;

    if let Some(init_provider) = source.init_provider() {
        upgrade_request(
            Section::InitProvider,
            init_provider,
            target.init_provider_mut(),
        )?;
    }

    if let Some(at_provider) = source.at_provider() {
        upgrade_response(at_provider, target.at_provider_mut())?;
    }

    Ok(())
}

/// Converts the designated fields of a `v1beta2` object into the text
/// representation of a `v1beta1` object of the same kind.
///
/// Sections which are absent in `source` are not touched in `target`. The
/// first failing field aborts the conversion. `target` is then only partially
/// converted and must be discarded.
pub fn downgrade<S, T>(source: &S, target: &mut T) -> Result<(), ConversionError>
where
    S: VersionedResource<Request = v1beta2::RequestPayload, Response = v1beta2::ResponsePayload>,
    T: VersionedResource<Request = v1beta1::RequestPayload, Response = v1beta1::ResponsePayload>,
{
    downgrade_request(
        Section::ForProvider,
        source.for_provider(),
        target.for_provider_mut(),
    )?;

    if let Some(init_provider) = source.init_provider() {
        downgrade_request(
            Section::InitProvider,
            init_provider,
            target.init_provider_mut(),
        )?;
    }

    if let Some(at_provider) = source.at_provider() {
        downgrade_response(at_provider, target.at_provider_mut())?;
    }

    Ok(())
}

fn upgrade_request(
    section: Section,
    source: &v1beta1::RequestPayload,
    target: &mut v1beta2::RequestPayload,
) -> Result<(), ConversionError> {
    let field = FieldPath::new(section, DesignatedField::Body);
    target.body = string_to_structured(source.body.as_deref(), field)?;
    trace!(%field, present = target.body.is_some(), "upgraded field");

    let field = FieldPath::new(section, DesignatedField::ResponseExportValues);
    target.response_export_values =
        string_list_to_structured(source.response_export_values.as_deref(), field)?;
    trace!(%field, present = target.response_export_values.is_some(), "upgraded field");

    Ok(())
}

fn upgrade_response(
    source: &v1beta1::ResponsePayload,
    target: &mut v1beta2::ResponsePayload,
) -> Result<(), ConversionError> {
    let field = FieldPath::new(Section::AtProvider, DesignatedField::Body);
    target.body = string_to_structured(source.body.as_deref(), field)?;
    trace!(%field, present = target.body.is_some(), "upgraded field");

    let field = FieldPath::new(Section::AtProvider, DesignatedField::ResponseExportValues);
    target.response_export_values =
        string_list_to_structured(source.response_export_values.as_deref(), field)?;
    trace!(%field, present = target.response_export_values.is_some(), "upgraded field");

    let field = FieldPath::new(Section::AtProvider, DesignatedField::Output);
    target.output = string_to_structured(source.output.as_deref(), field)?;
    trace!(%field, present = target.output.is_some(), "upgraded field");

    Ok(())
}

fn downgrade_request(
    section: Section,
    source: &v1beta2::RequestPayload,
    target: &mut v1beta1::RequestPayload,
) -> Result<(), ConversionError> {
    let field = FieldPath::new(section, DesignatedField::Body);
    target.body = structured_to_string(source.body.as_ref(), field)?;
    trace!(%field, present = target.body.is_some(), "downgraded field");

    let field = FieldPath::new(section, DesignatedField::ResponseExportValues);
    target.response_export_values =
        structured_to_string_list(source.response_export_values.as_ref(), field)?;
    trace!(%field, present = target.response_export_values.is_some(), "downgraded field");

    Ok(())
}

fn downgrade_response(
    source: &v1beta2::ResponsePayload,
    target: &mut v1beta1::ResponsePayload,
) -> Result<(), ConversionError> {
    let field = FieldPath::new(Section::AtProvider, DesignatedField::Body);
    target.body = structured_to_string(source.body.as_ref(), field)?;
    trace!(%field, present = target.body.is_some(), "downgraded field");

    let field = FieldPath::new(Section::AtProvider, DesignatedField::ResponseExportValues);
    target.response_export_values =
        structured_to_string_list(source.response_export_values.as_ref(), field)?;
    trace!(%field, present = target.response_export_values.is_some(), "downgraded field");

    let field = FieldPath::new(Section::AtProvider, DesignatedField::Output);
    target.output = structured_to_string(source.output.as_ref(), field)?;
    trace!(%field, present = target.output.is_some(), "downgraded field");

    Ok(())
}
