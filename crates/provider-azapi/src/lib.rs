//! Custom resource types and API version conversion for the azapi Crossplane
//! provider.
//!
//! The provider serves four kinds (`Resource`, `DataPlaneResource`,
//! `ResourceAction` and `UpdateResource`) in two schema versions. In `v1beta1`
//! the request body, the observed output and the list of exported response
//! values are carried as (string-encoded) JSON text, in `v1beta2` they are
//! structured JSON values. Everything else is identical between the versions.
//!
//! ## Usage
//!
//! ```
//! use provider_azapi::{kube::core::conversion::ConversionReview, registry::ConversionRegistry};
//!
//! let registry = ConversionRegistry::azapi().expect("the azapi converters must register");
//!
//! // Hand this to the conversion webhook server for every review it receives.
//! let handler = move |review: ConversionReview| registry.try_convert(review);
//! # let _ = handler;
//! ```
//!
//! The [`registry::ConversionRegistry`] copies all fields which are identical
//! between both versions and dispatches the fields which change their encoding
//! to the typed converters in [`conversion`].

pub mod conversion;
pub mod crd;
pub mod logging;
pub mod registry;
pub mod version;
pub mod yaml;

// External re-exports
pub use k8s_openapi;
pub use kube;
pub use schemars;
