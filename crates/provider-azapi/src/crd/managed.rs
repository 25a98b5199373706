//! Fields and behaviour shared by every Crossplane managed resource.
//!
//! Each kind flattens [`ManagedResourceSpec`] into its spec and
//! [`ManagedResourceStatus`] into its status. The [`ManagedResource`] trait
//! gives uniform access to them, regardless of kind and version.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Controls what happens to the external resource when the managed resource is
/// deleted.
#[derive(
    strum::Display,
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Hash,
    JsonSchema,
    PartialEq,
    Serialize,
)]
pub enum DeletionPolicy {
    /// The external resource is orphaned and keeps existing.
    Orphan,

    /// The external resource is deleted.
    #[default]
    Delete,
}

/// An action the provider is allowed to take on the external resource.
#[derive(
    strum::Display, Clone, Copy, Debug, Deserialize, Eq, Hash, JsonSchema, PartialEq, Serialize,
)]
pub enum ManagementPolicy {
    #[serde(rename = "*")]
    #[strum(serialize = "*")]
    All,
    Observe,
    Create,
    Update,
    Delete,
    LateInitialize,
}

fn default_management_policies() -> Vec<ManagementPolicy> {
    vec![ManagementPolicy::All]
}

/// A reference to a cluster scoped object, e.g. a `ProviderConfig`.
#[derive(Clone, Debug, Deserialize, Eq, Hash, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Name of the referenced object.
    pub name: String,
}

impl Default for Reference {
    fn default() -> Self {
        Self {
            name: "default".to_owned(),
        }
    }
}

/// A reference to a Secret in an arbitrary namespace.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretReference {
    /// Name of the secret.
    pub name: String,

    /// Namespace of the secret.
    pub namespace: String,
}

/// The part of the spec every managed resource carries.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedResourceSpec {
    /// Specifies what will happen to the underlying external resource when this
    /// managed resource is deleted.
    #[serde(default)]
    pub deletion_policy: DeletionPolicy,

    /// Specifies the actions the provider is allowed to take on the external
    /// resource.
    #[serde(default = "default_management_policies")]
    pub management_policies: Vec<ManagementPolicy>,

    /// Specifies how the provider that will be used to create, observe, update
    /// and delete this managed resource should be configured.
    #[serde(default = "provider_config_ref_default")]
    pub provider_config_ref: Option<Reference>,

    /// Specifies the namespace and name of a Secret to which any connection
    /// details for this managed resource should be written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_connection_secret_to_ref: Option<SecretReference>,
}

fn provider_config_ref_default() -> Option<Reference> {
    Some(Reference::default())
}

impl Default for ManagedResourceSpec {
    fn default() -> Self {
        Self {
            deletion_policy: DeletionPolicy::default(),
            management_policies: default_management_policies(),
            provider_config_ref: provider_config_ref_default(),
            write_connection_secret_to_ref: None,
        }
    }
}

#[derive(
    strum::Display,
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Hash,
    JsonSchema,
    PartialEq,
    Serialize,
)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

/// The observed condition of a managed resource.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of this condition. At most one of each condition type may apply to
    /// a resource at any point in time.
    #[serde(rename = "type")]
    pub type_: String,

    /// Status of this condition; is it currently True, False, or Unknown?
    pub status: ConditionStatus,

    /// LastTransitionTime is the last time this condition transitioned from one
    /// status to another.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<Time>,

    /// A Reason for this condition's last transition from one status to another.
    pub reason: String,

    /// A Message containing details about this condition's last transition from
    /// one status to another, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// ObservedGeneration represents the .metadata.generation that the condition
    /// was set based upon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

impl Condition {
    pub const TYPE_READY: &'static str = "Ready";
    pub const TYPE_SYNCED: &'static str = "Synced";

    /// Returns whether both conditions are equal, ignoring the transition time.
    pub fn equivalent(&self, other: &Self) -> bool {
        self.type_ == other.type_
            && self.status == other.status
            && self.reason == other.reason
            && self.message == other.message
            && self.observed_generation == other.observed_generation
    }
}

/// The part of the status every managed resource carries.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedResourceStatus {
    /// Conditions of the resource.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,

    /// ObservedGeneration is the latest metadata.generation which resulted in
    /// either a ready state, or stalled due to error it can not recover from
    /// without human intervention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

impl ManagedResourceStatus {
    pub fn condition(&self, type_: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.type_ == type_)
    }

    /// Sets the supplied conditions, replacing any existing condition of the
    /// same type. An existing condition which is equivalent to the new one is
    /// kept untouched, including its transition time.
    pub fn set_conditions(&mut self, conditions: impl IntoIterator<Item = Condition>) {
        for new in conditions {
            match self.conditions.iter_mut().find(|c| c.type_ == new.type_) {
                Some(existing) if existing.equivalent(&new) => {}
                Some(existing) => *existing = new,
                None => self.conditions.push(new),
            }
        }
    }
}

/// Uniform access to the Crossplane managed resource fields of every azapi
/// kind in every version.
pub trait ManagedResource {
    fn managed_spec(&self) -> &ManagedResourceSpec;
    fn managed_spec_mut(&mut self) -> &mut ManagedResourceSpec;
    fn managed_status(&self) -> Option<&ManagedResourceStatus>;

    /// Returns the status, creating an empty one if the resource has none yet.
    fn managed_status_mut(&mut self) -> &mut ManagedResourceStatus;

    fn condition(&self, type_: &str) -> Option<&Condition> {
        self.managed_status()
            .and_then(|status| status.condition(type_))
    }

    fn set_conditions(&mut self, conditions: impl IntoIterator<Item = Condition>) {
        self.managed_status_mut().set_conditions(conditions);
    }

    fn deletion_policy(&self) -> DeletionPolicy {
        self.managed_spec().deletion_policy
    }

    fn set_deletion_policy(&mut self, policy: DeletionPolicy) {
        self.managed_spec_mut().deletion_policy = policy;
    }

    fn management_policies(&self) -> &[ManagementPolicy] {
        &self.managed_spec().management_policies
    }

    fn set_management_policies(&mut self, policies: Vec<ManagementPolicy>) {
        self.managed_spec_mut().management_policies = policies;
    }

    fn provider_config_reference(&self) -> Option<&Reference> {
        self.managed_spec().provider_config_ref.as_ref()
    }

    fn set_provider_config_reference(&mut self, reference: Option<Reference>) {
        self.managed_spec_mut().provider_config_ref = reference;
    }

    fn write_connection_secret_to_reference(&self) -> Option<&SecretReference> {
        self.managed_spec().write_connection_secret_to_ref.as_ref()
    }

    fn set_write_connection_secret_to_reference(&mut self, reference: Option<SecretReference>) {
        self.managed_spec_mut().write_connection_secret_to_ref = reference;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(type_: &str, status: ConditionStatus, reason: &str) -> Condition {
        Condition {
            type_: type_.to_owned(),
            status,
            reason: reason.to_owned(),
            ..Condition::default()
        }
    }

    #[test]
    fn spec_defaults() {
        let spec: ManagedResourceSpec =
            serde_json::from_str("{}").expect("an empty spec is valid");

        assert_eq!(spec, ManagedResourceSpec::default());
        assert_eq!(spec.management_policies, vec![ManagementPolicy::All]);
        assert_eq!(spec.provider_config_ref, Some(Reference::default()));
    }

    #[test]
    fn management_policy_wildcard() {
        let policies: Vec<ManagementPolicy> =
            serde_json::from_str(r#"["*", "Observe", "LateInitialize"]"#)
                .expect("valid management policies");

        assert_eq!(
            policies,
            vec![
                ManagementPolicy::All,
                ManagementPolicy::Observe,
                ManagementPolicy::LateInitialize
            ]
        );
        assert_eq!(ManagementPolicy::All.to_string(), "*");
    }

    #[test]
    fn set_conditions_replaces_same_type() {
        let mut status = ManagedResourceStatus::default();

        status.set_conditions([
            condition(Condition::TYPE_READY, ConditionStatus::False, "Creating"),
            condition(Condition::TYPE_SYNCED, ConditionStatus::True, "ReconcileSuccess"),
        ]);
        status.set_conditions([condition(
            Condition::TYPE_READY,
            ConditionStatus::True,
            "Available",
        )]);

        assert_eq!(status.conditions.len(), 2);
        let ready = status
            .condition(Condition::TYPE_READY)
            .expect("ready condition is set");
        assert_eq!(ready.status, ConditionStatus::True);
        assert_eq!(ready.reason, "Available");
    }

    #[test]
    fn set_conditions_keeps_transition_time_of_equivalent_condition() {
        let time: Time = serde_json::from_value(serde_json::json!("2025-01-01T00:00:00Z"))
            .expect("valid RFC 3339 timestamp");

        let mut existing = condition(Condition::TYPE_READY, ConditionStatus::True, "Available");
        existing.last_transition_time = Some(time.clone());

        let mut status = ManagedResourceStatus {
            conditions: vec![existing],
            observed_generation: None,
        };
        status.set_conditions([condition(
            Condition::TYPE_READY,
            ConditionStatus::True,
            "Available",
        )]);

        let ready = status
            .condition(Condition::TYPE_READY)
            .expect("ready condition is set");
        assert_eq!(ready.last_transition_time, Some(time));
    }
}
