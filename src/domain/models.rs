use crate::domain::constants::SHARED_SCOPE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unsupported type '{0}'. Supported: address, address-group, service, service-group")]
pub struct ObjectTypeError(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectType {
    Address,
    AddressGroup,
    Service,
    ServiceGroup,
}

impl ObjectType {
    /// Child node under a scope root that holds entries of this type.
    pub fn node_name(self) -> &'static str {
        match self {
            ObjectType::Address => "address",
            ObjectType::AddressGroup => "address-group",
            ObjectType::Service => "service",
            ObjectType::ServiceGroup => "service-group",
        }
    }

    pub fn is_group(self) -> bool {
        matches!(self, ObjectType::AddressGroup | ObjectType::ServiceGroup)
    }
}

impl FromStr for ObjectType {
    type Err = ObjectTypeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "address" => Ok(ObjectType::Address),
            "address-group" => Ok(ObjectType::AddressGroup),
            "service" => Ok(ObjectType::Service),
            "service-group" => Ok(ObjectType::ServiceGroup),
            other => Err(ObjectTypeError(other.to_string())),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node_name())
    }
}

/// A namespace holding objects: the shared root or a named device group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    Shared,
    DeviceGroup(String),
}

impl From<&str> for Scope {
    fn from(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case(SHARED_SCOPE) {
            Scope::Shared
        } else {
            Scope::DeviceGroup(raw.to_string())
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Shared => f.write_str(SHARED_SCOPE),
            Scope::DeviceGroup(name) => f.write_str(name),
        }
    }
}

/// One row of operator intent. `object_type` is kept raw so that an
/// unsupported value still produces an audit row.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct MoveRequest {
    pub object_name: String,
    pub object_type: String,
    pub src_scope: String,
    pub dst_scope: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveOutcome {
    /// Destination has the object, source does not.
    Moved,
    /// Destination has the object and the source still does too.
    Copied,
    /// Destination already held an object with that name; nothing changed.
    Skipped,
    Error,
}

impl MoveOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            MoveOutcome::Moved => "moved",
            MoveOutcome::Copied => "copied",
            MoveOutcome::Skipped => "skipped",
            MoveOutcome::Error => "error",
        }
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field order is the audit CSV column order.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuditRecord {
    pub timestamp: String,
    pub object_name: String,
    pub object_type: String,
    pub src_scope: String,
    pub dst_scope: String,
    pub outcome: MoveOutcome,
    pub message: String,
    pub summary: String,
    pub entry_xml: String,
}

#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct OutcomeTally {
    pub moved: usize,
    pub copied: usize,
    pub skipped: usize,
    pub error: usize,
}

impl OutcomeTally {
    pub fn record(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Moved => self.moved += 1,
            MoveOutcome::Copied => self.copied += 1,
            MoveOutcome::Skipped => self.skipped += 1,
            MoveOutcome::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.moved + self.copied + self.skipped + self.error
    }
}

#[derive(Serialize, Debug)]
pub struct RunSummary {
    pub processed: usize,
    pub audit_file: String,
    pub collision_policy: String,
    pub outcomes: OutcomeTally,
    pub records: Vec<AuditRecord>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CleanupItem {
    pub object_name: String,
    pub object_type: String,
    pub src_scope: String,
    pub dst_scope: String,
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct AuditReport {
    pub audit_file: String,
    pub outcomes: OutcomeTally,
    pub needs_cleanup: Vec<CleanupItem>,
}

#[derive(Serialize, Debug)]
pub struct XpathReport {
    pub scope: String,
    pub object_type: String,
    pub xpath: String,
}
