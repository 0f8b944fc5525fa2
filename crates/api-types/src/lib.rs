//! Shared API type definitions
//!
//! This crate contains the wire format of the pod requirements report. Every
//! quantity is carried as its canonical text rendering, so the report can be
//! consumed without knowing how quantities are represented internally.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Requests and limits of one pod, keyed by resource name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequirementsEntry {
    /// Hard ceilings, e.g. `{"cpu": "600m", "memory": "2.5Gi"}`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub limits: BTreeMap<String, String>,
    /// Guaranteed minimums
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requests: BTreeMap<String, String>,
}

/// A pod name bound to its aggregated requirements
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PodRequirementsEntry {
    /// Pod name
    #[serde(rename = "Pod")]
    pub pod: String,
    /// Aggregated requirements across all containers of the pod
    #[serde(rename = "Requirements")]
    pub requirements: RequirementsEntry,
}

/// Report emitted for a pod listing, in listing order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PodRequirementsReport {
    #[serde(rename = "Items")]
    pub items: Vec<PodRequirementsEntry>,
}
