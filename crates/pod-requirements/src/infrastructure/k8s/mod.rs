//! Kubernetes integration module.
//!
//! Lists pods from the API server and converts them into [`PodSpec`] records
//! for aggregation.
//!
//! The main components are:
//! - [`PodSource`]: Lists pods page by page, preserving server order
//! - [`PodQuery`]: Namespace, selectors and page size of a listing
//! - [`KubernetesError`]: Failures while connecting, listing or converting
//!
//! [`PodSpec`]: crate::domain::pod::PodSpec

pub mod convert;
pub mod pod_source;
pub mod types;

pub use pod_source::PodQuery;
pub use pod_source::PodSource;
pub use types::KubernetesError;
pub use types::RequirementKind;
