use thiserror::Error;

/// Errors that can occur during Kubernetes operations.
#[derive(Debug, Error)]
pub enum KubernetesError {
    #[error("Failed to connect to Kubernetes API: {message}")]
    ConnectionFailed { message: String },
    #[error("Failed to list pods: {message}")]
    ListFailed { message: String },
    #[error("Invalid {kind} quantity for `{resource}` in container {container} of pod {pod}: {value}")]
    InvalidQuantity {
        pod: String,
        container: String,
        kind: RequirementKind,
        resource: String,
        value: String,
    },
}

/// Which half of a container's resources a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RequirementKind {
    #[display("request")]
    Request,
    #[display("limit")]
    Limit,
}
