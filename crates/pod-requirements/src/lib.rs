//! Aggregated resource requests and limits per Kubernetes pod.
//!
//! Quantities are summed exactly (see [`quantity::Quantity`]) across the init,
//! standard and ephemeral containers of each pod, and the results are kept in
//! the order the pods were listed.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod quantity;

pub use domain::aggregator;
pub use domain::aggregator::aggregate;
pub use domain::aggregator::aggregate_parallel;
pub use domain::aggregator::Aggregator;
pub use domain::pod::Container;
pub use domain::pod::ContainerCategory;
pub use domain::pod::PodSpec;
pub use domain::requirements::PodRequirements;
pub use domain::requirements::ResourceList;
pub use domain::requirements::ResourceNames;
pub use domain::requirements::ResourceRequirements;
pub use domain::requirements::ResultList;
pub use infrastructure::encoders;
pub use infrastructure::k8s;
pub use infrastructure::kube_client;
pub use quantity::ParseQuantityError;
pub use quantity::Quantity;
