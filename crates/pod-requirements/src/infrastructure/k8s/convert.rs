use std::collections::BTreeMap;

use error_stack::Report;
use error_stack::ResultExt;
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::api::core::v1::ResourceRequirements as K8sResourceRequirements;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity as K8sQuantity;

use crate::domain::pod::Container;
use crate::domain::pod::PodSpec;
use crate::domain::requirements::ResourceList;
use crate::domain::requirements::ResourceRequirements;
use crate::infrastructure::k8s::types::KubernetesError;
use crate::infrastructure::k8s::types::RequirementKind;
use crate::quantity::Quantity;

/// Pods without a name convert with an empty name; pods without a spec have
/// no containers.
impl TryFrom<&Pod> for PodSpec {
    type Error = Report<KubernetesError>;

    fn try_from(pod: &Pod) -> Result<Self, Self::Error> {
        let mut spec = PodSpec::new(pod.metadata.name.clone().unwrap_or_default());
        let Some(pod_spec) = &pod.spec else {
            return Ok(spec);
        };

        for container in pod_spec.init_containers.iter().flatten() {
            let converted =
                convert_container(&spec.name, &container.name, container.resources.as_ref())?;
            spec.init_containers.push(converted);
        }
        for container in &pod_spec.containers {
            let converted =
                convert_container(&spec.name, &container.name, container.resources.as_ref())?;
            spec.containers.push(converted);
        }
        for container in pod_spec.ephemeral_containers.iter().flatten() {
            let converted =
                convert_container(&spec.name, &container.name, container.resources.as_ref())?;
            spec.ephemeral_containers.push(converted);
        }

        Ok(spec)
    }
}

/// Convert a whole listing, stopping at the first pod with an undecodable quantity.
///
/// # Errors
///
/// - [`KubernetesError::InvalidQuantity`] naming the offending pod, container and resource
pub fn convert_pods(pods: &[Pod]) -> Result<Vec<PodSpec>, Report<KubernetesError>> {
    pods.iter().map(PodSpec::try_from).collect()
}

fn convert_container(
    pod: &str,
    container: &str,
    resources: Option<&K8sResourceRequirements>,
) -> Result<Container, Report<KubernetesError>> {
    let Some(resources) = resources else {
        return Ok(Container::new(container, ResourceRequirements::default()));
    };

    let requests = convert_list(
        pod,
        container,
        RequirementKind::Request,
        resources.requests.as_ref(),
    )?;
    let limits = convert_list(
        pod,
        container,
        RequirementKind::Limit,
        resources.limits.as_ref(),
    )?;
    Ok(Container::new(container, ResourceRequirements::new(requests, limits)))
}

fn convert_list(
    pod: &str,
    container: &str,
    kind: RequirementKind,
    list: Option<&BTreeMap<String, K8sQuantity>>,
) -> Result<ResourceList, Report<KubernetesError>> {
    list.into_iter()
        .flatten()
        .map(|(resource, value)| -> Result<_, Report<KubernetesError>> {
            let quantity =
                Quantity::parse(&value.0).change_context(KubernetesError::InvalidQuantity {
                    pod: pod.to_string(),
                    container: container.to_string(),
                    kind,
                    resource: resource.clone(),
                    value: value.0.clone(),
                })?;
            Ok((resource.as_str(), quantity))
        })
        .collect()
}
