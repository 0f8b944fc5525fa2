//! Folds each pod's containers into one pod-level requirements record.
//!
//! Every container category counts: init, standard and ephemeral containers
//! are all summed. The result is the capacity a pod declares, not an estimate
//! of what runs at the same time.

use rayon::prelude::*;
use tracing::debug;
use tracing::trace;

use crate::domain::pod::PodSpec;
use crate::domain::requirements::PodRequirements;
use crate::domain::requirements::ResourceNames;
use crate::domain::requirements::ResourceRequirements;
use crate::domain::requirements::ResultList;

/// Sums the configured resource names over every container of every pod.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    names: ResourceNames,
    parallel: bool,
}

impl Aggregator {
    pub fn new(names: ResourceNames) -> Self {
        Self {
            names,
            parallel: false,
        }
    }

    /// Spread pods over the rayon thread pool. Output order is unaffected.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn names(&self) -> &ResourceNames {
        &self.names
    }

    /// One record per pod, in input order.
    pub fn aggregate(&self, pods: &[PodSpec]) -> ResultList {
        debug!(
            pods = pods.len(),
            resources = %self.names,
            parallel = self.parallel,
            "aggregating pod requirements"
        );
        if self.parallel {
            aggregate_parallel(pods, &self.names)
        } else {
            aggregate(pods, &self.names)
        }
    }
}

/// One record per pod, in input order.
pub fn aggregate(pods: &[PodSpec], names: &ResourceNames) -> ResultList {
    pods.iter().map(|pod| aggregate_pod(pod, names)).collect()
}

/// Same result as [`aggregate`], computing pods concurrently.
pub fn aggregate_parallel(pods: &[PodSpec], names: &ResourceNames) -> ResultList {
    // indexed collect keeps input order
    let items: Vec<PodRequirements> = pods
        .par_iter()
        .map(|pod| aggregate_pod(pod, names))
        .collect();
    items.into()
}

/// Requests and limits of `pod` summed over all of its containers.
///
/// Every name in `names` is present in the result, zero when no container
/// declares it.
pub fn aggregate_pod(pod: &PodSpec, names: &ResourceNames) -> PodRequirements {
    let mut totals = ResourceRequirements::zeroed(names);
    for (category, container) in pod.sub_units() {
        trace!(
            pod = %pod.name,
            container = %container.name,
            %category,
            "adding container resources"
        );
        totals.accumulate(&container.resources, names);
    }
    PodRequirements::new(pod.name.clone(), totals)
}
