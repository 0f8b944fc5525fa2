use std::fmt;

use crate::domain::requirements::ResourceRequirements;

/// The kinds of containers a pod can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerCategory {
    /// Run to completion before the pod's main containers start
    Init,
    /// The pod's main containers
    Standard,
    /// Injected later for debugging
    Ephemeral,
}

impl ContainerCategory {
    /// Every category, in traversal order.
    pub const ALL: [ContainerCategory; 3] = [
        ContainerCategory::Init,
        ContainerCategory::Standard,
        ContainerCategory::Ephemeral,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ContainerCategory::Init => "init",
            ContainerCategory::Standard => "standard",
            ContainerCategory::Ephemeral => "ephemeral",
        }
    }
}

impl fmt::Display for ContainerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A container and the resources it declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub resources: ResourceRequirements,
}

impl Container {
    pub fn new(name: impl Into<String>, resources: ResourceRequirements) -> Self {
        Self {
            name: name.into(),
            resources,
        }
    }
}

/// The parts of a pod that matter for aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodSpec {
    pub name: String,
    pub init_containers: Vec<Container>,
    pub containers: Vec<Container>,
    pub ephemeral_containers: Vec<Container>,
}

impl PodSpec {
    /// A pod without containers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Appends `container` to the given category.
    #[must_use]
    pub fn with_container(mut self, category: ContainerCategory, container: Container) -> Self {
        self.containers_mut(category).push(container);
        self
    }

    pub fn containers_of(&self, category: ContainerCategory) -> &[Container] {
        match category {
            ContainerCategory::Init => &self.init_containers,
            ContainerCategory::Standard => &self.containers,
            ContainerCategory::Ephemeral => &self.ephemeral_containers,
        }
    }

    fn containers_mut(&mut self, category: ContainerCategory) -> &mut Vec<Container> {
        match category {
            ContainerCategory::Init => &mut self.init_containers,
            ContainerCategory::Standard => &mut self.containers,
            ContainerCategory::Ephemeral => &mut self.ephemeral_containers,
        }
    }

    /// Every container of the pod, category by category in [`ContainerCategory::ALL`] order.
    pub fn sub_units(&self) -> impl Iterator<Item = (ContainerCategory, &Container)> {
        ContainerCategory::ALL.into_iter().flat_map(move |category| {
            self.containers_of(category)
                .iter()
                .map(move |container| (category, container))
        })
    }

    pub fn container_count(&self) -> usize {
        ContainerCategory::ALL
            .iter()
            .map(|category| self.containers_of(*category).len())
            .sum()
    }
}
