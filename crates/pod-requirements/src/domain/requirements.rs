use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use api_types::PodRequirementsEntry;
use api_types::PodRequirementsReport;
use api_types::RequirementsEntry;

use crate::quantity::Quantity;

/// Resource names aggregated when none are configured.
pub const DEFAULT_RESOURCE_NAMES: [&str; 2] = ["cpu", "memory"];

/// Quantities keyed by resource name. Names that are not present read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceList(BTreeMap<String, Quantity>);

impl ResourceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// The quantity declared for `name`, zero when absent.
    pub fn get(&self, name: &str) -> Quantity {
        self.0.get(name).copied().unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, quantity: Quantity) {
        self.0.insert(name.into(), quantity);
    }

    /// Adds `quantity` to the running value for `name`, creating it at zero.
    pub fn accumulate(&mut self, name: &str, quantity: Quantity) {
        match self.0.get_mut(name) {
            Some(total) => *total += quantity,
            None => {
                self.0.insert(name.to_string(), quantity);
            }
        }
    }

    /// Entries in resource name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.0.iter().map(|(name, quantity)| (name.as_str(), *quantity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn to_text_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(name, quantity)| (name.to_string(), quantity.to_text()))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Quantity)> for ResourceList {
    fn from_iter<I: IntoIterator<Item = (K, Quantity)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, quantity)| (name.into(), quantity))
                .collect(),
        )
    }
}

/// Requests (guaranteed minimum) and limits (hard ceiling) of a container or a
/// whole pod.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceRequirements {
    pub requests: ResourceList,
    pub limits: ResourceList,
}

impl ResourceRequirements {
    pub fn new(requests: ResourceList, limits: ResourceList) -> Self {
        Self { requests, limits }
    }

    /// Requirements holding an explicit zero for every name in `names`.
    pub fn zeroed(names: &ResourceNames) -> Self {
        let zeros = || {
            names
                .iter()
                .map(|name| (name, Quantity::ZERO))
                .collect::<ResourceList>()
        };
        Self {
            requests: zeros(),
            limits: zeros(),
        }
    }

    /// Adds the `names` entries of `other` into `self`, requests and limits
    /// independently. Names `other` leaves out contribute zero.
    pub fn accumulate(&mut self, other: &ResourceRequirements, names: &ResourceNames) {
        for name in names.iter() {
            self.requests.accumulate(name, other.requests.get(name));
            self.limits.accumulate(name, other.limits.get(name));
        }
    }
}

/// Ordered, duplicate-free list of resource names to aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames(Vec<String>);

impl ResourceNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self(unique)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ResourceNames {
    fn default() -> Self {
        Self::new(DEFAULT_RESOURCE_NAMES)
    }
}

impl fmt::Display for ResourceNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// Parses a comma separated list such as `cpu,memory,ephemeral-storage`.
impl FromStr for ResourceNames {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let names: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            return Err("at least one resource name is required".to_string());
        }
        Ok(Self::new(names))
    }
}

/// A pod name bound to the requirements aggregated over all of its containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodRequirements {
    pod: String,
    requirements: ResourceRequirements,
}

impl PodRequirements {
    pub fn new(pod: impl Into<String>, requirements: ResourceRequirements) -> Self {
        Self {
            pod: pod.into(),
            requirements,
        }
    }

    pub fn pod(&self) -> &str {
        &self.pod
    }

    pub fn requirements(&self) -> &ResourceRequirements {
        &self.requirements
    }

    pub fn requests(&self) -> &ResourceList {
        &self.requirements.requests
    }

    pub fn limits(&self) -> &ResourceList {
        &self.requirements.limits
    }

    fn to_entry(&self) -> PodRequirementsEntry {
        PodRequirementsEntry {
            pod: self.pod.clone(),
            requirements: RequirementsEntry {
                limits: self.limits().to_text_map(),
                requests: self.requests().to_text_map(),
            },
        }
    }
}

/// Aggregated pods in the order they were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultList(Vec<PodRequirements>);

impl ResultList {
    pub fn items(&self) -> &[PodRequirements] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PodRequirements> {
        self.0.iter()
    }

    /// Wire representation with every quantity rendered as canonical text.
    pub fn to_report(&self) -> PodRequirementsReport {
        PodRequirementsReport {
            items: self.0.iter().map(PodRequirements::to_entry).collect(),
        }
    }
}

impl From<Vec<PodRequirements>> for ResultList {
    fn from(items: Vec<PodRequirements>) -> Self {
        Self(items)
    }
}

impl FromIterator<PodRequirements> for ResultList {
    fn from_iter<I: IntoIterator<Item = PodRequirements>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ResultList {
    type Item = PodRequirements;
    type IntoIter = std::vec::IntoIter<PodRequirements>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultList {
    type Item = &'a PodRequirements;
    type IntoIter = std::slice::Iter<'a, PodRequirements>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    fn q(text: &str) -> Quantity {
        Quantity::parse(text).unwrap()
    }

    #[test]
    fn resource_list_reads_absent_names_as_zero() {
        let list: ResourceList = [("cpu", q("50m"))].into_iter().collect();
        assert_eq!(list.get("cpu"), q("50m"));
        assert_eq!(list.get("memory"), Quantity::ZERO);
        assert!(!list.contains("memory"));
    }

    #[test]
    fn resource_list_accumulates_in_place() {
        let mut list = ResourceList::new();
        list.accumulate("memory", q("1Gi"));
        list.accumulate("memory", q("0.1Gi"));
        assert_eq!(list.get("memory"), q("1.1Gi"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn accumulate_only_touches_configured_names() {
        let names = ResourceNames::default();
        let mut totals = ResourceRequirements::zeroed(&names);
        let container = ResourceRequirements::new(
            [("cpu", q("50m")), ("nvidia.com/gpu", q("1"))]
                .into_iter()
                .collect(),
            ResourceList::new(),
        );

        totals.accumulate(&container, &names);

        assert_eq!(totals.requests.get("cpu"), q("50m"));
        assert!(totals.requests.contains("memory"));
        assert!(!totals.requests.contains("nvidia.com/gpu"));
        assert_eq!(totals.limits.len(), 2);
    }

    #[test]
    fn resource_names_parse_and_dedupe() {
        let names: ResourceNames = "cpu, memory,cpu,,ephemeral-storage".parse().unwrap();
        assert_eq!(
            names.iter().collect::<Vec<_>>(),
            vec!["cpu", "memory", "ephemeral-storage"]
        );
        assert_eq!(names.to_string(), "cpu,memory,ephemeral-storage");
        assert!(" , ".parse::<ResourceNames>().is_err());
    }

    #[test]
    fn default_resource_names_are_cpu_and_memory() {
        assert_eq!(
            ResourceNames::default().iter().collect::<Vec<_>>(),
            vec!["cpu", "memory"]
        );
    }

    #[test]
    fn result_list_renders_report_in_order() {
        let names = ResourceNames::default();
        let mut first = ResourceRequirements::zeroed(&names);
        first.limits.insert("memory", q("2048Mi"));
        let results: ResultList = vec![
            PodRequirements::new("b", first),
            PodRequirements::new("a", ResourceRequirements::zeroed(&names)),
        ]
        .into();

        let report = results.to_report();

        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[0].pod, "b");
        assert_eq!(report.items[0].requirements.limits["memory"], "2Gi");
        assert_eq!(report.items[0].requirements.requests["cpu"], "0");
        assert_eq!(report.items[1].pod, "a");
    }
}
