//! Order independence of the pod-level sums.

use pod_requirements::aggregate;
use pod_requirements::aggregate_parallel;
use pod_requirements::Container;
use pod_requirements::ContainerCategory;
use pod_requirements::PodSpec;
use pod_requirements::Quantity;
use pod_requirements::ResourceList;
use pod_requirements::ResourceNames;
use pod_requirements::ResourceRequirements;
use proptest::prelude::*;
use proptest::sample::subsequence;

const SUFFIXES: [&str; 8] = ["", "m", "k", "M", "Ki", "Mi", "Gi", "e2"];

fn quantity() -> impl Strategy<Value = Quantity> {
    (0u32..100_000, 0u32..1000, prop::sample::select(SUFFIXES.to_vec())).prop_map(
        |(whole, fraction, suffix)| {
            Quantity::parse(&format!("{whole}.{fraction:03}{suffix}")).unwrap()
        },
    )
}

fn resource_list() -> impl Strategy<Value = ResourceList> {
    let names = vec!["cpu", "memory", "ephemeral-storage"];
    (subsequence(names, 0..=3), prop::collection::vec(quantity(), 3))
        .prop_map(|(names, values)| names.into_iter().zip(values).collect::<ResourceList>())
}

fn container() -> impl Strategy<Value = (ContainerCategory, Container)> {
    (
        prop::sample::select(ContainerCategory::ALL.to_vec()),
        resource_list(),
        resource_list(),
    )
        .prop_map(|(category, requests, limits)| {
            (
                category,
                Container::new("c", ResourceRequirements::new(requests, limits)),
            )
        })
}

/// A container list paired with an arbitrary permutation of itself.
fn containers_and_permutation() -> impl Strategy<
    Value = (
        Vec<(ContainerCategory, Container)>,
        Vec<(ContainerCategory, Container)>,
    ),
> {
    prop::collection::vec(container(), 0..12).prop_flat_map(|containers| {
        let shuffled = Just(containers.clone()).prop_shuffle();
        (Just(containers), shuffled)
    })
}

fn build_pod(name: &str, containers: &[(ContainerCategory, Container)]) -> PodSpec {
    containers
        .iter()
        .cloned()
        .fold(PodSpec::new(name), |pod, (category, container)| {
            pod.with_container(category, container)
        })
}

proptest! {
    #[test]
    fn container_order_and_category_do_not_matter(
        (containers, shuffled) in containers_and_permutation(),
    ) {
        let names: ResourceNames = "cpu,memory,ephemeral-storage".parse().unwrap();
        let declared = build_pod("p", &containers);

        // any permutation, with every container moved into the standard category
        let flattened: Vec<_> = shuffled
            .into_iter()
            .map(|(_, container)| (ContainerCategory::Standard, container))
            .collect();
        let reordered = build_pod("p", &flattened);

        let expected = aggregate(&[declared], &names);
        let actual = aggregate(&[reordered], &names);
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn pod_totals_equal_column_sums(
        containers in prop::collection::vec(container(), 0..12),
    ) {
        let names = ResourceNames::default();
        let results = aggregate(&[build_pod("p", &containers)], &names);
        let totals = &results.items()[0];

        for name in names.iter() {
            let requests: Quantity = containers
                .iter()
                .map(|(_, c)| c.resources.requests.get(name))
                .sum();
            let limits: Quantity = containers
                .iter()
                .map(|(_, c)| c.resources.limits.get(name))
                .sum();
            prop_assert_eq!(totals.requests().get(name), requests);
            prop_assert_eq!(totals.limits().get(name), limits);
        }
    }

    #[test]
    fn parallel_preserves_input_order(
        pods in prop::collection::vec(prop::collection::vec(container(), 0..4), 0..40),
    ) {
        let pods: Vec<PodSpec> = pods
            .iter()
            .enumerate()
            .map(|(i, containers)| build_pod(&format!("pod-{i}"), containers))
            .collect();
        let names = ResourceNames::default();

        let sequential = aggregate(&pods, &names);
        let parallel = aggregate_parallel(&pods, &names);

        prop_assert_eq!(parallel.len(), pods.len());
        for (result, pod) in parallel.iter().zip(&pods) {
            prop_assert_eq!(result.pod(), pod.name.as_str());
        }
        prop_assert_eq!(parallel, sequential);
    }
}
