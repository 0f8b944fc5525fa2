use anyhow::Result;
use k8s_openapi::api::core::v1::Pod;
use tracing::info;

use crate::config::Cli;
use crate::domain::aggregator::Aggregator;
use crate::infrastructure::encoders::create_encoder;
use crate::infrastructure::encoders::OutputFormat;
use crate::infrastructure::k8s::convert::convert_pods;
use crate::infrastructure::k8s::PodSource;
use crate::infrastructure::kube_client::init_kube_client;

/// List pods as configured by `cli` and return the encoded report.
pub async fn run(cli: &Cli) -> Result<String> {
    let client = init_kube_client(&cli.client_settings())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize kubernetes client: {e:?}"))?;

    let pods = PodSource::new(client)
        .list(&cli.pod_query())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list pods: {e:?}"))?;

    let aggregator = Aggregator::new(cli.resources.clone()).parallel(cli.parallel);
    render_report(&pods, &aggregator, cli.output)
}

/// Convert, aggregate and encode an already fetched listing.
pub fn render_report(
    pods: &[Pod],
    aggregator: &Aggregator,
    format: OutputFormat,
) -> Result<String> {
    let specs = convert_pods(pods)
        .map_err(|e| anyhow::anyhow!("Failed to read pod resources: {e:?}"))?;

    let results = aggregator.aggregate(&specs);
    info!(
        pods = results.len(),
        resources = %aggregator.names(),
        "aggregated pod requirements"
    );

    create_encoder(format)
        .encode(&results.to_report())
        .map_err(|e| anyhow::anyhow!("Failed to encode report: {e:?}"))
}
