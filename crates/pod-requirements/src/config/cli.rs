use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use utils::version;

use crate::domain::requirements::ResourceNames;
use crate::infrastructure::encoders::OutputFormat;
use crate::infrastructure::k8s::pod_source::DEFAULT_PAGE_SIZE;
use crate::infrastructure::k8s::PodQuery;
use crate::infrastructure::kube_client::ClientSettings;

/// Report the aggregated resource requests and limits of every pod.
#[derive(Debug, Parser)]
#[command(about, long_about, version = &**version::VERSION)]
pub struct Cli {
    #[arg(
        long,
        env = "KUBECONFIG",
        value_hint = clap::ValueHint::FilePath,
        help = "Path to kubeconfig file (empty or unset: in-cluster config, then ~/.kube/config)"
    )]
    pub kubeconfig: Option<PathBuf>,

    #[arg(long, help = "Kubeconfig context to use instead of the current context")]
    pub context: Option<String>,

    #[arg(
        long,
        short = 'n',
        env = "POD_NAMESPACE",
        help = "Namespace to list pods from (empty for all namespaces)"
    )]
    pub namespace: Option<String>,

    #[arg(
        long,
        short = 'l',
        help = "Only list pods matching this label selector, e.g. app=web"
    )]
    pub label_selector: Option<String>,

    #[arg(
        long,
        help = "Only list pods matching this field selector, e.g. spec.nodeName=node-1"
    )]
    pub field_selector: Option<String>,

    #[arg(
        long,
        default_value = "cpu,memory",
        help = "Comma separated resource names to aggregate"
    )]
    pub resources: ResourceNames,

    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    #[arg(
        long,
        default_value_t = DEFAULT_PAGE_SIZE,
        help = "Pods fetched per list request, 0 to fetch all at once"
    )]
    pub page_size: u32,

    #[arg(
        long,
        help = "Aggregate pods on all cores",
        default_value_t = false,
        action = clap::ArgAction::Set
    )]
    pub parallel: bool,

    #[arg(
        long,
        env = "LOG_LEVEL",
        default_value = "info",
        help = "Default log level for stderr output, overridden by RUST_LOG"
    )]
    pub log_level: LevelFilter,
}

impl Cli {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            kubeconfig: self.kubeconfig.clone(),
            context: self.context.clone().filter(|context| !context.is_empty()),
        }
    }

    pub fn pod_query(&self) -> PodQuery {
        PodQuery {
            namespace: self.namespace.clone().filter(|ns| !ns.is_empty()),
            label_selector: self.label_selector.clone(),
            field_selector: self.field_selector.clone(),
            page_size: self.page_size,
        }
    }
}
