use std::path::Path;
use std::path::PathBuf;

use error_stack::Report;
use error_stack::ResultExt;
use kube::config::KubeConfigOptions;
use kube::config::Kubeconfig;
use kube::Client;
use kube::Config;
use tracing::info;

use crate::infrastructure::k8s::KubernetesError;

/// Where the cluster connection comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSettings {
    /// Explicit kubeconfig file. An empty path counts as unset.
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context to use instead of the file's current context
    pub context: Option<String>,
}

impl ClientSettings {
    fn kubeconfig_path(&self) -> Option<&Path> {
        self.kubeconfig
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    fn kubeconfig_options(&self) -> KubeConfigOptions {
        KubeConfigOptions {
            context: self.context.clone(),
            ..Default::default()
        }
    }
}

/// Build a client for the cluster named by `settings`.
///
/// Without a kubeconfig file or context the in-cluster service account is
/// tried first, then the default kubeconfig. A context alone selects it
/// from the default kubeconfig.
///
/// # Errors
///
/// - [`KubernetesError::ConnectionFailed`] if no usable configuration is found
pub async fn init_kube_client(
    settings: &ClientSettings,
) -> Result<Client, Report<KubernetesError>> {
    let config = load_config(settings).await?;
    info!(cluster_url = %config.cluster_url, "connecting to cluster");

    Client::try_from(config).change_context(KubernetesError::ConnectionFailed {
        message: "cannot build a client from the loaded configuration".to_string(),
    })
}

async fn load_config(settings: &ClientSettings) -> Result<Config, Report<KubernetesError>> {
    match (settings.kubeconfig_path(), &settings.context) {
        (Some(path), context) => {
            info!(path = %path.display(), ?context, "loading kubeconfig file");
            let kubeconfig =
                Kubeconfig::read_from(path).change_context(KubernetesError::ConnectionFailed {
                    message: format!("cannot read kubeconfig {}", path.display()),
                })?;
            Config::from_custom_kubeconfig(kubeconfig, &settings.kubeconfig_options())
                .await
                .change_context(KubernetesError::ConnectionFailed {
                    message: format!("kubeconfig {} has no usable context", path.display()),
                })
        }
        (None, Some(context)) => {
            info!(%context, "loading context from the default kubeconfig");
            Config::from_kubeconfig(&settings.kubeconfig_options())
                .await
                .change_context(KubernetesError::ConnectionFailed {
                    message: format!("context {context} not found in the default kubeconfig"),
                })
        }
        (None, None) => {
            info!("inferring in-cluster or default kubeconfig configuration");
            Config::infer()
                .await
                .change_context(KubernetesError::ConnectionFailed {
                    message: "no in-cluster environment or default kubeconfig found".to_string(),
                })
        }
    }
}
