use error_stack::Report;
use error_stack::ResultExt;
use k8s_openapi::api::core::v1::Pod;
use kube::api::ListParams;
use kube::Api;
use kube::Client;
use tracing::debug;
use tracing::info;

use crate::infrastructure::k8s::types::KubernetesError;

/// Default number of pods requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// What to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodQuery {
    /// Namespace to list (None for all namespaces)
    pub namespace: Option<String>,
    /// e.g. `app=web,tier!=cache`
    pub label_selector: Option<String>,
    /// e.g. `spec.nodeName=node-1`
    pub field_selector: Option<String>,
    /// Pods per request; 0 disables pagination
    pub page_size: u32,
}

impl Default for PodQuery {
    fn default() -> Self {
        Self {
            namespace: None,
            label_selector: None,
            field_selector: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Lists pods from the Kubernetes API.
pub struct PodSource {
    client: Client,
}

impl PodSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch every pod matching `query`, following continue tokens until the
    /// server reports the listing complete. Pods keep the order the server
    /// returned them in.
    ///
    /// # Errors
    ///
    /// - [`KubernetesError::ListFailed`] if any page request fails
    #[tracing::instrument(skip(self), fields(namespace = ?query.namespace))]
    pub async fn list(&self, query: &PodQuery) -> Result<Vec<Pod>, Report<KubernetesError>> {
        let api: Api<Pod> = match &query.namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };

        let mut pods = Vec::new();
        let mut continue_token: Option<String> = None;
        let mut pages = 0_usize;

        loop {
            let params = list_params(query, continue_token.as_deref());
            let page = api
                .list(&params)
                .await
                .change_context(KubernetesError::ListFailed {
                    message: format!(
                        "pod list request failed after {pages} page(s) in {}",
                        query.namespace.as_deref().unwrap_or("all namespaces")
                    ),
                })
                .attach_printable_lazy(|| format!("page size: {}", query.page_size))?;
            pages += 1;
            debug!(page = pages, items = page.items.len(), "received pod page");
            pods.extend(page.items);

            match page.metadata.continue_ {
                Some(token) if !token.is_empty() => continue_token = Some(token),
                _ => break,
            }
        }

        info!(pods = pods.len(), pages, "listed pods");
        Ok(pods)
    }
}

/// Parameters for one page of a listing.
pub(crate) fn list_params(query: &PodQuery, continue_token: Option<&str>) -> ListParams {
    let mut params = ListParams::default();
    if query.page_size > 0 {
        params = params.limit(query.page_size);
    }
    if let Some(labels) = &query.label_selector {
        params = params.labels(labels);
    }
    if let Some(fields) = &query.field_selector {
        params = params.fields(fields);
    }
    if let Some(token) = continue_token {
        params = params.continue_token(token);
    }
    params
}
