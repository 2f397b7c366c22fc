use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::ServiceSpec;

/// Prometheus/Grafana stack scraping one or more TiDB clusters.
#[derive(CustomResource, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "pingcap.com",
    version = "v1alpha1",
    kind = "TidbMonitor",
    namespaced,
    shortname = "tm",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct TidbMonitorSpec {
    /// Clusters to monitor, referenced by identity only.
    pub clusters: Vec<TidbClusterRef>,

    /// Keep metrics on a PersistentVolume.
    #[serde(default)]
    pub persistent: bool,

    pub prometheus: PrometheusSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grafana: Option<GrafanaSpec>,

    pub initializer: InitializerSpec,

    pub reloader: ReloaderSpec,

    pub image_pull_policy: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TidbClusterRef {
    pub namespace: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonitorContainer {
    pub base_image: String,
    pub version: String,
}

impl MonitorContainer {
    pub fn new(base_image: &str, version: &str) -> Self {
        Self {
            base_image: base_image.to_string(),
            version: version.to_string(),
        }
    }

    pub fn image(&self) -> String {
        format!("{}:{}", self.base_image, self.version)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrometheusSpec {
    #[serde(flatten)]
    pub container: MonitorContainer,

    pub log_level: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GrafanaSpec {
    #[serde(flatten)]
    pub container: MonitorContainer,

    pub service: ServiceSpec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InitializerSpec {
    #[serde(flatten)]
    pub container: MonitorContainer,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReloaderSpec {
    #[serde(flatten)]
    pub container: MonitorContainer,
}
