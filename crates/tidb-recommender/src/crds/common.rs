use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fields shared by every TiDB component spec.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    /// Fully-qualified container image.
    #[serde(default)]
    pub image: String,

    /// Extra Pod annotations (e.g. chaos webhook requests).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl ComponentSpec {
    pub fn with_image(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            annotations: None,
        }
    }

    /// Set a single annotation, overwriting any previous value for the key.
    pub fn annotate(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }
}

/// Resource requests and limits.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceRequirements {
    /// Resource requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<ResourceValues>,

    /// Resource limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<ResourceValues>,
}

/// CPU, memory and storage values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceValues {
    /// CPU (e.g., "500m", "2").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,

    /// Memory (e.g., "1Gi", "4Gi").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,

    /// Volume size; only meaningful on requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
}

impl ResourceValues {
    pub fn compute(cpu: &str, memory: &str) -> Self {
        Self {
            cpu: Some(cpu.to_string()),
            memory: Some(memory.to_string()),
            storage: None,
        }
    }

    /// Iterate the present (kind, quantity) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("cpu", self.cpu.as_deref()),
            ("memory", self.memory.as_deref()),
            ("storage", self.storage.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.map(|v| (kind, v)))
    }

    pub fn get(&self, kind: &str) -> Option<&str> {
        match kind {
            "cpu" => self.cpu.as_deref(),
            "memory" => self.memory.as_deref(),
            "storage" => self.storage.as_deref(),
            _ => None,
        }
    }
}

/// A dedicated volume claim for components with more than one data volume.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageClaim {
    #[serde(default)]
    pub resources: ResourceRequirements,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class_name: Option<String>,
}

/// Kubernetes Service exposure settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ServiceSpec {
    /// Service type: ClusterIP, NodePort, LoadBalancer.
    #[serde(rename = "type")]
    pub type_: String,
}
