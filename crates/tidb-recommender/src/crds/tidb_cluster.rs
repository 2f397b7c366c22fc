use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{ComponentSpec, ResourceRequirements, ServiceSpec, StorageClaim};

/// Desired state of a TiDB cluster as understood by tidb-operator.
#[derive(CustomResource, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "pingcap.com",
    version = "v1alpha1",
    kind = "TidbCluster",
    namespaced,
    shortname = "tc",
    derive = "PartialEq",
    printcolumn = r#"{"name":"PD","type":"integer","jsonPath":".spec.pd.replicas"}"#,
    printcolumn = r#"{"name":"TiKV","type":"integer","jsonPath":".spec.tikv.replicas"}"#,
    printcolumn = r#"{"name":"TiDB","type":"integer","jsonPath":".spec.tidb.replicas"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct TidbClusterSpec {
    pub timezone: String,

    /// Reclaim policy for released PersistentVolumes.
    #[serde(rename = "pvReclaimPolicy")]
    pub pv_reclaim_policy: String,

    /// Reclaim PVs once their Pods are scaled in.
    #[serde(default, rename = "enablePVReclaim")]
    pub enable_pv_reclaim: Option<bool>,

    pub image_pull_policy: String,

    pub pd: PdSpec,

    pub tikv: TikvSpec,

    pub tidb: TidbSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiflash: Option<TiflashSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump: Option<PumpSpec>,
}

/// Placement driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PdSpec {
    pub replicas: i32,

    #[serde(flatten)]
    pub component: ComponentSpec,

    #[serde(flatten)]
    pub resources: ResourceRequirements,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PdConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PdConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication: Option<PdReplicationConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct PdReplicationConfig {
    /// Required for TiFlash replicas to be scheduled by placement rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_placement_rules: Option<bool>,
}

/// Row storage engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TikvSpec {
    pub replicas: i32,

    #[serde(flatten)]
    pub component: ComponentSpec,

    #[serde(flatten)]
    pub resources: ResourceRequirements,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class_name: Option<String>,

    /// `Some(0)` disables operator-driven failover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_failover_count: Option<i32>,
}

/// SQL layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TidbSpec {
    pub replicas: i32,

    #[serde(flatten)]
    pub component: ComponentSpec,

    #[serde(flatten)]
    pub resources: ResourceRequirements,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<TidbServiceSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_failover_count: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TidbServiceSpec {
    #[serde(flatten)]
    pub service: ServiceSpec,

    /// Expose the status port next to the MySQL port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expose_status: Option<bool>,
}

/// Columnar analytical engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TiflashSpec {
    pub replicas: i32,

    #[serde(flatten)]
    pub component: ComponentSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_failover_count: Option<i32>,

    #[serde(default)]
    pub storage_claims: Vec<StorageClaim>,
}

/// Binlog pump.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PumpSpec {
    pub replicas: i32,

    pub base_image: String,

    #[serde(flatten)]
    pub resources: ResourceRequirements,
}

impl TidbClusterSpec {
    /// Component names of every role present, in a stable order.
    pub fn roles(&self) -> Vec<&'static str> {
        let mut roles = vec!["pd", "tikv", "tidb"];
        if self.tiflash.is_some() {
            roles.push("tiflash");
        }
        if self.pump.is_some() {
            roles.push("pump");
        }
        roles
    }

    /// Whether PD is configured to schedule replicas by placement rules.
    pub fn placement_rules_enabled(&self) -> bool {
        self.pd
            .config
            .as_ref()
            .and_then(|c| c.replication.as_ref())
            .and_then(|r| r.enable_placement_rules)
            .unwrap_or(false)
    }
}
