/// Kubernetes label keys following the app.kubernetes.io convention.
pub mod labels {
    pub const NAME: &str = "app.kubernetes.io/name";
    pub const COMPONENT: &str = "app.kubernetes.io/component";

    /// Short labels stamped on the recommended custom resources.
    pub const APP: &str = "app";
    pub const INSTANCE: &str = "instance";
}

/// Label values.
pub mod values {
    pub const APP_TIDB_CLUSTER: &str = "tipocket-tidbcluster";
    pub const APP_TIDB_MONITOR: &str = "tipocket-tidbmonitor";
    pub const NAME_TIDB_CLUSTER: &str = "tidb-cluster";
    pub const COMPONENT_TIDB: &str = "tidb";
    pub const COMPONENT_WEBHOOK: &str = "webhook";
}

/// Annotation read by the chaos admission webhook to decide which sidecar to inject.
pub const CHAOS_WEBHOOK_ANNOTATION: &str = "admission-webhook.pingcap.com/request";

/// Prefix shared by the injected sidecar name and its ConfigMap.
pub const CHAOSFS_PREFIX: &str = "chaosfs-";

/// Data key carrying the sidecar payload inside an injection ConfigMap.
pub const CHAOSFS_DATA_KEY: &str = "chaosfs";

/// Endpoint ports.
pub mod ports {
    pub const MYSQL_CLIENT: i32 = 4000;
    pub const STATUS: i32 = 10080;

    pub const NAME_MYSQL_CLIENT: &str = "mysql-client";
    pub const NAME_STATUS: &str = "status";
}

/// Component names used when resolving images.
pub mod components {
    pub const PD: &str = "pd";
    pub const TIKV: &str = "tikv";
    pub const TIDB: &str = "tidb";
    pub const TIFLASH: &str = "tiflash";
}

/// Fixed cluster-wide defaults.
pub mod defaults {
    pub const TIMEZONE: &str = "UTC";
    pub const PV_RECLAIM_POLICY: &str = "Delete";
    pub const CLUSTER_PULL_POLICY: &str = "Always";
    pub const MONITOR_PULL_POLICY: &str = "IfNotPresent";
    pub const TIDB_SERVICE_TYPE: &str = "NodePort";

    pub const PD_REPLICAS: i32 = 3;
    pub const TIDB_REPLICAS: i32 = 2;

    pub const PD_STORAGE: &str = "10Gi";
    pub const TIKV_STORAGE: &str = "200Gi";
    pub const TIFLASH_STORAGE: &str = "50Gi";

    pub const PUMP_IMAGE: &str = "pingcap/tidb-binlog";

    pub const DOCKER_REPOSITORY: &str = "pingcap";
    pub const LOCAL_VOLUME_STORAGE_CLASS: &str = "local-storage";
    pub const MONITOR_SERVICE_TYPE: &str = "ClusterIP";
}

/// Monitoring sidecar images; not configurable.
pub mod monitor {
    pub const PROMETHEUS_IMAGE: &str = "prom/prometheus";
    pub const PROMETHEUS_VERSION: &str = "v2.11.1";
    pub const PROMETHEUS_LOG_LEVEL: &str = "info";
    pub const GRAFANA_IMAGE: &str = "grafana/grafana";
    pub const GRAFANA_VERSION: &str = "6.0.1";
    pub const INITIALIZER_IMAGE: &str = "pingcap/tidb-monitor-initializer";
    pub const INITIALIZER_VERSION: &str = "v3.0.5";
    pub const RELOADER_IMAGE: &str = "pingcap/tidb-monitor-reloader";
    pub const RELOADER_VERSION: &str = "v1.0.1";
}
