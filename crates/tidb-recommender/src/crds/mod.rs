pub mod common;
pub mod tidb_cluster;
pub mod tidb_monitor;

pub use common::{ComponentSpec, ResourceRequirements, ResourceValues, ServiceSpec, StorageClaim};
pub use tidb_cluster::{
    PdConfig, PdReplicationConfig, PdSpec, PumpSpec, TidbCluster, TidbClusterSpec, TidbServiceSpec,
    TidbSpec, TiflashSpec, TikvSpec,
};
pub use tidb_monitor::{
    GrafanaSpec, InitializerSpec, MonitorContainer, PrometheusSpec, ReloaderSpec, TidbClusterRef,
    TidbMonitor, TidbMonitorSpec,
};
