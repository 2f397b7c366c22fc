//! Default functions for serde defaults in `Settings` and `ClusterConfig`.

use crate::constants::defaults;

pub fn docker_repository() -> String {
    defaults::DOCKER_REPOSITORY.to_string()
}

pub fn local_volume_storage_class() -> String {
    defaults::LOCAL_VOLUME_STORAGE_CLASS.to_string()
}

pub fn tidb_monitor_svc_type() -> String {
    defaults::MONITOR_SERVICE_TYPE.to_string()
}

pub fn tikv_replicas() -> i32 {
    3
}
