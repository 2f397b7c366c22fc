//! Recommender inputs: the per-call `ClusterConfig` and the process-level `Settings`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RecommendError, Result};

/// Environment variable prefix read by [`Settings::from_env`].
pub const ENV_PREFIX: &str = "TIPOCKET_";

/// Knobs a caller supplies for a single recommendation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    /// Tag used for every component whose image is not overridden.
    #[serde(default)]
    pub image_version: String,

    #[serde(default = "crate::defaults::tikv_replicas")]
    pub tikv_replicas: i32,

    #[serde(default)]
    pub pd_image: String,

    #[serde(default)]
    pub tikv_image: String,

    #[serde(default)]
    pub tidb_image: String,

    #[serde(default)]
    pub tiflash_image: String,

    /// TiFlash is only added when this is positive.
    #[serde(default)]
    pub tiflash_replicas: i32,

    /// Comma-separated chaos scenario names, e.g. `"delay_tikv,errno_pd"`.
    #[serde(default)]
    pub nemesis: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            image_version: String::new(),
            tikv_replicas: crate::defaults::tikv_replicas(),
            pd_image: String::new(),
            tikv_image: String::new(),
            tidb_image: String::new(),
            tiflash_image: String::new(),
            tiflash_replicas: 0,
            nemesis: String::new(),
        }
    }
}

impl ClusterConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Where images are pulled from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySettings {
    /// Registry mirror, e.g. `hub.example.com`. Empty means Docker Hub.
    #[serde(default)]
    pub hub_address: String,

    #[serde(default = "crate::defaults::docker_repository")]
    pub docker_repository: String,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            hub_address: String::new(),
            docker_repository: crate::defaults::docker_repository(),
        }
    }
}

/// Environment-level settings shared by every recommendation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(flatten)]
    pub registry: RegistrySettings,

    #[serde(default = "crate::defaults::local_volume_storage_class")]
    pub local_volume_storage_class: String,

    /// Service type of the Grafana endpoint.
    #[serde(default = "crate::defaults::tidb_monitor_svc_type")]
    pub tidb_monitor_svc_type: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry: RegistrySettings::default(),
            local_volume_storage_class: crate::defaults::local_volume_storage_class(),
            tidb_monitor_svc_type: crate::defaults::tidb_monitor_svc_type(),
        }
    }
}

impl Settings {
    /// Load settings from `TIPOCKET_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    ///
    /// Keys are the upper-case field names prefixed with [`ENV_PREFIX`].
    /// Missing keys keep their defaults; a key set to an empty string is
    /// only accepted for `HUB_ADDRESS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(hub) = get("HUB_ADDRESS") {
            settings.registry.hub_address = hub.trim().to_string();
        }
        if let Some(repo) = get("DOCKER_REPOSITORY") {
            settings.registry.docker_repository = repo.trim().to_string();
        }
        if let Some(class) = get("LOCAL_VOLUME_STORAGE_CLASS") {
            settings.local_volume_storage_class = class.trim().to_string();
        }
        if let Some(svc_type) = get("TIDB_MONITOR_SVC_TYPE") {
            settings.tidb_monitor_svc_type = svc_type.trim().to_string();
        }
        settings.validate()?;

        debug!(
            hub_address = %settings.registry.hub_address,
            docker_repository = %settings.registry.docker_repository,
            storage_class = %settings.local_volume_storage_class,
            "Loaded recommender settings"
        );
        Ok(settings)
    }

    /// Load settings from YAML; absent keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Every field except the hub address must be non-blank.
    fn validate(&self) -> Result<()> {
        let required = [
            ("DOCKER_REPOSITORY", &self.registry.docker_repository),
            ("LOCAL_VOLUME_STORAGE_CLASS", &self.local_volume_storage_class),
            ("TIDB_MONITOR_SVC_TYPE", &self.tidb_monitor_svc_type),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(RecommendError::Config(format!(
                    "{ENV_PREFIX}{name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_settings_defaults_when_nothing_set() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.registry.hub_address.is_empty());
        assert_eq!(settings.registry.docker_repository, "pingcap");
        assert_eq!(settings.local_volume_storage_class, "local-storage");
        assert_eq!(settings.tidb_monitor_svc_type, "ClusterIP");
    }

    #[test]
    fn test_settings_from_lookup_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("TIPOCKET_HUB_ADDRESS", "hub.example.com"),
            ("TIPOCKET_DOCKER_REPOSITORY", "mirror"),
            ("TIPOCKET_LOCAL_VOLUME_STORAGE_CLASS", "fast-disks"),
            ("TIPOCKET_TIDB_MONITOR_SVC_TYPE", "NodePort"),
        ]))
        .unwrap();
        assert_eq!(settings.registry.hub_address, "hub.example.com");
        assert_eq!(settings.registry.docker_repository, "mirror");
        assert_eq!(settings.local_volume_storage_class, "fast-disks");
        assert_eq!(settings.tidb_monitor_svc_type, "NodePort");
    }

    #[test]
    fn test_settings_rejects_empty_repository() {
        let err = Settings::from_lookup(lookup_from(&[("TIPOCKET_DOCKER_REPOSITORY", "  ")]))
            .unwrap_err();
        assert!(matches!(err, RecommendError::Config(_)));
    }

    #[test]
    fn test_settings_empty_hub_address_is_allowed() {
        let settings =
            Settings::from_lookup(lookup_from(&[("TIPOCKET_HUB_ADDRESS", "")])).unwrap();
        assert!(settings.registry.hub_address.is_empty());
    }

    #[test]
    fn test_settings_from_yaml() {
        let settings = Settings::from_yaml("hubAddress: hub.local\nlocalVolumeStorageClass: ssd\n")
            .unwrap();
        assert_eq!(settings.registry.hub_address, "hub.local");
        assert_eq!(settings.registry.docker_repository, "pingcap");
        assert_eq!(settings.local_volume_storage_class, "ssd");
        assert_eq!(settings.tidb_monitor_svc_type, "ClusterIP");
    }

    #[test]
    fn test_settings_from_yaml_rejects_blank_values() {
        for yaml in [
            "dockerRepository: ''\n",
            "localVolumeStorageClass: ' '\n",
            "tidbMonitorSvcType: ''\n",
        ] {
            let err = Settings::from_yaml(yaml).unwrap_err();
            assert!(matches!(err, RecommendError::Config(_)), "{yaml}");
        }
        let settings = Settings::from_yaml("hubAddress: ''\n").unwrap();
        assert!(settings.registry.hub_address.is_empty());
    }

    #[test]
    fn test_cluster_config_defaults() {
        let config: ClusterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClusterConfig::default());
        assert_eq!(config.tikv_replicas, 3);
        assert_eq!(config.tiflash_replicas, 0);
        assert!(config.nemesis.is_empty());
    }

    #[test]
    fn test_cluster_config_from_yaml() {
        let config = ClusterConfig::from_yaml(
            "imageVersion: v4.0.0\ntikvReplicas: 5\ntiflashReplicas: 1\nnemesis: delay_tikv\n",
        )
        .unwrap();
        assert_eq!(config.image_version, "v4.0.0");
        assert_eq!(config.tikv_replicas, 5);
        assert_eq!(config.tiflash_replicas, 1);
        assert_eq!(config.nemesis, "delay_tikv");
    }

    #[test]
    fn test_cluster_config_bad_yaml() {
        let err = ClusterConfig::from_yaml("tikvReplicas: [").unwrap_err();
        assert!(matches!(err, RecommendError::Yaml(_)));
    }
}
