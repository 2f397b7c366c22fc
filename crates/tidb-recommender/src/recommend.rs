//! Turns a handful of knobs into a complete TidbCluster, TidbMonitor,
//! client Service and chaos injection ConfigMaps.
//!
//! Everything here is pure: the same `Settings`, namespace, name and
//! `ClusterConfig` always produce deep-equal output.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{ConfigMap, Service};
use serde::Serialize;
use tracing::debug;

use crate::chaos::{self, ChaosTarget};
use crate::config::{ClusterConfig, Settings};
use crate::constants::{self, components, defaults, labels, monitor, values};
use crate::crds::{
    ComponentSpec, GrafanaSpec, InitializerSpec, MonitorContainer, PdConfig, PdReplicationConfig,
    PdSpec, PrometheusSpec, PumpSpec, ReloaderSpec, ResourceRequirements, ServiceSpec,
    StorageClaim, TidbCluster, TidbClusterRef, TidbClusterSpec, TidbMonitor, TidbMonitorSpec,
    TidbServiceSpec, TidbSpec, TiflashSpec, TikvSpec,
};
use crate::error::{RecommendError, Result};
use crate::resources::{
    build_io_chaos_configmap, build_tidb_endpoint_service, profiles, quantity, resolve_image,
};

/// A recommended set of documents for one TiDB cluster under test.
#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
    pub tidb_cluster: TidbCluster,
    pub tidb_monitor: TidbMonitor,
    /// Client-facing endpoint for the SQL layer.
    pub service: Service,
    /// One ConfigMap per applied IO chaos scenario, in scenario order.
    pub injection_config_maps: Vec<ConfigMap>,
    /// Settings the tree was built with; roles added later resolve against them.
    settings: Settings,
}

/// Produces recommendations against a fixed set of environment settings.
#[derive(Clone, Debug, Default)]
pub struct Recommender {
    settings: Settings,
}

impl Recommender {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Build a recommender from `TIPOCKET_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Settings::from_env().map(Self::new)
    }

    /// Recommend a full cluster specification.
    ///
    /// Never fails: zero replicas, empty versions and unknown scenario names
    /// all yield a well-formed recommendation.
    pub fn recommend(&self, namespace: &str, name: &str, config: &ClusterConfig) -> Recommendation {
        let mut r = Recommendation {
            tidb_cluster: self.tidb_cluster(namespace, name, config),
            tidb_monitor: self.tidb_monitor(namespace, name),
            service: build_tidb_endpoint_service(name, namespace),
            injection_config_maps: Vec::new(),
            settings: self.settings.clone(),
        };

        if config.tiflash_replicas > 0 {
            r.enable_tiflash(&config.tiflash_image, config.tiflash_replicas);
        }
        r.derive_cross_role_settings();
        r.apply_nemesis(namespace, &config.nemesis);

        debug!(
            namespace,
            name,
            tikv_replicas = config.tikv_replicas,
            tiflash_replicas = config.tiflash_replicas,
            injections = r.injection_config_maps.len(),
            "Recommended TiDB cluster"
        );
        r
    }

    fn image(&self, component: &str, version: &str, explicit: &str) -> String {
        resolve_image(&self.settings.registry, component, version, explicit)
    }

    fn tidb_cluster(&self, namespace: &str, name: &str, config: &ClusterConfig) -> TidbCluster {
        let storage_class = Some(self.settings.local_volume_storage_class.clone());
        let version = config.image_version.as_str();

        let spec = TidbClusterSpec {
            timezone: defaults::TIMEZONE.into(),
            pv_reclaim_policy: defaults::PV_RECLAIM_POLICY.into(),
            enable_pv_reclaim: Some(true),
            image_pull_policy: defaults::CLUSTER_PULL_POLICY.into(),
            pd: PdSpec {
                replicas: defaults::PD_REPLICAS,
                component: ComponentSpec::with_image(self.image(
                    components::PD,
                    version,
                    &config.pd_image,
                )),
                resources: profiles::pd(),
                storage_class_name: storage_class.clone(),
                config: None,
            },
            tikv: TikvSpec {
                replicas: config.tikv_replicas,
                component: ComponentSpec::with_image(self.image(
                    components::TIKV,
                    version,
                    &config.tikv_image,
                )),
                resources: profiles::tikv(),
                storage_class_name: storage_class,
                // disable auto fail over
                max_failover_count: Some(0),
            },
            tidb: TidbSpec {
                replicas: defaults::TIDB_REPLICAS,
                component: ComponentSpec::with_image(self.image(
                    components::TIDB,
                    version,
                    &config.tidb_image,
                )),
                resources: profiles::tidb(),
                service: Some(TidbServiceSpec {
                    service: ServiceSpec {
                        type_: defaults::TIDB_SERVICE_TYPE.into(),
                    },
                    expose_status: Some(true),
                }),
                // disable auto fail over
                max_failover_count: Some(0),
            },
            tiflash: None,
            pump: None,
        };

        let mut cluster = TidbCluster::new(name, spec);
        cluster.metadata.namespace = Some(namespace.into());
        cluster.metadata.labels = Some(instance_labels(values::APP_TIDB_CLUSTER, name));
        cluster
    }

    fn tidb_monitor(&self, namespace: &str, name: &str) -> TidbMonitor {
        let spec = TidbMonitorSpec {
            clusters: vec![TidbClusterRef {
                namespace: namespace.into(),
                name: name.into(),
            }],
            persistent: false,
            prometheus: PrometheusSpec {
                container: MonitorContainer::new(
                    monitor::PROMETHEUS_IMAGE,
                    monitor::PROMETHEUS_VERSION,
                ),
                log_level: monitor::PROMETHEUS_LOG_LEVEL.into(),
            },
            grafana: Some(GrafanaSpec {
                container: MonitorContainer::new(monitor::GRAFANA_IMAGE, monitor::GRAFANA_VERSION),
                service: ServiceSpec {
                    type_: self.settings.tidb_monitor_svc_type.clone(),
                },
            }),
            initializer: InitializerSpec {
                container: MonitorContainer::new(
                    monitor::INITIALIZER_IMAGE,
                    monitor::INITIALIZER_VERSION,
                ),
            },
            reloader: ReloaderSpec {
                container: MonitorContainer::new(
                    monitor::RELOADER_IMAGE,
                    monitor::RELOADER_VERSION,
                ),
            },
            image_pull_policy: defaults::MONITOR_PULL_POLICY.into(),
        };

        let mut tm = TidbMonitor::new(name, spec);
        tm.metadata.namespace = Some(namespace.into());
        tm.metadata.labels = Some(instance_labels(values::APP_TIDB_MONITOR, name));
        tm
    }
}

impl Recommendation {
    pub fn spec(&self) -> &TidbClusterSpec {
        &self.tidb_cluster.spec
    }

    /// Add a binlog Pump unless one is already present.
    ///
    /// A second call is a no-op even with a different replica count.
    pub fn enable_pump(&mut self, replicas: i32) -> &mut Self {
        let spec = &mut self.tidb_cluster.spec;
        if spec.pump.is_none() {
            debug!(replicas, "Enabling pump");
            spec.pump = Some(PumpSpec {
                replicas,
                base_image: defaults::PUMP_IMAGE.into(),
                resources: profiles::medium(),
            });
        } else {
            debug!("Pump already present, leaving it unchanged");
        }
        self
    }

    /// Add TiFlash unless it is already present.
    ///
    /// The image and storage class resolve against the settings the
    /// recommendation was built with. Only the TiFlash role is added; PD
    /// placement rules are derived by [`Recommender::recommend`].
    pub fn enable_tiflash(&mut self, image: &str, replicas: i32) -> &mut Self {
        let settings = &self.settings;
        let spec = &mut self.tidb_cluster.spec;
        if spec.tiflash.is_some() {
            debug!("TiFlash already present, leaving it unchanged");
            return self;
        }

        debug!(replicas, "Enabling TiFlash");
        spec.tiflash = Some(TiflashSpec {
            replicas,
            component: ComponentSpec::with_image(resolve_image(
                &settings.registry,
                components::TIFLASH,
                "",
                image,
            )),
            max_failover_count: Some(0),
            storage_claims: vec![StorageClaim {
                resources: profiles::tiflash(),
                storage_class_name: Some(settings.local_volume_storage_class.clone()),
            }],
        });
        self
    }

    pub fn pd_replicas(&mut self, replicas: i32) -> &mut Self {
        self.tidb_cluster.spec.pd.replicas = replicas;
        self
    }

    pub fn tikv_replicas(&mut self, replicas: i32) -> &mut Self {
        self.tidb_cluster.spec.tikv.replicas = replicas;
        self
    }

    pub fn tidb_replicas(&mut self, replicas: i32) -> &mut Self {
        self.tidb_cluster.spec.tidb.replicas = replicas;
        self
    }

    /// Settings of one role that depend on which other roles exist.
    fn derive_cross_role_settings(&mut self) {
        let spec = &mut self.tidb_cluster.spec;
        if spec.tiflash.is_some() {
            spec.pd.config = Some(PdConfig {
                replication: Some(PdReplicationConfig {
                    enable_placement_rules: Some(true),
                }),
            });
        }
    }

    fn apply_nemesis(&mut self, namespace: &str, nemesis: &str) {
        for name in chaos::scenario_names(nemesis) {
            let Some(target) = ChaosTarget::from_scenario(name) else {
                continue;
            };

            let spec = &mut self.tidb_cluster.spec;
            let component = match target {
                ChaosTarget::Tikv => Some(&mut spec.tikv.component),
                ChaosTarget::Pd => Some(&mut spec.pd.component),
                ChaosTarget::Tiflash => spec.tiflash.as_mut().map(|t| &mut t.component),
            };
            let Some(component) = component else {
                debug!(scenario = name, "Target role absent, skipping scenario");
                continue;
            };

            component.annotate(constants::CHAOS_WEBHOOK_ANNOTATION, target.sidecar_name());
            self.injection_config_maps.push(build_io_chaos_configmap(
                namespace,
                target.component(),
                target.payload(),
            ));
            debug!(scenario = name, component = target.component(), "Applied IO chaos");
        }
    }

    /// Check `requests <= limits` for every role and resource kind.
    pub fn validate_resources(&self) -> Result<()> {
        for (role, resources) in self.role_resources() {
            let (Some(requests), Some(limits)) = (&resources.requests, &resources.limits) else {
                continue;
            };
            for (kind, request) in requests.iter() {
                let Some(limit) = limits.get(kind) else {
                    continue;
                };
                if quantity::compare(request, limit)? == Ordering::Greater {
                    return Err(RecommendError::ResourceOrdering {
                        role: role.to_string(),
                        kind: kind.to_string(),
                        request: request.to_string(),
                        limit: limit.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn role_resources(&self) -> Vec<(&'static str, &ResourceRequirements)> {
        let spec = &self.tidb_cluster.spec;
        let mut out = vec![
            (components::PD, &spec.pd.resources),
            (components::TIKV, &spec.tikv.resources),
            (components::TIDB, &spec.tidb.resources),
        ];
        if let Some(tiflash) = &spec.tiflash {
            out.extend(
                tiflash
                    .storage_claims
                    .iter()
                    .map(|claim| (components::TIFLASH, &claim.resources)),
            );
        }
        if let Some(pump) = &spec.pump {
            out.push(("pump", &pump.resources));
        }
        out
    }

    /// Render every document as one multi-document YAML stream.
    pub fn to_yaml(&self) -> Result<String> {
        let mut docs = vec![
            to_yaml_doc(&self.tidb_cluster)?,
            to_yaml_doc(&self.tidb_monitor)?,
            to_yaml_doc(&self.service)?,
        ];
        for cm in &self.injection_config_maps {
            docs.push(to_yaml_doc(cm)?);
        }
        Ok(docs.join("---\n"))
    }
}

fn to_yaml_doc<T: Serialize>(doc: &T) -> Result<String> {
    Ok(serde_yaml::to_string(doc)?)
}

fn instance_labels(app: &str, name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (labels::APP.into(), app.into()),
        (labels::INSTANCE.into(), name.into()),
    ])
}
