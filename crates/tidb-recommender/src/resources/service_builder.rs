use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::constants::{defaults, labels, ports, values};

/// Build the client-facing Service for the TiDB SQL layer.
///
/// Exposes the MySQL protocol port and the status port on every node, and
/// selects TiDB Pods by component label.
pub fn build_tidb_endpoint_service(cluster_name: &str, namespace: &str) -> Service {
    let svc_name = format!("{cluster_name}-tidb");

    let service_ports = vec![
        ServicePort {
            name: Some(ports::NAME_MYSQL_CLIENT.into()),
            port: ports::MYSQL_CLIENT,
            ..Default::default()
        },
        ServicePort {
            name: Some(ports::NAME_STATUS.into()),
            port: ports::STATUS,
            ..Default::default()
        },
    ];

    Service {
        metadata: ObjectMeta {
            name: Some(svc_name),
            namespace: Some(namespace.into()),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            type_: Some(defaults::TIDB_SERVICE_TYPE.into()),
            selector: Some(tidb_selector()),
            ports: Some(service_ports),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn tidb_selector() -> BTreeMap<String, String> {
    BTreeMap::from([
        (labels::COMPONENT.into(), values::COMPONENT_TIDB.into()),
        (labels::NAME.into(), values::NAME_TIDB_CLUSTER.into()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tidb_endpoint_service() {
        let svc = build_tidb_endpoint_service("c1", "ns1");

        assert_eq!(svc.metadata.name.as_deref(), Some("c1-tidb"));
        assert_eq!(svc.metadata.namespace.as_deref(), Some("ns1"));
        let spec = svc.spec.as_ref().unwrap();
        assert_eq!(spec.type_.as_deref(), Some("NodePort"));

        let ports: Vec<_> = spec
            .ports
            .as_ref()
            .unwrap()
            .iter()
            .map(|p| (p.name.as_deref().unwrap(), p.port))
            .collect();
        assert_eq!(ports, vec![("mysql-client", 4000), ("status", 10080)]);
    }

    #[test]
    fn test_selector_targets_tidb_pods() {
        let svc = build_tidb_endpoint_service("c1", "ns1");
        let selector = svc.spec.as_ref().unwrap().selector.as_ref().unwrap();
        assert_eq!(selector.len(), 2);
        assert_eq!(selector.get(labels::COMPONENT).unwrap(), "tidb");
        assert_eq!(selector.get(labels::NAME).unwrap(), "tidb-cluster");
    }
}
