use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::constants::{labels, values, CHAOSFS_DATA_KEY, CHAOSFS_PREFIX};

/// Build the ConfigMap the chaos admission webhook reads to inject the
/// chaosfs sidecar into one component's Pods.
///
/// Named `chaosfs-{component}` so it matches the annotation value placed on
/// the component spec.
pub fn build_io_chaos_configmap(namespace: &str, component: &str, payload: &str) -> ConfigMap {
    let cm_name = format!("{CHAOSFS_PREFIX}{component}");

    let mut data = BTreeMap::new();
    data.insert(CHAOSFS_DATA_KEY.into(), payload.to_string());

    ConfigMap {
        metadata: ObjectMeta {
            name: Some(cm_name),
            namespace: Some(namespace.into()),
            labels: Some(BTreeMap::from([(
                labels::COMPONENT.into(),
                values::COMPONENT_WEBHOOK.into(),
            )])),
            ..Default::default()
        },
        data: Some(data),
        ..Default::default()
    }
}
