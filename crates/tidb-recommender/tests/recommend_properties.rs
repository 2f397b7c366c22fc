//! Property-style tests for the cluster recommender.
//!
//! These tests check that recommendations always satisfy key invariants
//! across a grid of inputs.

use std::cmp::Ordering;

use tidb_recommender::crds::ResourceRequirements;
use tidb_recommender::resources::quantity;
use tidb_recommender::{ClusterConfig, Recommender, RegistrySettings, Settings};

const SCENARIOS: &[&str] = &[
    "",
    "delay_tikv",
    "errno_pd, mixed_tikv",
    "readerr_tiflash,delay_pd,,",
    " , unknown_x ,",
    "delay_tikv,delay_tikv,errno_tiflash",
];

fn configs() -> Vec<ClusterConfig> {
    let mut out = Vec::new();
    for tikv_replicas in [0, 1, 3, 5] {
        for tiflash_replicas in [-1, 0, 1, 3] {
            for image_version in ["", "v4.0.0", "nightly"] {
                for nemesis in SCENARIOS {
                    out.push(ClusterConfig {
                        image_version: image_version.into(),
                        tikv_replicas,
                        tiflash_replicas,
                        nemesis: nemesis.to_string(),
                        ..Default::default()
                    });
                }
            }
        }
    }
    out
}

fn assert_ordered(role: &str, resources: &ResourceRequirements) {
    let (Some(requests), Some(limits)) = (&resources.requests, &resources.limits) else {
        return;
    };
    for (kind, request) in requests.iter() {
        if let Some(limit) = limits.get(kind) {
            assert_ne!(
                quantity::compare(request, limit).unwrap(),
                Ordering::Greater,
                "{role}: {kind} request {request} exceeds limit {limit}"
            );
        }
    }
}

/// INVARIANT: requests never exceed limits for any role or resource kind.
#[test]
fn test_requests_never_exceed_limits() {
    let recommender = Recommender::default();
    for config in configs() {
        let mut r = recommender.recommend("ns", "c", &config);
        r.enable_pump(2);
        let spec = r.spec();

        assert_ordered("pd", &spec.pd.resources);
        assert_ordered("tikv", &spec.tikv.resources);
        assert_ordered("tidb", &spec.tidb.resources);
        for claim in spec.tiflash.iter().flat_map(|t| &t.storage_claims) {
            assert_ordered("tiflash", &claim.resources);
        }
        if let Some(pump) = &spec.pump {
            assert_ordered("pump", &pump.resources);
        }
        r.validate_resources().unwrap();
    }
}

/// INVARIANT: TiFlash exists iff its replica count is positive, and PD
/// placement rules are enabled iff TiFlash exists.
#[test]
fn test_tiflash_presence_drives_placement_rules() {
    let recommender = Recommender::default();
    for config in configs() {
        let r = recommender.recommend("ns", "c", &config);
        let spec = r.spec();
        assert_eq!(spec.tiflash.is_some(), config.tiflash_replicas > 0);
        assert_eq!(spec.placement_rules_enabled(), spec.tiflash.is_some());
    }
}

/// INVARIANT: recommending twice from the same input is deep-equal.
#[test]
fn test_recommendation_is_deterministic() {
    let recommender = Recommender::default();
    for config in configs() {
        let a = recommender.recommend("ns", "c", &config);
        let b = recommender.recommend("ns", "c", &config);
        assert_eq!(a, b);
    }
}

/// INVARIANT: every injection ConfigMap matches an annotation on a present role.
#[test]
fn test_every_injection_has_an_annotated_role() {
    let recommender = Recommender::default();
    for config in configs() {
        let r = recommender.recommend("ns", "c", &config);
        let spec = r.spec();
        for cm in &r.injection_config_maps {
            let name = cm.metadata.name.as_deref().unwrap();
            let component = match name {
                "chaosfs-tikv" => Some(&spec.tikv.component),
                "chaosfs-pd" => Some(&spec.pd.component),
                "chaosfs-tiflash" => spec.tiflash.as_ref().map(|t| &t.component),
                other => panic!("unexpected ConfigMap {other}"),
            };
            let annotations = component
                .and_then(|c| c.annotations.as_ref())
                .unwrap_or_else(|| panic!("{name} has no annotated role"));
            assert_eq!(
                annotations["admission-webhook.pingcap.com/request"],
                name
            );
        }
    }
}

#[test]
fn test_explicit_images_win_over_any_registry() {
    for hub in ["", "hub.example.com"] {
        let recommender = Recommender::new(Settings {
            registry: RegistrySettings {
                hub_address: hub.into(),
                docker_repository: "pingcap".into(),
            },
            ..Settings::default()
        });
        let r = recommender.recommend("ns", "c", &ClusterConfig {
            image_version: "v4.0.0".into(),
            pd_image: "a/pd:x".into(),
            tikv_image: "a/tikv:x".into(),
            tidb_image: "a/tidb:x".into(),
            tiflash_image: "a/tiflash:x".into(),
            tiflash_replicas: 1,
            ..Default::default()
        });
        let spec = r.spec();
        assert_eq!(spec.pd.component.image, "a/pd:x");
        assert_eq!(spec.tikv.component.image, "a/tikv:x");
        assert_eq!(spec.tidb.component.image, "a/tidb:x");
        assert_eq!(spec.tiflash.as_ref().unwrap().component.image, "a/tiflash:x");
    }
}

#[test]
fn test_no_registry_mirror_segment_by_default() {
    let r = Recommender::default().recommend("ns", "c", &ClusterConfig {
        image_version: "v4.0.0".into(),
        ..Default::default()
    });
    for image in [
        &r.spec().pd.component.image,
        &r.spec().tikv.component.image,
        &r.spec().tidb.component.image,
    ] {
        assert!(image.starts_with("pingcap/"), "{image}");
        assert_eq!(image.matches('/').count(), 1, "{image}");
    }
}
