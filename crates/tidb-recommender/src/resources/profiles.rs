use crate::constants::defaults;
use crate::crds::{ResourceRequirements, ResourceValues};

/// Shared profile used by PD and Pump.
pub fn medium() -> ResourceRequirements {
    ResourceRequirements {
        requests: Some(ResourceValues::compute("1000m", "1Gi")),
        limits: Some(ResourceValues::compute("2000m", "4Gi")),
    }
}

pub fn pd() -> ResourceRequirements {
    with_storage(medium(), defaults::PD_STORAGE)
}

pub fn tikv() -> ResourceRequirements {
    with_storage(
        ResourceRequirements {
            requests: Some(ResourceValues::compute("500m", "4Gi")),
            limits: Some(ResourceValues::compute("1000m", "16Gi")),
        },
        defaults::TIKV_STORAGE,
    )
}

pub fn tidb() -> ResourceRequirements {
    ResourceRequirements {
        requests: Some(ResourceValues::compute("1000m", "1Gi")),
        limits: Some(ResourceValues::compute("1000m", "16Gi")),
    }
}

pub fn tiflash() -> ResourceRequirements {
    with_storage(
        ResourceRequirements {
            requests: Some(ResourceValues::compute("1000m", "2Gi")),
            limits: Some(ResourceValues::compute("4000m", "16Gi")),
        },
        defaults::TIFLASH_STORAGE,
    )
}

/// Add a storage request to an existing set of requirements.
pub fn with_storage(mut resources: ResourceRequirements, size: &str) -> ResourceRequirements {
    resources
        .requests
        .get_or_insert_with(ResourceValues::default)
        .storage = Some(size.to_string());
    resources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_storage_only_touches_requests() {
        let r = with_storage(medium(), "10Gi");
        assert_eq!(r.requests.as_ref().unwrap().storage.as_deref(), Some("10Gi"));
        assert_eq!(r.limits.as_ref().unwrap().storage, None);
        assert_eq!(r.requests.as_ref().unwrap().cpu.as_deref(), Some("1000m"));
    }

    #[test]
    fn test_with_storage_on_empty_requirements() {
        let r = with_storage(ResourceRequirements::default(), "1Gi");
        assert_eq!(r.requests.unwrap().storage.as_deref(), Some("1Gi"));
        assert!(r.limits.is_none());
    }

    #[test]
    fn test_profile_storage_sizes() {
        assert_eq!(pd().requests.unwrap().storage.as_deref(), Some("10Gi"));
        assert_eq!(tikv().requests.unwrap().storage.as_deref(), Some("200Gi"));
        assert_eq!(tiflash().requests.unwrap().storage.as_deref(), Some("50Gi"));
        assert_eq!(tidb().requests.unwrap().storage, None);
    }

    #[test]
    fn test_tikv_memory_ceiling_above_pd() {
        let tikv_mem = tikv().limits.unwrap().memory.unwrap();
        let pd_mem = pd().limits.unwrap().memory.unwrap();
        assert_eq!(
            crate::resources::quantity::compare(&tikv_mem, &pd_mem).unwrap(),
            std::cmp::Ordering::Greater
        );
    }
}
