//! Nemesis scenario names and the IO chaos sidecar each one requires.

use crate::constants::{components, CHAOSFS_PREFIX};

/// Component whose Pods receive the chaosfs sidecar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChaosTarget {
    Tikv,
    Pd,
    Tiflash,
}

impl ChaosTarget {
    /// Map a scenario name onto the component it disturbs.
    ///
    /// Unknown names return `None` and are skipped by callers.
    pub fn from_scenario(name: &str) -> Option<Self> {
        match name {
            "delay_tikv" | "errno_tikv" | "mixed_tikv" | "readerr_tikv" => Some(Self::Tikv),
            "delay_pd" | "errno_pd" | "mixed_pd" => Some(Self::Pd),
            "delay_tiflash" | "errno_tiflash" | "mixed_tiflash" | "readerr_tiflash" => {
                Some(Self::Tiflash)
            }
            _ => None,
        }
    }

    pub fn component(self) -> &'static str {
        match self {
            Self::Tikv => components::TIKV,
            Self::Pd => components::PD,
            Self::Tiflash => components::TIFLASH,
        }
    }

    /// Value of the webhook annotation, also the ConfigMap name.
    pub fn sidecar_name(self) -> String {
        format!("{CHAOSFS_PREFIX}{}", self.component())
    }

    /// Webhook injection config for this component.
    pub fn payload(self) -> &'static str {
        match self {
            Self::Tikv => IO_CHAOS_CONFIG_TIKV,
            Self::Pd => IO_CHAOS_CONFIG_PD,
            Self::Tiflash => IO_CHAOS_CONFIG_TIFLASH,
        }
    }
}

/// Split a comma-separated scenario list, trimming and dropping empty entries.
///
/// Order and duplicates are preserved.
pub fn scenario_names(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|name| !name.is_empty())
}

const IO_CHAOS_CONFIG_TIKV: &str = r#"name: chaosfs-tikv
selector:
  labelSelectors:
    "app.kubernetes.io/component": "tikv"
template: chaosfs-sidecar
arguments:
  ContainerName: "tikv"
  DataPath: "/var/lib/tikv/data"
  MountPath: "/var/lib/tikv"
  VolumeName: "tikv"
"#;

const IO_CHAOS_CONFIG_PD: &str = r#"name: chaosfs-pd
selector:
  labelSelectors:
    "app.kubernetes.io/component": "pd"
template: chaosfs-sidecar
arguments:
  ContainerName: "pd"
  DataPath: "/var/lib/pd/data"
  MountPath: "/var/lib/pd"
  VolumeName: "pd"
"#;

const IO_CHAOS_CONFIG_TIFLASH: &str = r#"name: chaosfs-tiflash
selector:
  labelSelectors:
    "app.kubernetes.io/component": "tiflash"
template: chaosfs-sidecar
arguments:
  ContainerName: "tiflash"
  DataPath: "/data0/db"
  MountPath: "/data0"
  VolumeName: "data0"
"#;
