//! TiDB cluster specification recommender.
//!
//! Given a few knobs (replica counts, image versions, nemesis scenario names)
//! this crate produces ready-to-submit TidbCluster and TidbMonitor custom
//! resources, a client Service, and the ConfigMaps needed for IO chaos
//! injection.

pub mod chaos;
pub mod config;
pub mod constants;
pub mod crds;
pub mod defaults;
pub mod error;
pub mod recommend;
pub mod resources;

pub use config::{ClusterConfig, RegistrySettings, Settings};
pub use error::{RecommendError, Result};
pub use recommend::{Recommendation, Recommender};
