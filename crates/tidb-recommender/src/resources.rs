//! Building blocks for the recommended specification: image references,
//! resource profiles, quantities, and the plain Kubernetes objects that
//! accompany the custom resources.

pub mod configmap_builder;
pub mod image;
pub mod profiles;
pub mod quantity;
pub mod service_builder;

pub use configmap_builder::build_io_chaos_configmap;
pub use image::resolve_image;
pub use service_builder::build_tidb_endpoint_service;
