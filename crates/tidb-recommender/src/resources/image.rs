use crate::config::RegistrySettings;

/// Resolve the image reference for a component.
///
/// A non-empty `explicit_image` always wins. Otherwise the reference is
/// `[hub_address/]docker_repository/name:base_version`.
pub fn resolve_image(
    registry: &RegistrySettings,
    name: &str,
    base_version: &str,
    explicit_image: &str,
) -> String {
    if !explicit_image.is_empty() {
        return explicit_image.to_string();
    }

    let mut image = String::new();
    if !registry.hub_address.is_empty() {
        image.push_str(&registry.hub_address);
        image.push('/');
    }
    image.push_str(&registry.docker_repository);
    image.push('/');
    image.push_str(name);
    image.push(':');
    image.push_str(base_version);
    image
}
