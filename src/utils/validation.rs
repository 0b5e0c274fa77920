//! Input and document validation utilities.
//!
//! This module provides checks for command-line parameters and for the
//! structural invariants of a generated platform.

use crate::platform::builder::{CLOUD_HEAD_HOST, CLOUD_VM_HOST, COMPUTE_HOST_PREFIX, MAX_NODE_COUNT};
use crate::platform::Platform;
use std::collections::HashSet;

/// Validate a node count given on the command line
///
/// The count is accepted as a signed integer so that negative input reaches
/// this check instead of failing inside the argument parser.
///
/// # Arguments
/// * `node_count` - The requested number of compute/storage node pairs
///
/// # Returns
/// * `Ok(usize)` with the count if it is positive and at most [`MAX_NODE_COUNT`]
/// * `Err(String)` with an error message otherwise
///
/// # Examples
/// ```
/// use wrenchprep::utils::validation::validate_node_count;
///
/// assert_eq!(validate_node_count(4), Ok(4));
/// assert!(validate_node_count(0).is_err());
/// assert!(validate_node_count(-3).is_err());
/// assert!(validate_node_count(i64::MAX).is_err());
/// ```
pub fn validate_node_count(node_count: i64) -> Result<usize, String> {
    if node_count <= 0 {
        return Err(format!("node count must be a positive integer, got {}", node_count));
    }
    match usize::try_from(node_count) {
        Ok(count) if count <= MAX_NODE_COUNT => Ok(count),
        _ => Err(format!(
            "node count {} is too large (maximum {})",
            node_count, MAX_NODE_COUNT
        )),
    }
}

/// Validate the structural invariants of a platform document
///
/// Checks for:
/// - Unique host identifiers
/// - Route endpoints that reference declared hosts
/// - Routes that all traverse the zone's single link
/// - Distinct cloud head and cloud VM hosts joined by exactly one route
/// - A `ram` property on every compute host and on the cloud VM host
///
/// # Arguments
/// * `platform` - The platform to validate
///
/// # Returns
/// * `Ok(())` if validation succeeds
/// * `Err(String)` with the first violation found
pub fn validate_platform(platform: &Platform) -> Result<(), String> {
    let zone = &platform.zone;

    let mut host_ids = HashSet::new();
    for host in &zone.hosts {
        if !host_ids.insert(host.id.as_str()) {
            return Err(format!("Duplicate host id '{}'", host.id));
        }
    }

    for route in &zone.routes {
        if !host_ids.contains(route.src.as_str()) {
            return Err(format!("Route source '{}' is not a declared host", route.src));
        }
        if !host_ids.contains(route.dst.as_str()) {
            return Err(format!("Route destination '{}' is not a declared host", route.dst));
        }
        if route.link != zone.link.id {
            return Err(format!(
                "Route {} -> {} references link '{}' but the zone link is '{}'",
                route.src, route.dst, route.link, zone.link.id
            ));
        }
    }

    if !host_ids.contains(CLOUD_HEAD_HOST) || !host_ids.contains(CLOUD_VM_HOST) {
        return Err("Platform must declare both cloud head and cloud VM hosts".to_string());
    }

    let cloud_routes = zone
        .routes
        .iter()
        .filter(|r| r.src == CLOUD_HEAD_HOST && r.dst == CLOUD_VM_HOST)
        .count();
    if cloud_routes != 1 {
        return Err(format!(
            "Expected exactly one route from {} to {}, found {}",
            CLOUD_HEAD_HOST, CLOUD_VM_HOST, cloud_routes
        ));
    }

    for host in zone.hosts_with_prefix(COMPUTE_HOST_PREFIX) {
        if host.property("ram").is_none() {
            return Err(format!("Compute host '{}' has no ram property", host.id));
        }
    }
    if zone.host(CLOUD_VM_HOST).and_then(|h| h.property("ram")).is_none() {
        return Err(format!("Cloud VM host '{}' has no ram property", CLOUD_VM_HOST));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlatformTemplate;
    use crate::platform::{build_platform, Host, Route};

    fn platform() -> Platform {
        build_platform(3, &PlatformTemplate::default()).unwrap()
    }

    #[test]
    fn test_generated_platform_is_valid() {
        assert!(validate_platform(&platform()).is_ok());
    }

    #[test]
    fn test_duplicate_host_rejected() {
        let mut platform = platform();
        let duplicate: Host = platform.zone.hosts[1].clone();
        platform.zone.hosts.push(duplicate);

        let err = validate_platform(&platform).unwrap_err();
        assert!(err.contains("Duplicate host id 'ComputeHost1'"));
    }

    #[test]
    fn test_dangling_route_rejected() {
        let mut platform = platform();
        platform.zone.routes.push(Route {
            src: "UserHost".to_string(),
            dst: "ComputeHost99".to_string(),
            link: platform.zone.link.id.clone(),
        });

        let err = validate_platform(&platform).unwrap_err();
        assert!(err.contains("ComputeHost99"));
    }

    #[test]
    fn test_foreign_link_rejected() {
        let mut platform = platform();
        platform.zone.routes[0].link = "other_link".to_string();
        assert!(validate_platform(&platform).is_err());
    }

    #[test]
    fn test_missing_cloud_route_rejected() {
        let mut platform = platform();
        platform
            .zone
            .routes
            .retain(|r| !(r.src == CLOUD_HEAD_HOST && r.dst == CLOUD_VM_HOST));
        assert!(validate_platform(&platform).is_err());
    }

    #[test]
    fn test_node_count_bounds() {
        assert_eq!(validate_node_count(1), Ok(1));
        assert_eq!(validate_node_count(250), Ok(250));
        assert!(validate_node_count(0).unwrap_err().contains("got 0"));
        assert!(validate_node_count(-1).unwrap_err().contains("got -1"));
        assert_eq!(validate_node_count(MAX_NODE_COUNT as i64), Ok(MAX_NODE_COUNT));
        assert!(validate_node_count(MAX_NODE_COUNT as i64 + 1)
            .unwrap_err()
            .contains("too large"));
        assert!(validate_node_count(i64::MAX).is_err());
    }

    #[test]
    fn test_compute_host_without_ram_rejected() {
        let mut platform = platform();
        let host = platform.zone.hosts.iter_mut().find(|h| h.id == "ComputeHost2").unwrap();
        host.properties.clear();

        let err = validate_platform(&platform).unwrap_err();
        assert!(err.contains("ComputeHost2"));
    }
}
