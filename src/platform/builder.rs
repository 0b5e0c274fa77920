//! Platform construction.
//!
//! Builds the full document in memory in a fixed order so that the
//! serialized output is stable across runs:
//!
//! 1. controller host (`UserHost`)
//! 2. `ComputeHost1..N`, each with a `ram` property
//! 3. `StorageHost1..N`, each with a disk
//! 4. `CloudHeadHost` with a scratch disk
//! 5. `CloudHost`, the cloud VM host
//! 6. the shared link
//! 7. routes, see [`build_routes`]

use crate::config::{DiskSpec, HostSpec, PlatformTemplate};
use crate::error::PrepError;
use crate::platform::types::{Disk, Host, Link, Platform, Property, Route, Zone};
use crate::utils::validation::validate_platform;
use log::debug;

pub const CONTROLLER_HOST: &str = "UserHost";
pub const COMPUTE_HOST_PREFIX: &str = "ComputeHost";
pub const STORAGE_HOST_PREFIX: &str = "StorageHost";
pub const CLOUD_HEAD_HOST: &str = "CloudHeadHost";
pub const CLOUD_VM_HOST: &str = "CloudHost";

/// Upper bound on compute/storage pairs in one platform
pub const MAX_NODE_COUNT: usize = 100_000;

const CONTROLLER_COMMENT: &str = "The host on which the Controller will run";

pub fn compute_host_id(index: usize) -> String {
    format!("{}{}", COMPUTE_HOST_PREFIX, index)
}

pub fn storage_host_id(index: usize) -> String {
    format!("{}{}", STORAGE_HOST_PREFIX, index)
}

/// Build a platform with `node_count` compute and storage hosts
///
/// # Returns
/// * `Err(PrepError::InvalidArgument)` if `node_count` is zero or above
///   [`MAX_NODE_COUNT`], or the template yields an inconsistent document
pub fn build_platform(node_count: usize, template: &PlatformTemplate) -> Result<Platform, PrepError> {
    if node_count == 0 {
        return Err(PrepError::InvalidArgument(
            "node count must be a positive integer, got 0".to_string(),
        ));
    }
    if node_count > MAX_NODE_COUNT {
        return Err(PrepError::InvalidArgument(format!(
            "node count {} is too large (maximum {})",
            node_count, MAX_NODE_COUNT
        )));
    }

    let mut hosts = Vec::with_capacity(2 * node_count + 3);

    let mut controller = make_host(CONTROLLER_HOST.to_string(), &template.controller);
    controller.comment = Some(CONTROLLER_COMMENT.to_string());
    hosts.push(controller);

    for i in 1..=node_count {
        hosts.push(make_host(compute_host_id(i), &template.compute));
    }
    for i in 1..=node_count {
        hosts.push(make_host(storage_host_id(i), &template.storage));
    }

    hosts.push(make_host(CLOUD_HEAD_HOST.to_string(), &template.cloud_head));
    hosts.push(make_host(CLOUD_VM_HOST.to_string(), &template.cloud_vm));

    let link = Link {
        id: template.link.id.clone(),
        bandwidth: template.link.bandwidth.clone(),
        latency: template.link.latency.clone(),
    };

    let routes = build_routes(node_count, &link.id);
    debug!("Built {} hosts and {} routes for {} nodes", hosts.len(), routes.len(), node_count);

    let platform = Platform {
        version: template.version.clone(),
        zone: Zone {
            id: template.zone.id.clone(),
            routing: template.zone.routing.clone(),
            hosts,
            link,
            routes,
        },
    };

    validate_platform(&platform).map_err(PrepError::InvalidArgument)?;

    Ok(platform)
}

/// Route table, in emission order:
/// controller to every compute host, controller to every storage host,
/// controller to the cloud head, each compute host to its storage host,
/// cloud head to the cloud VM, and each storage host to the cloud VM.
pub fn build_routes(node_count: usize, link_id: &str) -> Vec<Route> {
    let route = |src: &str, dst: &str| Route {
        src: src.to_string(),
        dst: dst.to_string(),
        link: link_id.to_string(),
    };

    let mut routes = Vec::with_capacity(4 * node_count + 2);

    for i in 1..=node_count {
        routes.push(route(CONTROLLER_HOST, &compute_host_id(i)));
    }
    for i in 1..=node_count {
        routes.push(route(CONTROLLER_HOST, &storage_host_id(i)));
    }
    routes.push(route(CONTROLLER_HOST, CLOUD_HEAD_HOST));
    for i in 1..=node_count {
        routes.push(route(&compute_host_id(i), &storage_host_id(i)));
    }
    routes.push(route(CLOUD_HEAD_HOST, CLOUD_VM_HOST));
    for i in 1..=node_count {
        routes.push(route(&storage_host_id(i), CLOUD_VM_HOST));
    }

    routes
}

fn make_host(id: String, spec: &HostSpec) -> Host {
    let properties = spec
        .ram
        .iter()
        .map(|ram| Property::new("ram", ram.as_str()))
        .collect();

    Host {
        id,
        speed: spec.speed.clone(),
        cores: spec.cores,
        properties,
        disk: spec.disk.as_ref().map(make_disk),
        comment: None,
    }
}

fn make_disk(spec: &DiskSpec) -> Disk {
    Disk {
        id: spec.id.clone(),
        read_bw: spec.read_bw.clone(),
        write_bw: spec.write_bw.clone(),
        properties: vec![
            Property::new("size", spec.size.as_str()),
            Property::new("mount", spec.mount.as_str()),
        ],
    }
}
