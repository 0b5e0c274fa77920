//! Platform template configuration.
//!
//! Every speed, bandwidth, latency and size written into a generated
//! platform comes from a [`PlatformTemplate`]. The defaults reproduce the
//! fixed values used for the WRENCH test platforms; a YAML file can
//! replace any section (see `config_loader::load_template`).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const PLATFORM_VERSION: &str = "4.1";
pub const ZONE_ID: &str = "AS0";
pub const ZONE_ROUTING: &str = "Full";

pub const CONTROLLER_SPEED: &str = "10Gf";
pub const CONTROLLER_CORES: u32 = 1;

pub const COMPUTE_SPEED: &str = "35Gf";
pub const COMPUTE_CORES: u32 = 10;
pub const COMPUTE_RAM: &str = "16GB";

pub const STORAGE_SPEED: &str = "10Gf";
pub const STORAGE_CORES: u32 = 1;
pub const STORAGE_DISK_ID: &str = "large_disk";
pub const STORAGE_MOUNT: &str = "/";

pub const CLOUD_HEAD_SPEED: &str = "10Gf";
pub const CLOUD_HEAD_CORES: u32 = 1;
pub const CLOUD_HEAD_DISK_ID: &str = "local_disk";
pub const CLOUD_HEAD_MOUNT: &str = "/scratch/";

pub const CLOUD_VM_SPEED: &str = "50Gf";
pub const CLOUD_VM_CORES: u32 = 10;
pub const CLOUD_VM_RAM: &str = "16GB";

pub const DISK_BANDWIDTH: &str = "100MBps";
pub const DISK_SIZE: &str = "5000GiB";

pub const LINK_ID: &str = "network_link";
pub const LINK_BANDWIDTH: &str = "5000GBps";
pub const LINK_LATENCY: &str = "0us";

/// Full set of constants used to build a platform document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformTemplate {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub zone: ZoneSpec,
    #[serde(default = "default_controller")]
    pub controller: HostSpec,
    #[serde(default = "default_compute")]
    pub compute: HostSpec,
    #[serde(default = "default_storage")]
    pub storage: HostSpec,
    #[serde(default = "default_cloud_head")]
    pub cloud_head: HostSpec,
    #[serde(default = "default_cloud_vm")]
    pub cloud_vm: HostSpec,
    #[serde(default)]
    pub link: LinkSpec,
}

/// Zone identifier and routing mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub id: String,
    pub routing: String,
}

/// Resources of one class of host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSpec {
    /// Compute speed with unit suffix (e.g., "35Gf")
    pub speed: String,
    /// Number of cores
    pub cores: u32,
    /// RAM exposed as a `ram` property (e.g., "16GB")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    /// Disk attached to the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<DiskSpec>,
}

/// Disk attached to a storage or cloud head host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskSpec {
    pub id: String,
    pub read_bw: String,
    pub write_bw: String,
    pub size: String,
    pub mount: String,
}

/// The single network link shared by all routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub id: String,
    pub bandwidth: String,
    pub latency: String,
}

/// Template validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid zone configuration: {0}")]
    InvalidZone(String),
    #[error("Invalid host configuration: {0}")]
    InvalidHost(String),
    #[error("Invalid link configuration: {0}")]
    InvalidLink(String),
}

/// Match: number followed by a unit suffix ("35Gf", "0us", "1.5e3MBps")
static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?[A-Za-z]+$").expect("Invalid quantity regex")
});

/// Check that a value is a number followed by a unit suffix
pub fn is_quantity(value: &str) -> bool {
    QUANTITY.is_match(value)
}

impl PlatformTemplate {
    /// Validate the template
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version.trim().is_empty() {
            return Err(ValidationError::InvalidZone("platform version cannot be empty".to_string()));
        }
        if self.zone.id.trim().is_empty() || self.zone.routing.trim().is_empty() {
            return Err(ValidationError::InvalidZone(
                "zone id and routing cannot be empty".to_string(),
            ));
        }

        for (name, host) in self.hosts() {
            host.validate(name)?;
        }

        // Storage and cloud head hosts must carry a disk
        if self.storage.disk.is_none() {
            return Err(ValidationError::InvalidHost("storage hosts need a disk".to_string()));
        }
        if self.cloud_head.disk.is_none() {
            return Err(ValidationError::InvalidHost("cloud head host needs a disk".to_string()));
        }

        // Compute and cloud VM hosts expose their memory as a `ram` property
        if self.compute.ram.is_none() {
            return Err(ValidationError::InvalidHost("compute hosts need a ram value".to_string()));
        }
        if self.cloud_vm.ram.is_none() {
            return Err(ValidationError::InvalidHost("cloud VM host needs a ram value".to_string()));
        }

        if self.link.id.trim().is_empty() {
            return Err(ValidationError::InvalidLink("link id cannot be empty".to_string()));
        }
        for (field, value) in [("bandwidth", &self.link.bandwidth), ("latency", &self.link.latency)] {
            if !is_quantity(value) {
                return Err(ValidationError::InvalidLink(format!(
                    "{} '{}' is not a number with a unit suffix",
                    field, value
                )));
            }
        }

        Ok(())
    }

    fn hosts(&self) -> [(&'static str, &HostSpec); 5] {
        [
            ("controller", &self.controller),
            ("compute", &self.compute),
            ("storage", &self.storage),
            ("cloud_head", &self.cloud_head),
            ("cloud_vm", &self.cloud_vm),
        ]
    }
}

impl HostSpec {
    fn validate(&self, name: &str) -> Result<(), ValidationError> {
        if self.cores == 0 {
            return Err(ValidationError::InvalidHost(format!("{}: cores must be at least 1", name)));
        }
        if !is_quantity(&self.speed) {
            return Err(ValidationError::InvalidHost(format!(
                "{}: speed '{}' is not a number with a unit suffix",
                name, self.speed
            )));
        }
        if let Some(ram) = &self.ram {
            if !is_quantity(ram) {
                return Err(ValidationError::InvalidHost(format!("{}: ram '{}' is not a quantity", name, ram)));
            }
        }
        if let Some(disk) = &self.disk {
            if disk.id.trim().is_empty() || disk.mount.trim().is_empty() {
                return Err(ValidationError::InvalidHost(format!(
                    "{}: disk id and mount cannot be empty",
                    name
                )));
            }
            for value in [&disk.read_bw, &disk.write_bw, &disk.size] {
                if !is_quantity(value) {
                    return Err(ValidationError::InvalidHost(format!(
                        "{}: disk value '{}' is not a quantity",
                        name, value
                    )));
                }
            }
        }
        Ok(())
    }
}

fn default_version() -> String {
    PLATFORM_VERSION.to_string()
}

fn default_controller() -> HostSpec {
    HostSpec {
        speed: CONTROLLER_SPEED.to_string(),
        cores: CONTROLLER_CORES,
        ram: None,
        disk: None,
    }
}

fn default_compute() -> HostSpec {
    HostSpec {
        speed: COMPUTE_SPEED.to_string(),
        cores: COMPUTE_CORES,
        ram: Some(COMPUTE_RAM.to_string()),
        disk: None,
    }
}

fn default_storage() -> HostSpec {
    HostSpec {
        speed: STORAGE_SPEED.to_string(),
        cores: STORAGE_CORES,
        ram: None,
        disk: Some(DiskSpec::new(STORAGE_DISK_ID, STORAGE_MOUNT)),
    }
}

fn default_cloud_head() -> HostSpec {
    HostSpec {
        speed: CLOUD_HEAD_SPEED.to_string(),
        cores: CLOUD_HEAD_CORES,
        ram: None,
        disk: Some(DiskSpec::new(CLOUD_HEAD_DISK_ID, CLOUD_HEAD_MOUNT)),
    }
}

fn default_cloud_vm() -> HostSpec {
    HostSpec {
        speed: CLOUD_VM_SPEED.to_string(),
        cores: CLOUD_VM_CORES,
        ram: Some(CLOUD_VM_RAM.to_string()),
        disk: None,
    }
}

impl DiskSpec {
    fn new(id: &str, mount: &str) -> Self {
        Self {
            id: id.to_string(),
            read_bw: DISK_BANDWIDTH.to_string(),
            write_bw: DISK_BANDWIDTH.to_string(),
            size: DISK_SIZE.to_string(),
            mount: mount.to_string(),
        }
    }
}

/// Default implementations
impl Default for ZoneSpec {
    fn default() -> Self {
        Self {
            id: ZONE_ID.to_string(),
            routing: ZONE_ROUTING.to_string(),
        }
    }
}

impl Default for LinkSpec {
    fn default() -> Self {
        Self {
            id: LINK_ID.to_string(),
            bandwidth: LINK_BANDWIDTH.to_string(),
            latency: LINK_LATENCY.to_string(),
        }
    }
}

impl Default for PlatformTemplate {
    fn default() -> Self {
        Self {
            version: default_version(),
            zone: ZoneSpec::default(),
            controller: default_controller(),
            compute: default_compute(),
            storage: default_storage(),
            cloud_head: default_cloud_head(),
            cloud_vm: default_cloud_vm(),
            link: LinkSpec::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_is_valid() {
        let template = PlatformTemplate::default();
        assert!(template.validate().is_ok());
        assert_eq!(template.compute.speed, "35Gf");
        assert_eq!(template.cloud_head.disk.as_ref().unwrap().mount, "/scratch/");
    }

    #[test]
    fn test_is_quantity() {
        assert!(is_quantity("35Gf"));
        assert!(is_quantity("0us"));
        assert!(is_quantity("5000GiB"));
        assert!(is_quantity("1.25Gbps"));
        assert!(is_quantity("1e3Mf"));
        assert!(!is_quantity("35"));
        assert!(!is_quantity("Gf"));
        assert!(!is_quantity("35 Gf"));
        assert!(!is_quantity(""));
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
compute:
  speed: "100Gf"
  cores: 48
  ram: "256GB"
link:
  id: "backbone"
  bandwidth: "10GBps"
  latency: "50us"
"#;
        let template: PlatformTemplate = serde_yaml::from_str(yaml).unwrap();
        assert!(template.validate().is_ok());
        assert_eq!(template.compute.cores, 48);
        assert_eq!(template.link.id, "backbone");
        assert_eq!(template.storage, default_storage());
        assert_eq!(template.zone.id, "AS0");
    }

    #[test]
    fn test_zero_cores_rejected() {
        let mut template = PlatformTemplate::default();
        template.cloud_vm.cores = 0;
        assert!(matches!(template.validate(), Err(ValidationError::InvalidHost(_))));
    }

    #[test]
    fn test_storage_without_disk_rejected() {
        let mut template = PlatformTemplate::default();
        template.storage.disk = None;
        assert!(template.validate().is_err());
    }

    #[test]
    fn test_compute_override_without_ram_rejected() {
        let yaml = "compute:\n  speed: \"100Gf\"\n  cores: 48\n";
        let template: PlatformTemplate = serde_yaml::from_str(yaml).unwrap();
        assert!(template.compute.ram.is_none());
        assert!(matches!(template.validate(), Err(ValidationError::InvalidHost(_))));
    }

    #[test]
    fn test_cloud_vm_without_ram_rejected() {
        let mut template = PlatformTemplate::default();
        template.cloud_vm.ram = None;
        assert!(matches!(template.validate(), Err(ValidationError::InvalidHost(_))));
    }

    #[test]
    fn test_bad_link_latency_rejected() {
        let mut template = PlatformTemplate::default();
        template.link.latency = "fast".to_string();
        assert!(matches!(template.validate(), Err(ValidationError::InvalidLink(_))));
    }
}
