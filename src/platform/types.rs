//! Platform document model.
//!
//! These types mirror the SimGrid platform description consumed by WRENCH:
//! a root `<platform>` holding one `<zone>`, which in turn holds hosts, a
//! single link and the full route table.

/// Root of a platform document
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    /// SimGrid platform format version (e.g., "4.1")
    pub version: String,
    /// The only zone in the document
    pub zone: Zone,
}

/// Container for every host, the shared link and all routes
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: String,
    /// Routing mode tag (e.g., "Full")
    pub routing: String,
    pub hosts: Vec<Host>,
    pub link: Link,
    pub routes: Vec<Route>,
}

/// A simulated machine
#[derive(Debug, Clone, PartialEq)]
pub struct Host {
    /// Unique host identifier
    pub id: String,
    /// Compute speed with unit suffix (e.g., "35Gf")
    pub speed: String,
    /// Number of cores
    pub cores: u32,
    /// Named properties in emission order (e.g., ram = 16GB)
    pub properties: Vec<Property>,
    /// Disk attached to this host
    pub disk: Option<Disk>,
    /// Comment emitted immediately before the host element
    pub comment: Option<String>,
}

/// Storage device attached to a host
#[derive(Debug, Clone, PartialEq)]
pub struct Disk {
    pub id: String,
    pub read_bw: String,
    pub write_bw: String,
    /// Properties in emission order (size, mount)
    pub properties: Vec<Property>,
}

/// Key/value property attached to a host or disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub id: String,
    pub value: String,
}

/// Network link shared by every route
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: String,
    pub bandwidth: String,
    pub latency: String,
}

/// Directed route between two hosts through a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub src: String,
    pub dst: String,
    /// Identifier of the link the route traverses
    pub link: String,
}

impl Property {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

impl Host {
    /// Look up a property value by id
    pub fn property(&self, id: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.value.as_str())
    }
}

impl Disk {
    pub fn property(&self, id: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.value.as_str())
    }
}

impl Zone {
    /// Find a host by id
    pub fn host(&self, id: &str) -> Option<&Host> {
        self.hosts.iter().find(|h| h.id == id)
    }

    /// Hosts whose id starts with the given prefix, in document order
    pub fn hosts_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Host> + 'a {
        self.hosts.iter().filter(move |h| h.id.starts_with(prefix))
    }
}
