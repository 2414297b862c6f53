//! Read-only snapshot of the client configuration
//!
//! The backend parses the server-provided start configuration; the kiosk only
//! reads this snapshot (host details for the info drawer, the OS list for the
//! selector grid, the default download method for cache updates).

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::os::{OsDescriptor, OsId};

/// How the cache is filled from the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadMethod {
    #[default]
    Rsync,
    Multicast,
    Torrent,
}

impl DownloadMethod {
    pub const ALL: [DownloadMethod; 3] = [
        DownloadMethod::Rsync,
        DownloadMethod::Multicast,
        DownloadMethod::Torrent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DownloadMethod::Rsync => "Rsync",
            DownloadMethod::Multicast => "Multicast",
            DownloadMethod::Torrent => "Torrent",
        }
    }
}

/// Client configuration as exposed by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub host_group: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub mac_address: String,
    #[serde(default)]
    pub disk_size: String,
    #[serde(default)]
    pub cache_size: String,
    #[serde(default)]
    pub cpu_model: String,
    #[serde(default)]
    pub ram_size: String,
    #[serde(default)]
    pub linbo_version: String,
    #[serde(default)]
    pub download_method: DownloadMethod,
    /// Open the client-info drawer once at startup
    #[serde(default)]
    pub client_details_visible_by_default: bool,
    #[serde(default, rename = "os")]
    pub operating_systems: Vec<Arc<OsDescriptor>>,
}

impl ClientConfig {
    /// Parse a TOML snapshot and number the operating systems in file order
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: ClientConfig = toml::from_str(content)?;
        config.assign_os_ids();
        Ok(config)
    }

    /// Load a TOML snapshot from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::client_config(path, e))?;
        Self::from_toml_str(&content).map_err(|e| Error::client_config(path, e))
    }

    fn assign_os_ids(&mut self) {
        for (index, os) in self.operating_systems.iter_mut().enumerate() {
            Arc::make_mut(os).id = OsId(index);
        }
    }

    pub fn os(&self, id: OsId) -> Option<&Arc<OsDescriptor>> {
        self.operating_systems.iter().find(|os| os.id == id)
    }

    /// Built-in configuration used when no snapshot file is given
    pub fn demo() -> Self {
        Self {
            hostname: "r101-pc01".to_string(),
            host_group: "r101".to_string(),
            ip_address: "10.0.0.101".to_string(),
            mac_address: "52:54:00:12:34:56".to_string(),
            disk_size: "476.9 GiB".to_string(),
            cache_size: "120 GiB".to_string(),
            cpu_model: "Intel(R) Core(TM) i5-10500".to_string(),
            ram_size: "16 GiB".to_string(),
            linbo_version: "LINBO 4.3.0".to_string(),
            download_method: DownloadMethod::Rsync,
            client_details_visible_by_default: false,
            operating_systems: vec![
                Arc::new(OsDescriptor::new(0, "Windows 11").with_version("23H2")),
                Arc::new(OsDescriptor::new(1, "Ubuntu").with_version("22.04")),
                Arc::new(OsDescriptor::new(2, "Debian").with_version("12")),
            ],
        }
    }
}
