//! Address registry: which host serves which site.
//!
//! Built once at startup and read-only afterwards. A site without an address
//! is kept: calls to it fail individually at dispatch time.

use gridgate_domain::address::{Address, BACKEND_PORT};
use gridgate_domain::error::BackendError;
use gridgate_domain::location::Site;
use gridgate_domain::selector::BackendPath;

/// Static mapping from each [`Site`] to its chart server address.
#[derive(Debug, Clone)]
pub struct AddressRegistry {
    addresses: [Option<Address>; Site::COUNT],
    port: u16,
}

impl Default for AddressRegistry {
    fn default() -> Self {
        Self {
            addresses: Default::default(),
            port: BACKEND_PORT,
        }
    }
}

impl AddressRegistry {
    /// Empty registry targeting the standard backend port.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry by asking `lookup` for each site's raw address.
    ///
    /// Blank values are treated as absent.
    pub fn from_lookup(mut lookup: impl FnMut(Site) -> Option<String>) -> Self {
        Site::ALL.into_iter().fold(Self::new(), |registry, site| {
            let address = lookup(site).and_then(Address::new);
            registry.with_address(site, address)
        })
    }

    #[must_use]
    pub fn with_address(mut self, site: Site, address: Option<Address>) -> Self {
        self.addresses[site.index()] = address;
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn resolve(&self, site: Site) -> Option<&Address> {
        self.addresses[site.index()].as_ref()
    }

    /// Full URL of `path` on `site`'s chart server.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::UnresolvedAddress`] when `site` has no address.
    pub fn target(&self, site: Site, path: &BackendPath) -> Result<String, BackendError> {
        self.resolve(site)
            .map(|address| address.url(self.port, path))
            .ok_or(BackendError::UnresolvedAddress { site })
    }

    /// Sites with no configured address, in registry order.
    pub fn missing(&self) -> impl Iterator<Item = Site> + '_ {
        Site::ALL
            .into_iter()
            .filter(|site| self.resolve(*site).is_none())
    }
}
