use crate::domain::node::SiteId;
use crate::domain::ports::SiteProvider;
use std::sync::atomic::{AtomicU32, Ordering};

/// Process-wide current site, set from configuration at startup
#[derive(Debug)]
pub struct CurrentSite {
    site: AtomicU32,
}

impl CurrentSite {
    pub fn new(site: SiteId) -> Self {
        Self {
            site: AtomicU32::new(site.0),
        }
    }

    pub fn set(&self, site: SiteId) {
        self.site.store(site.0, Ordering::Relaxed);
    }
}

impl Default for CurrentSite {
    fn default() -> Self {
        Self::new(SiteId(1))
    }
}

impl SiteProvider for CurrentSite {
    fn current_site(&self) -> SiteId {
        SiteId(self.site.load(Ordering::Relaxed))
    }
}
