use crate::item::DiscoveryItem;

/// One normalized page of a studio or network catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogPage {
    pub items: Vec<DiscoveryItem>,
    /// 1-based page number.
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

impl CatalogPage {
    pub fn empty(page: u32) -> Self {
        Self {
            items: Vec::new(),
            page,
            total_pages: 1,
            total_results: 0,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Result of a single person lookup. Recomputed on every navigation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonCreditSet {
    pub cast: Vec<DiscoveryItem>,
    pub crew: Vec<DiscoveryItem>,
}

impl PersonCreditSet {
    pub fn is_empty(&self) -> bool {
        self.cast.is_empty() && self.crew.is_empty()
    }
}
