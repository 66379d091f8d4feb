//! Merging of credit lists and catalog pages into deduplicated sequences.

use std::cmp::Reverse;
use std::collections::HashSet;

use ordered_float::OrderedFloat;
use seerr_model::{CatalogPage, DiscoveryItem, ItemKey, PersonCreditSet};

/// An ordered sequence with O(1) membership by [`ItemKey`].
///
/// Items keep arrival order. A key that was accepted once is never accepted
/// again.
#[derive(Debug, Clone, Default)]
pub struct AcceptedItems {
    items: Vec<DiscoveryItem>,
    seen: HashSet<ItemKey>,
}

impl AcceptedItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the items whose key has not been seen, preserving their order.
    /// Returns how many were accepted.
    pub fn extend_novel<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = DiscoveryItem>,
    {
        let before = self.items.len();
        for item in items {
            if self.seen.insert(item.key()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    pub fn contains(&self, key: &ItemKey) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[DiscoveryItem] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<DiscoveryItem> {
        self.items
    }
}

/// Stable sort: popularity descending, then vote count descending. Missing
/// values rank as zero.
pub fn rank_by_popularity(items: &mut [DiscoveryItem]) {
    items.sort_by_key(|item| {
        (
            Reverse(OrderedFloat(item.popularity_or_zero())),
            Reverse(item.vote_count_or_zero()),
        )
    });
}

/// Combine a person's cast and crew credits into one ranked list.
///
/// Crew credits are only considered for people who are not primarily
/// performers. `max_results == 0` means no limit.
pub fn merge_credits(
    credits: PersonCreditSet,
    is_performer: bool,
    max_results: usize,
) -> Vec<DiscoveryItem> {
    let mut merged = AcceptedItems::new();
    merged.extend_novel(credits.cast);
    if !is_performer {
        merged.extend_novel(credits.crew);
    }

    let mut items = merged.into_vec();
    rank_by_popularity(&mut items);
    if max_results > 0 {
        items.truncate(max_results);
    }
    items
}

/// Combine a network's and a studio's catalog pages for one subject name.
///
/// Network items come first, then studio items not already present. Counts
/// come from the network page unless it reports no results, in which case
/// the studio's are used. The merged list is then re-ranked by popularity.
pub fn merge_catalogs(
    network: Option<CatalogPage>,
    studio: Option<CatalogPage>,
) -> Option<CatalogPage> {
    let counted = match (&network, &studio) {
        (Some(n), Some(s)) if n.total_results == 0 => s,
        (Some(n), _) => n,
        (None, Some(s)) => s,
        (None, None) => return None,
    };
    let (page, total_pages, total_results) =
        (counted.page, counted.total_pages, counted.total_results);

    let mut merged = AcceptedItems::new();
    if let Some(network) = network {
        merged.extend_novel(network.items);
    }
    if let Some(studio) = studio {
        merged.extend_novel(studio.items);
    }

    let mut items = merged.into_vec();
    items.sort_by_key(|item| Reverse(OrderedFloat(item.popularity_or_zero())));

    Some(CatalogPage {
        items,
        page,
        total_pages,
        total_results,
    })
}
