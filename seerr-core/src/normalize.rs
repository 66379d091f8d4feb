//! Raw upstream records to [`DiscoveryItem`]s.
//!
//! Pure transformation. A record that cannot be normalized is dropped on its
//! own; the rest of its batch survives.

use seerr_model::{
    CatalogPage, DiscoveryItem, MediaKind, PersonCreditSet, RawCatalogPage,
    RawItem, RawPersonCredits,
};
use tracing::debug;

use crate::error::DiscoveryError;

/// Where a raw record came from, which decides its media kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordContext {
    /// A person's cast or crew list. Kind is inferred per record.
    Credit,
    /// A studio or network catalog page. Every record takes the kind of the
    /// endpoint that was queried.
    Catalog(MediaKind),
}

pub fn normalize(
    raw: RawItem,
    context: RecordContext,
) -> Result<DiscoveryItem, DiscoveryError> {
    let Some(tmdb_id) = raw.id else {
        return Err(DiscoveryError::MalformedRecord(format!(
            "record without id ({})",
            raw.title.as_deref().or(raw.name.as_deref()).unwrap_or("untitled")
        )));
    };

    let media_type = match context {
        RecordContext::Catalog(kind) => kind,
        // Movies carry `title`; series carry `name`.
        RecordContext::Credit => {
            if raw.title.as_deref().is_some_and(|t| !t.is_empty()) {
                MediaKind::Movie
            } else {
                MediaKind::Tv
            }
        }
    };

    let mut genre_ids = raw.genre_ids;
    let mut genre_names = Vec::new();
    for genre in &raw.genres {
        if let Some(id) = genre.id()
            && !genre_ids.contains(&id)
        {
            genre_ids.push(id);
        }
        if let Some(name) = genre.name().filter(|n| !n.is_empty()) {
            genre_names.push(name.to_string());
        }
    }

    Ok(DiscoveryItem {
        tmdb_id,
        media_type,
        title: raw.title,
        name: raw.name,
        original_title: raw.original_title,
        original_name: raw.original_name,
        overview: raw.overview,
        poster_path: raw.poster_path,
        backdrop_path: raw.backdrop_path,
        release_date: raw.release_date,
        first_air_date: raw.first_air_date,
        vote_average: raw.vote_average,
        vote_count: raw.vote_count,
        popularity: raw.popularity,
        genre_ids,
        genre_names,
        media_info: raw.media_info,
        character: raw.character,
        department: raw.department,
        job: raw.job,
    })
}

/// Normalize a batch, dropping records that fail.
pub fn normalize_all(
    records: Vec<RawItem>,
    context: RecordContext,
) -> Vec<DiscoveryItem> {
    records
        .into_iter()
        .filter_map(|raw| match normalize(raw, context) {
            Ok(item) => Some(item),
            Err(err) => {
                debug!(error = %err, "dropping upstream record");
                None
            }
        })
        .collect()
}

pub fn normalize_credits(raw: RawPersonCredits) -> PersonCreditSet {
    PersonCreditSet {
        cast: normalize_all(raw.cast, RecordContext::Credit),
        crew: normalize_all(raw.crew, RecordContext::Credit),
    }
}

/// Page numbers are 1-based and a missing total counts as a single page.
pub fn normalize_page(
    raw: RawCatalogPage,
    kind: MediaKind,
    requested_page: u32,
) -> CatalogPage {
    let page = raw.page.filter(|p| *p > 0).unwrap_or(requested_page.max(1));
    let items = normalize_all(raw.results, RecordContext::Catalog(kind));
    CatalogPage {
        total_results: raw.total_results.unwrap_or(items.len() as u64),
        items,
        page,
        total_pages: raw.total_pages.filter(|t| *t > 0).unwrap_or(1),
    }
}
