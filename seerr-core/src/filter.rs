//! Exclusion policy and the display ordering pass.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use seerr_config::LoaderSettings;
use seerr_model::DiscoveryItem;

/// Provider genre codes for Talk and News programming.
pub const TALK_GENRE_IDS: [u32; 2] = [10767, 10763];

const TITLE_PATTERNS: &[&str] = &[
    r"\btonight show\b",
    r"\blate show\b",
    r"\blate night\b",
    r"\bdaily show\b",
    r"\btalk show\b",
    r"\bmorning show\b",
    r"\bawards?\b",
    r"\bemmy\b",
    r"\boscar\b",
    r"\bgolden globe\b",
    r"\bgrammys?\b",
    r"\bsag awards\b",
    r"\bbafta\b",
    r"\bcritics.?choice\b",
    r"\bpeople.?s choice\b",
    r"\bkelly clarkson show\b",
    r"\bellen\b.*\bshow\b",
    r"\bjimmy kimmel\b",
    r"\bjimmy fallon\b",
    r"\bstephen colbert\b",
    r"\bseth meyers\b",
    r"\bjames corden\b",
    r"\bconan\b",
    r"\bjohn oliver\b",
    r"\btrevor noah\b",
    r"\bwendy williams\b",
    r"\breal time with\b",
    r"\bdrew barrymore show\b",
    r"\bgood morning\b",
    r"\btoday show\b",
    r"\bthe view\b",
    r"\bthe talk\b",
    r"\blive with\b",
    r"\baccess hollywood\b",
    r"\bentertainment tonight\b",
    r"\bextra\b.*\btv\b",
];

static TITLE_SET: Lazy<Option<RegexSet>> = Lazy::new(|| {
    let patterns = TITLE_PATTERNS.iter().map(|p| format!("(?i){p}"));
    match RegexSet::new(patterns) {
        Ok(set) => Some(set),
        Err(err) => {
            tracing::error!(error = %err, "title exclusion patterns failed to compile");
            None
        }
    }
});

static GENRE_WORD: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)talk|news").ok());

/// Which items to hide from discovery results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionPolicy {
    /// Drop talk, news and awards programming.
    pub exclude_talk_shows: bool,
    /// Also match on show and presenter names in titles.
    pub strict_titles: bool,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            exclude_talk_shows: true,
            strict_titles: true,
        }
    }
}

impl From<&LoaderSettings> for ExclusionPolicy {
    fn from(settings: &LoaderSettings) -> Self {
        Self {
            exclude_talk_shows: settings.exclude_talk_shows,
            strict_titles: settings.strict_title_filter,
        }
    }
}

impl ExclusionPolicy {
    pub const DISABLED: Self = Self {
        exclude_talk_shows: false,
        strict_titles: false,
    };

    pub fn excludes(&self, item: &DiscoveryItem) -> bool {
        if !self.exclude_talk_shows {
            return false;
        }

        if item.genre_ids.iter().any(|id| TALK_GENRE_IDS.contains(id)) {
            return true;
        }

        if let Some(word) = GENRE_WORD.as_ref()
            && item.genre_names.iter().any(|name| word.is_match(name))
        {
            return true;
        }

        self.strict_titles && matches_title_pattern(item)
    }

    /// Keep the items this policy allows, in their original order.
    pub fn apply(&self, items: Vec<DiscoveryItem>) -> Vec<DiscoveryItem> {
        if !self.exclude_talk_shows {
            return items;
        }
        items.into_iter().filter(|item| !self.excludes(item)).collect()
    }
}

fn matches_title_pattern(item: &DiscoveryItem) -> bool {
    let Some(set) = TITLE_SET.as_ref() else {
        return false;
    };
    [&item.title, &item.name]
        .into_iter()
        .flatten()
        .find(|t| !t.is_empty())
        .is_some_and(|title| set.is_match(title))
}

/// Stable partition: items with a poster and a date first, the rest after,
/// each group in its original order.
pub fn partition_complete(items: Vec<DiscoveryItem>) -> Vec<DiscoveryItem> {
    let (mut complete, incomplete): (Vec<_>, Vec<_>) =
        items.into_iter().partition(DiscoveryItem::is_complete);
    complete.extend(incomplete);
    complete
}

/// Display ordering for incrementally loaded catalogs.
pub fn catalog_display_order(
    items: &[DiscoveryItem],
    policy: ExclusionPolicy,
) -> Vec<DiscoveryItem> {
    policy.apply(partition_complete(items.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use seerr_model::MediaKind;

    fn titled(id: u64, title: &str) -> DiscoveryItem {
        DiscoveryItem {
            name: Some(title.to_string()),
            ..DiscoveryItem::new(MediaKind::Tv, id)
        }
    }

    fn complete(id: u64) -> DiscoveryItem {
        DiscoveryItem {
            poster_path: Some("/p.jpg".into()),
            first_air_date: Some("2020-01-01".into()),
            ..DiscoveryItem::new(MediaKind::Tv, id)
        }
    }

    #[test]
    fn talk_genre_code_is_excluded_regardless_of_popularity() {
        let talk = DiscoveryItem {
            genre_ids: vec![35, 10767],
            popularity: Some(10_000.0),
            ..titled(1, "Some Program")
        };
        let drama = titled(2, "Drama");

        let kept = ExclusionPolicy::default().apply(vec![talk, drama]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].tmdb_id, 2);
    }

    #[test]
    fn genre_names_are_checked() {
        let item = DiscoveryItem {
            genre_names: vec!["Late Night News".into()],
            ..titled(1, "Plain")
        };
        assert!(ExclusionPolicy::default().excludes(&item));
    }

    #[test]
    fn title_patterns_only_apply_in_strict_mode() {
        let item = titled(1, "The Tonight Show Starring Jimmy Fallon");
        let lenient = ExclusionPolicy {
            strict_titles: false,
            ..ExclusionPolicy::default()
        };
        assert!(ExclusionPolicy::default().excludes(&item));
        assert!(!lenient.excludes(&item));
        assert!(!ExclusionPolicy::DISABLED.excludes(&item));
    }

    #[test]
    fn word_boundaries_are_respected() {
        assert!(!ExclusionPolicy::default().excludes(&titled(1, "Oscarville")));
        assert!(ExclusionPolicy::default().excludes(&titled(2, "The 95th Oscar Night")));
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let items = vec![
            titled(1, "Breaking Bad"),
            titled(2, "Golden Globe Awards"),
            DiscoveryItem {
                genre_ids: vec![10763],
                ..titled(3, "Evening Bulletin")
            },
            titled(4, "Severance"),
        ];
        let policy = ExclusionPolicy::default();
        let once = policy.apply(items);
        let twice = policy.apply(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn partition_is_stable() {
        let items = vec![titled(1, "a"), complete(2), titled(3, "b"), complete(4)];
        let ordered: Vec<_> = partition_complete(items)
            .iter()
            .map(|i| i.tmdb_id)
            .collect();
        assert_eq!(ordered, vec![2, 4, 1, 3]);
    }
}
