//! Well-known TV networks and their provider ids.

const KNOWN_NETWORKS: &[(&str, u64)] = &[
    ("The CW", 71),
    ("CW", 71),
    ("NBC", 6),
    ("CBS", 16),
    ("ABC", 2),
    ("Fox", 19),
    ("HBO", 49),
    ("HBO Max", 3186),
    ("Netflix", 213),
    ("Amazon", 1024),
    ("Prime Video", 1024),
    ("Amazon Prime Video", 1024),
    ("Hulu", 453),
    ("Disney+", 2739),
    ("Disney Plus", 2739),
    ("Apple TV+", 2552),
    ("Apple TV Plus", 2552),
    ("Peacock", 3353),
    ("Paramount+", 4330),
    ("Paramount Plus", 4330),
    ("Showtime", 67),
    ("Starz", 318),
    ("AMC", 174),
    ("FX", 88),
    ("USA Network", 30),
    ("TNT", 41),
    ("TBS", 32),
    ("Syfy", 77),
    ("Freeform", 1267),
    ("BBC One", 4),
    ("BBC Two", 332),
    ("BBC", 4),
    ("ITV", 9),
    ("Channel 4", 26),
    ("Sky", 1063),
    ("Sky Atlantic", 1063),
    ("Cartoon Network", 56),
    ("Adult Swim", 80),
    ("Comedy Central", 47),
    ("MTV", 33),
    ("Nickelodeon", 13),
    ("Discovery", 64),
    ("History", 65),
    ("National Geographic", 43),
    ("ESPN", 29),
    ("Bravo", 74),
    ("Lifetime", 34),
    ("A&E", 129),
    ("Hallmark", 384),
    ("Hallmark Channel", 384),
    ("Crunchyroll", 1112),
    ("Max", 3186),
];

/// A directory hit: the provider id and the table entry that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkEntry {
    pub id: u64,
    pub name: &'static str,
}

/// Resolve a display name to a network id.
///
/// Exact case-insensitive match first. Failing that, the first entry where
/// either name contains the other. Blank names never match.
pub fn find_network(name: &str) -> Option<NetworkEntry> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let entry = |&(name, id): &(&'static str, u64)| NetworkEntry { id, name };

    KNOWN_NETWORKS
        .iter()
        .find(|(known, _)| known.to_lowercase() == needle)
        .or_else(|| {
            KNOWN_NETWORKS.iter().find(|(known, _)| {
                let known = known.to_lowercase();
                needle.contains(&known) || known.contains(&needle)
            })
        })
        .map(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_ignores_case() {
        assert_eq!(find_network("netflix").map(|n| n.id), Some(213));
        assert_eq!(find_network("  HBO max ").map(|n| n.id), Some(3186));
    }

    #[test]
    fn exact_match_beats_earlier_partial() {
        // "The CW" is listed before "CW" and contains it, but "cw" is exact.
        assert_eq!(find_network("CW").map(|n| n.name), Some("CW"));
    }

    #[test]
    fn partial_match_in_either_direction() {
        assert_eq!(find_network("NBC Universal").map(|n| n.id), Some(6));
        assert_eq!(find_network("Cartoon").map(|n| n.id), Some(56));
    }

    #[test]
    fn blank_and_unknown_names_miss() {
        assert_eq!(find_network("   "), None);
        assert_eq!(find_network("Zyzzyva Pictures"), None);
    }
}
