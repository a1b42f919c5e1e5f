//! External profile-image provider contract
//!
//! Bot appearances come from a profile cache the engine does not own. The
//! engine filters unusable entries, never reuses a URL already assigned to a
//! live bot in the session, and falls back to a random-hue color when no
//! candidate remains. Malformed cache data is treated as "no candidates" and
//! never propagated.

use std::collections::HashSet;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Deserialize;

use crate::sim::Appearance;

/// One entry from the external profile cache
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProfileCandidate {
    #[serde(rename = "profileImageUrl", default)]
    pub profile_image_url: String,
}

/// Source of candidate avatar images for bot appearance
pub trait ProfileImageProvider {
    /// Zero or more candidates; entries may still be unusable (empty URL)
    fn candidates(&self) -> Vec<ProfileCandidate>;
}

/// Provider with no candidates; every appearance falls back to a color
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProfiles;

impl ProfileImageProvider for NoProfiles {
    fn candidates(&self) -> Vec<ProfileCandidate> {
        Vec::new()
    }
}

/// Provider backed by a JSON cache blob of candidate entries.
///
/// The blob is parsed once at construction; a malformed blob yields an empty
/// provider rather than an error.
#[derive(Debug, Clone, Default)]
pub struct JsonCacheProvider {
    entries: Vec<ProfileCandidate>,
}

impl JsonCacheProvider {
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<ProfileCandidate>>(json) {
            Ok(entries) => Self { entries },
            Err(e) => {
                log::warn!("ignoring malformed profile cache: {e}");
                Self::default()
            }
        }
    }
}

impl ProfileImageProvider for JsonCacheProvider {
    fn candidates(&self) -> Vec<ProfileCandidate> {
        self.entries.clone()
    }
}

/// URLs already assigned to live bots this session.
///
/// Explicitly injected into the spawner and reset at world init; never
/// ambient global state.
#[derive(Debug, Clone, Default)]
pub struct UsedImageRegistry {
    used: HashSet<String>,
}

impl UsedImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.used.contains(url)
    }

    pub fn mark(&mut self, url: &str) {
        self.used.insert(url.to_owned());
    }

    /// Forget every assignment; called when a new world starts
    pub fn reset(&mut self) {
        self.used.clear();
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// Pick an appearance for a newly spawned bot.
///
/// Filters out entries without a usable URL and URLs already in the
/// registry, picks uniformly among what remains, and marks the pick. When
/// nothing remains the bot gets a random-hue color.
pub fn choose_appearance(
    provider: &dyn ProfileImageProvider,
    registry: &mut UsedImageRegistry,
    rng: &mut Pcg32,
) -> Appearance {
    let usable: Vec<String> = provider
        .candidates()
        .into_iter()
        .map(|c| c.profile_image_url)
        .filter(|url| !url.is_empty() && !registry.contains(url))
        .collect();

    // Rolled before the candidate check; the RNG stream does not depend on
    // provider contents.
    let hue = rng.random_range(0.0..360.0);

    if usable.is_empty() {
        return Appearance::Color { hue };
    }

    let url = usable[rng.random_range(0..usable.len())].clone();
    registry.mark(&url);
    Appearance::ProfileImage {
        url,
        fallback_hue: hue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    struct FixedProvider(Vec<&'static str>);

    impl ProfileImageProvider for FixedProvider {
        fn candidates(&self) -> Vec<ProfileCandidate> {
            self.0
                .iter()
                .map(|url| ProfileCandidate {
                    profile_image_url: (*url).to_owned(),
                })
                .collect()
        }
    }

    #[test]
    fn test_json_provider_parses_entries() {
        let provider = JsonCacheProvider::from_json(
            r#"[{"profileImageUrl": "https://img.example/a.png"}, {"profileImageUrl": ""}]"#,
        );
        assert_eq!(provider.candidates().len(), 2);
    }

    #[test]
    fn test_malformed_cache_means_no_candidates() {
        let provider = JsonCacheProvider::from_json("{{{not json");
        assert!(provider.candidates().is_empty());
    }

    #[test]
    fn test_empty_urls_are_filtered() {
        let provider = FixedProvider(vec![""]);
        let mut registry = UsedImageRegistry::new();
        let mut rng = Pcg32::seed_from_u64(1);
        let appearance = choose_appearance(&provider, &mut registry, &mut rng);
        assert!(matches!(appearance, Appearance::Color { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_urls_are_never_reused() {
        let provider = FixedProvider(vec!["a", "b"]);
        let mut registry = UsedImageRegistry::new();
        let mut rng = Pcg32::seed_from_u64(1);

        let mut urls = HashSet::new();
        for _ in 0..2 {
            match choose_appearance(&provider, &mut registry, &mut rng) {
                Appearance::ProfileImage { url, .. } => {
                    assert!(urls.insert(url));
                }
                other => panic!("expected image appearance, got {other:?}"),
            }
        }

        // Both candidates consumed; the third spawn falls back to a color
        let third = choose_appearance(&provider, &mut registry, &mut rng);
        assert!(matches!(third, Appearance::Color { .. }));
    }

    #[test]
    fn test_reset_allows_reuse() {
        let provider = FixedProvider(vec!["a"]);
        let mut registry = UsedImageRegistry::new();
        let mut rng = Pcg32::seed_from_u64(1);

        choose_appearance(&provider, &mut registry, &mut rng);
        assert_eq!(registry.len(), 1);

        registry.reset();
        let again = choose_appearance(&provider, &mut registry, &mut rng);
        assert!(matches!(again, Appearance::ProfileImage { .. }));
    }
}
