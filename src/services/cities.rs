use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use tracing::warn;

use crate::utils::text::{city_from_title, normalize_city};

/// Timezone used whenever a chat's city cannot be resolved with confidence.
pub const FALLBACK_TZ: Tz = chrono_tz::Europe::Moscow;

/// Minimum similarity score (0-100 scale) for a fuzzy match to be accepted.
const MIN_MATCH_SCORE: f64 = 75.0;

/// Read-only city → timezone table with a normalized lookup index.
///
/// Built once at startup from the JSON file produced by the `build-cities`
/// tool and shared across all message handlers.
pub struct CityTimezones {
    /// Canonical city name → parsed timezone. Rows with an empty or
    /// unparseable timezone are left out and behave as absent.
    zones: HashMap<String, Tz>,
    /// Normalized city name → canonical city name, covering every row.
    index: HashMap<String, String>,
}

impl CityTimezones {
    /// Loads the table from a UTF-8 JSON file of `name -> timezoneId` pairs.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read city table {}", path.display()))?;
        let table: HashMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse city table {}", path.display()))?;
        Ok(Self::from_table(table))
    }

    /// Builds the table and its normalized index from raw name/timezone pairs.
    pub fn from_table(table: HashMap<String, String>) -> Self {
        let mut zones = HashMap::with_capacity(table.len());
        let mut index = HashMap::with_capacity(table.len());

        for (name, tz) in table {
            if !tz.is_empty() {
                match tz.parse::<Tz>() {
                    Ok(parsed) => {
                        zones.insert(name.clone(), parsed);
                    }
                    Err(_) => warn!("skipping unknown timezone '{}' for city '{}'", tz, name),
                }
            }
            index.insert(normalize_city(&name), name);
        }

        Self { zones, index }
    }

    /// Number of cities in the lookup index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the table holds no cities at all.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Resolves free-text city input to a timezone.
    ///
    /// Exact lookup on the normalized form first, then the best fuzzy match
    /// over the whole index, then [`FALLBACK_TZ`]. Total over all inputs.
    pub fn resolve(&self, city: &str) -> Tz {
        if city.is_empty() {
            return FALLBACK_TZ;
        }

        let query = normalize_city(city);

        if let Some(name) = self.index.get(&query) {
            if let Some(&tz) = self.zones.get(name) {
                return tz;
            }
        }

        match self.best_match(&query) {
            Some(name) => self.zones.get(name).copied().unwrap_or(FALLBACK_TZ),
            None => FALLBACK_TZ,
        }
    }

    /// Resolves a chat title to a timezone.
    ///
    /// Titles without the city marker map straight to [`FALLBACK_TZ`]
    /// without consulting the index.
    pub fn for_chat_title(&self, title: &str) -> Tz {
        match city_from_title(title) {
            Some(city) => self.resolve(city),
            None => FALLBACK_TZ,
        }
    }

    /// Best fuzzy candidate at or above the acceptance score.
    ///
    /// Scores are normalized Levenshtein similarity on the 0-100 scale.
    /// Ties are broken toward the lexicographically smaller index key so the
    /// result does not depend on hash iteration order.
    fn best_match(&self, query: &str) -> Option<&String> {
        let mut best: Option<(f64, &String, &String)> = None;

        for (key, name) in &self.index {
            let score = strsim::normalized_levenshtein(query, key) * 100.0;
            let better = match best {
                None => true,
                Some((best_score, best_key, _)) => {
                    score > best_score || (score == best_score && key < best_key)
                }
            };
            if better {
                best = Some((score, key, name));
            }
        }

        best.filter(|(score, _, _)| *score >= MIN_MATCH_SCORE)
            .map(|(_, _, name)| name)
    }
}
