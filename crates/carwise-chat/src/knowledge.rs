//! Precomputed model-name lookup over the loaded catalogs.
//!
//! A model is "mentioned" when its normalized `brand model` name occurs in
//! the normalized query with a non-alphanumeric character (or the string
//! edge) on both sides. Queries and names normalize the same way: lowercase,
//! whitespace runs collapsed to one space.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use carwise_core::{Catalogs, MaintenanceRecord, VehicleRecord};
use regex::Regex;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Lowercase `text`, trim it and collapse internal whitespace.
pub fn normalize(text: &str) -> String {
    WHITESPACE_RE
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

// =============================================================================
// NameIndex
// =============================================================================

#[derive(Debug, Clone)]
struct NameEntry {
    name: String,
    row: usize,
}

/// Normalized `brand model` names of one catalog, in table order.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    entries: Vec<NameEntry>,
}

impl NameIndex {
    /// Build an index from `brand model` names given in table order.
    ///
    /// A name repeated later in the table keeps its first row.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries: Vec<NameEntry> = Vec::new();
        for (row, name) in names.into_iter().enumerate() {
            let name = normalize(name.as_ref());
            if name.is_empty() || !seen.insert(name.clone()) {
                continue;
            }
            entries.push(NameEntry { name, row });
        }
        Self { entries }
    }

    pub fn for_vehicles(rows: &[VehicleRecord]) -> Self {
        Self::new(rows.iter().map(VehicleRecord::full_name))
    }

    pub fn for_maintenance(rows: &[MaintenanceRecord]) -> Self {
        Self::new(rows.iter().map(MaintenanceRecord::full_name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Row of the longest name mentioned in `query`.
    ///
    /// Equal-length names resolve to the earlier row. `query` must already be
    /// normalized.
    pub fn best_match(&self, query: &str) -> Option<usize> {
        self.best_match_outside(query, &[])
    }

    /// Like [`best_match`](Self::best_match), but an occurrence nested inside
    /// a longer span of `outer` does not count as a mention.
    pub fn best_match_outside(&self, query: &str, outer: &[Range<usize>]) -> Option<usize> {
        let mut best: Option<&NameEntry> = None;
        for entry in &self.entries {
            let spans = bounded_occurrences(query, &entry.name);
            if !spans.iter().any(|span| !nested_in(span, outer)) {
                continue;
            }
            if best.map_or(true, |b| entry.name.len() > b.name.len()) {
                best = Some(entry);
            }
        }
        best.map(|e| e.row)
    }

    /// Byte ranges of every name mentioned in `query`.
    pub fn spans(&self, query: &str) -> Vec<Range<usize>> {
        self.entries
            .iter()
            .flat_map(|e| bounded_occurrences(query, &e.name))
            .collect()
    }

    /// Rows of every name mentioned in `query`, in table order.
    ///
    /// A name whose every occurrence sits inside the occurrence of a longer
    /// mentioned name is dropped, so "toyota yaris cross" yields the Yaris
    /// Cross row only. `query` must already be normalized.
    pub fn all_matches(&self, query: &str) -> Vec<usize> {
        let found: Vec<(&NameEntry, Vec<Range<usize>>)> = self
            .entries
            .iter()
            .map(|e| (e, bounded_occurrences(query, &e.name)))
            .filter(|(_, spans)| !spans.is_empty())
            .collect();

        found
            .iter()
            .filter(|(_, spans)| {
                spans
                    .iter()
                    .any(|span| !found.iter().any(|(_, other)| nested_in(span, other)))
            })
            .map(|(entry, _)| entry.row)
            .collect()
    }
}

/// Byte ranges of `needle` in `haystack` that sit on word boundaries.
fn bounded_occurrences(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    haystack
        .match_indices(needle)
        .filter(|(start, _)| {
            let end = start + needle.len();
            let before = haystack[..*start].chars().next_back();
            let after = haystack[end..].chars().next();
            is_boundary(before) && is_boundary(after)
        })
        .map(|(start, _)| start..start + needle.len())
        .collect()
}

/// Whether `span` lies inside a strictly longer range of `outer`.
fn nested_in(span: &Range<usize>, outer: &[Range<usize>]) -> bool {
    outer
        .iter()
        .any(|o| o.len() > span.len() && o.start <= span.start && span.end <= o.end)
}

fn is_boundary(c: Option<char>) -> bool {
    c.map_or(true, |c| !c.is_alphanumeric())
}

// =============================================================================
// KnowledgeBase
// =============================================================================

/// Catalogs plus their name indexes, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    catalogs: Catalogs,
    vehicle_names: NameIndex,
    maintenance_names: NameIndex,
}

impl KnowledgeBase {
    pub fn new(catalogs: Catalogs) -> Self {
        let vehicle_names = NameIndex::for_vehicles(catalogs.vehicles());
        let maintenance_names = NameIndex::for_maintenance(catalogs.maintenance());
        Self {
            catalogs,
            vehicle_names,
            maintenance_names,
        }
    }

    pub fn vehicles(&self) -> &[VehicleRecord] {
        self.catalogs.vehicles()
    }

    pub fn maintenance(&self) -> &[MaintenanceRecord] {
        self.catalogs.maintenance()
    }

    /// The vehicle mentioned in a normalized query.
    pub fn find_vehicle(&self, query: &str) -> Option<&VehicleRecord> {
        self.vehicle_names
            .best_match(query)
            .and_then(|row| self.vehicles().get(row))
    }

    /// Every vehicle mentioned in a normalized query, in table order.
    pub fn find_vehicles(&self, query: &str) -> Vec<&VehicleRecord> {
        self.vehicle_names
            .all_matches(query)
            .into_iter()
            .filter_map(|row| self.vehicles().get(row))
            .collect()
    }

    /// The maintenance schedule mentioned in a normalized query.
    ///
    /// A schedule name nested inside a longer mentioned vehicle name is not a
    /// mention: "toyota yaris cross" never selects the Toyota Yaris schedule.
    pub fn find_schedule(&self, query: &str) -> Option<&MaintenanceRecord> {
        let vehicle_spans = self.vehicle_names.spans(query);
        self.maintenance_names
            .best_match_outside(query, &vehicle_spans)
            .and_then(|row| self.maintenance().get(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> NameIndex {
        NameIndex::new([
            "Toyota Yaris",
            "Perodua Myvi",
            "Toyota Yaris Cross",
            "Toyota Vios",
        ])
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Tell me\tabout  Toyota\n Vios "), "tell me about toyota vios");
    }

    #[test]
    fn test_best_match_exact_name() {
        assert_eq!(index().best_match("tell me about toyota vios"), Some(3));
    }

    #[test]
    fn test_best_match_prefers_longest_name() {
        assert_eq!(index().best_match("is the toyota yaris cross good"), Some(2));
        assert_eq!(index().best_match("is the toyota yaris good"), Some(0));
    }

    #[test]
    fn test_match_requires_word_boundaries() {
        assert_eq!(index().best_match("toyota viosx"), None);
        assert_eq!(index().best_match("xtoyota vios"), None);
        assert_eq!(index().best_match("toyota vios?"), Some(3));
        assert_eq!(index().best_match("(perodua myvi)"), Some(1));
    }

    #[test]
    fn test_all_matches_in_table_order() {
        let rows = index().all_matches("compare toyota vios and perodua myvi");
        assert_eq!(rows, vec![1, 3]);
    }

    #[test]
    fn test_all_matches_drops_nested_names() {
        let rows = index().all_matches("compare toyota yaris cross and perodua myvi");
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn test_all_matches_keeps_name_mentioned_on_its_own_too() {
        let rows = index().all_matches("compare toyota yaris cross and toyota yaris");
        assert_eq!(rows, vec![0, 2]);
    }

    #[test]
    fn test_duplicate_names_keep_first_row() {
        let idx = NameIndex::new(["Toyota Vios", "toyota  VIOS"]);
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.best_match("toyota vios"), Some(0));
    }

    #[test]
    fn test_best_match_outside_skips_nested_occurrence() {
        let idx = NameIndex::new(["Toyota Yaris"]);
        let query = "service toyota yaris cross";
        let outer = NameIndex::new(["Toyota Yaris Cross"]).spans(query);
        assert_eq!(idx.best_match(query), Some(0));
        assert_eq!(idx.best_match_outside(query, &outer), None);
        // an equal-length outer span does not hide the name
        let same = NameIndex::new(["Toyota Yaris"]).spans("service toyota yaris");
        assert_eq!(idx.best_match_outside("service toyota yaris", &same), Some(0));
    }

    #[test]
    fn test_spans_cover_every_mention() {
        let spans = index().spans("toyota yaris cross");
        assert_eq!(spans, vec![0..12, 0..18]);
    }

    #[test]
    fn test_empty_index() {
        let idx = NameIndex::default();
        assert!(idx.is_empty());
        assert_eq!(idx.best_match("anything"), None);
        assert!(idx.all_matches("anything").is_empty());
    }
}
