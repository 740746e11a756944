// Useful Tools - core/search.rs
//
// Fuzzy search over tool records.
//
// Each searchable field is scored by approximate substring matching: one
// edit-distance pass over the field with a free starting position (Sellers'
// algorithm), tracking where each alignment begins.
//
//   score = errors / query_len + start_offset / distance
//
// 0.0 is an exact match at the start of a field. A field matches when its
// best score is <= threshold; a record's score is its best field score.
// A pass costs O(query_len * field_len). Short fields are scored with plain
// Levenshtein from `strsim`.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::ToolRecord;
use crate::util::constants::{SEARCH_DISTANCE, SEARCH_THRESHOLD};
use std::cmp::Ordering;

/// Record fields the index can match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKey {
    Title,
    Description,
    /// Each tag is scored on its own.
    Tags,
}

/// Matching parameters. The defaults are what the directory uses.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub keys: Vec<SearchKey>,
    /// Maximum accepted score.
    pub threshold: f64,
    /// Characters of drift from the start of a field that cost a full 1.0.
    pub distance: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            keys: vec![SearchKey::Title, SearchKey::Description, SearchKey::Tags],
            threshold: SEARCH_THRESHOLD,
            distance: SEARCH_DISTANCE,
        }
    }
}

/// One matching record.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    /// Position of the record in the source list.
    pub index: usize,
    pub record: &'a ToolRecord,
    pub score: f64,
}

/// Fuzzy index over an immutable slice of tool records.
#[derive(Debug, Clone)]
pub struct ToolSearchIndex<'a> {
    records: &'a [ToolRecord],
    options: SearchOptions,
}

impl<'a> ToolSearchIndex<'a> {
    pub fn new(records: &'a [ToolRecord], options: SearchOptions) -> Self {
        Self { records, options }
    }

    /// Records matching `query`, best match first.
    ///
    /// An empty (or whitespace-only) query returns every record in its
    /// original order with score 0. Equal scores keep the original order.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'a>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self
                .records
                .iter()
                .enumerate()
                .map(|(index, record)| SearchHit {
                    index,
                    record,
                    score: 0.0,
                })
                .collect();
        }

        let mut hits: Vec<SearchHit<'a>> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                self.record_score(&query, record).map(|score| SearchHit {
                    index,
                    record,
                    score,
                })
            })
            .collect();

        // `sort_by` is stable, so ties stay in catalog order.
        hits.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));

        tracing::trace!(query = %query, hits = hits.len(), "Tool search");
        hits
    }

    fn record_score(&self, query: &str, record: &ToolRecord) -> Option<f64> {
        let mut best: Option<f64> = None;
        for key in &self.options.keys {
            let score = match key {
                SearchKey::Title => self.field_score(query, &record.title),
                SearchKey::Description => self.field_score(query, &record.description),
                SearchKey::Tags => record
                    .tags
                    .iter()
                    .filter_map(|tag| self.field_score(query, tag))
                    .reduce(f64::min),
            };
            if let Some(score) = score {
                best = Some(best.map_or(score, |b| b.min(score)));
            }
        }
        best
    }

    /// Best score of `query` (already lowercased) against `field`, or `None`
    /// if no alignment scores within the threshold.
    fn field_score(&self, query: &str, field: &str) -> Option<f64> {
        let query: Vec<char> = query.chars().collect();
        let text: Vec<char> = field.to_lowercase().chars().collect();
        let m = query.len();
        if m == 0 || text.is_empty() {
            return None;
        }
        let threshold = self.options.threshold;

        // Fields no longer than the query are scored whole.
        if text.len() <= m {
            let errors = strsim::generic_levenshtein(&query, &text);
            let score = errors as f64 / m as f64;
            return (score <= threshold).then_some(score);
        }

        // Row i holds, per text end position j, the cheapest alignment of
        // query[..i] ending at j and the offset where that alignment starts.
        let mut prev: Vec<Cell> = (0..=text.len())
            .map(|j| Cell {
                errors: 0,
                start: j,
            })
            .collect();
        let mut cur = prev.clone();

        for (i, &qc) in query.iter().enumerate() {
            cur[0] = Cell {
                errors: i + 1,
                start: 0,
            };
            for (j, &tc) in text.iter().enumerate() {
                let diag = prev[j].step(usize::from(qc != tc));
                let up = prev[j + 1].step(1);
                let left = cur[j].step(1);
                cur[j + 1] = diag.better(up).better(left);
            }
            std::mem::swap(&mut prev, &mut cur);
        }

        prev.iter()
            .skip(1)
            .map(|cell| cell.errors as f64 / m as f64 + self.location_penalty(cell.start))
            .filter(|score| *score <= threshold)
            .reduce(f64::min)
    }

    fn location_penalty(&self, start: usize) -> f64 {
        if self.options.distance == 0 {
            return if start == 0 { 0.0 } else { f64::INFINITY };
        }
        start as f64 / self.options.distance as f64
    }
}

/// One dynamic-programming cell: edit count and alignment start offset.
#[derive(Debug, Clone, Copy)]
struct Cell {
    errors: usize,
    start: usize,
}

impl Cell {
    fn step(self, cost: usize) -> Cell {
        Cell {
            errors: self.errors + cost,
            start: self.start,
        }
    }

    /// Fewer errors wins; ties go to the earlier start.
    fn better(self, other: Cell) -> Cell {
        if (other.errors, other.start) < (self.errors, self.start) {
            other
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, description: &str, tags: &[&str]) -> ToolRecord {
        ToolRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            screenshot: String::new(),
            url: String::new(),
        }
    }

    fn sample() -> Vec<ToolRecord> {
        vec![
            record(
                "json",
                "JSON Formatter",
                "Format and validate JSON data.",
                &["json", "formatter"],
            ),
            record(
                "base64",
                "Base64 Encoder",
                "Encode and decode Base64 strings.",
                &["base64", "encoder", "decoder"],
            ),
            record(
                "regex",
                "Regex Tester",
                "Test and debug regular expressions.",
                &["regex", "testing"],
            ),
        ]
    }

    fn ids(hits: &[SearchHit<'_>]) -> Vec<String> {
        hits.iter().map(|h| h.record.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let records = sample();
        let index = ToolSearchIndex::new(&records, SearchOptions::default());
        assert_eq!(ids(&index.search("")), vec!["json", "base64", "regex"]);
        assert_eq!(ids(&index.search("   ")), vec!["json", "base64", "regex"]);
    }

    #[test]
    fn test_exact_title_match_scores_zero() {
        let records = sample();
        let index = ToolSearchIndex::new(&records, SearchOptions::default());
        let hits = index.search("Regex");
        assert_eq!(ids(&hits), vec!["regex"]);
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn test_tolerates_a_typo() {
        let records = sample();
        let index = ToolSearchIndex::new(&records, SearchOptions::default());
        // One substitution in eight characters: 0.125.
        let hits = index.search("formattr");
        assert_eq!(ids(&hits), vec!["json"]);
        assert!(hits[0].score > 0.0 && hits[0].score <= SEARCH_THRESHOLD);
    }

    #[test]
    fn test_tag_match() {
        let records = sample();
        let index = ToolSearchIndex::new(&records, SearchOptions::default());
        assert_eq!(ids(&index.search("decoder")), vec!["base64"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let records = sample();
        let index = ToolSearchIndex::new(&records, SearchOptions::default());
        assert!(index.search("zzqxv").is_empty());
    }

    #[test]
    fn test_better_matches_sort_first() {
        let records = vec![
            record("late", "Misc", "A tool that mentions encoder late", &[]),
            record("early", "Encoder", "", &[]),
        ];
        let index = ToolSearchIndex::new(&records, SearchOptions::default());
        let hits = index.search("encoder");
        assert_eq!(ids(&hits), vec!["early", "late"]);
        assert!(hits[0].score < hits[1].score);
    }

    #[test]
    fn test_far_matches_are_penalised_out() {
        let long = format!("{}needle", "x".repeat(40));
        let records = vec![record("far", "Title", &long, &[])];
        let index = ToolSearchIndex::new(&records, SearchOptions::default());
        assert!(index.search("needle").is_empty());
    }

    #[test]
    fn test_offset_adds_location_penalty() {
        let records = sample();
        let index = ToolSearchIndex::new(&records, SearchOptions::default());
        // "validate" starts 11 characters into the JSON description.
        let hits = index.search("validate");
        assert_eq!(ids(&hits), vec!["json"]);
        assert!((hits[0].score - 0.11).abs() < 1e-9, "{}", hits[0].score);
    }

    #[test]
    fn test_long_query_over_large_catalog_stays_fast() {
        let records: Vec<ToolRecord> = (0..300)
            .map(|i| {
                record(
                    &format!("tool-{i}"),
                    &format!("Utility number {i} for everyday conversions"),
                    &format!(
                        "Tool {i} converts, formats, validates and inspects assorted developer data quickly."
                    ),
                    &["utility", "developer"],
                )
            })
            .collect();
        let index = ToolSearchIndex::new(&records, SearchOptions::default());
        let query = "converts, formats, validates and inspects assorted developer data quickly";

        let started = std::time::Instant::now();
        let hits = index.search(query);
        let elapsed = started.elapsed();

        assert_eq!(hits.len(), 300);
        assert!(
            elapsed < std::time::Duration::from_secs(2),
            "search took {elapsed:?}"
        );
    }

    #[test]
    fn test_keys_restrict_fields() {
        let records = sample();
        let options = SearchOptions {
            keys: vec![SearchKey::Title],
            ..SearchOptions::default()
        };
        let index = ToolSearchIndex::new(&records, options);
        assert!(index.search("decoder").is_empty());
        assert_eq!(ids(&index.search("encoder")), vec!["base64"]);
    }
}
