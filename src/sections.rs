//! The section table: the day's class-period grid.
//!
//! A "section" is an ordinal class-period slot within a day (1st period, 2nd
//! period, ...). Which wall-clock range each section covers is institution
//! specific, so the table is injectable configuration: a compiled-in default
//! plus a TOML override.

use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{TimetableError, TimetableResult};

/// Ordinal class-period index within a day, 1-based.
pub type Section = u8;

/// The wall-clock range of one section. Half-open: a time equal to `end`
/// already falls in the following gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpan {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Ordered table of section time ranges for one day.
///
/// Section `n` is the table's `n`-th span (1-based). Spans must be internally
/// ordered (`start < end`) and pairwise non-overlapping in chronological
/// order; gaps between spans are breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTable {
    spans: Vec<SectionSpan>,
}

/// On-disk shape of a section table override:
///
/// ```toml
/// [[section]]
/// start = "08:00"
/// end = "08:45"
/// ```
#[derive(Deserialize)]
struct SectionTableFile {
    #[serde(rename = "section")]
    sections: Vec<SectionSpan>,
}

impl Default for SectionTable {
    /// The stock 12-section day: four morning, four afternoon, four evening
    /// periods of 45 minutes each.
    fn default() -> Self {
        let spans = [
            ((8, 0), (8, 45)),
            ((8, 55), (9, 40)),
            ((10, 0), (10, 45)),
            ((10, 55), (11, 40)),
            ((14, 0), (14, 45)),
            ((14, 55), (15, 40)),
            ((16, 0), (16, 45)),
            ((16, 55), (17, 40)),
            ((19, 0), (19, 45)),
            ((19, 55), (20, 40)),
            ((20, 50), (21, 35)),
            ((21, 45), (22, 30)),
        ]
        .iter()
        .map(|&((sh, sm), (eh, em))| SectionSpan {
            start: NaiveTime::from_hms_opt(sh, sm, 0).unwrap(),
            end: NaiveTime::from_hms_opt(eh, em, 0).unwrap(),
        })
        .collect();

        // The stock table is well-formed by construction.
        SectionTable { spans }
    }
}

impl SectionTable {
    /// Build a table from spans, validating ordering and disjointness.
    pub fn new(spans: Vec<SectionSpan>) -> TimetableResult<Self> {
        if spans.is_empty() {
            return Err(TimetableError::Config(
                "section table must define at least one section".into(),
            ));
        }
        for (i, span) in spans.iter().enumerate() {
            if span.start >= span.end {
                return Err(TimetableError::Config(format!(
                    "section {} must start before it ends ({} >= {})",
                    i + 1,
                    span.start,
                    span.end
                )));
            }
        }
        for pair in spans.windows(2) {
            if pair[1].start < pair[0].end {
                return Err(TimetableError::Config(format!(
                    "sections must be chronological and disjoint: {} begins before {} ends",
                    pair[1].start, pair[0].end
                )));
            }
        }
        Ok(SectionTable { spans })
    }

    /// Load an institution-specific table from a TOML file.
    pub fn from_toml_file(path: &Path) -> TimetableResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> TimetableResult<Self> {
        let file: SectionTableFile = toml::from_str(content)
            .map_err(|e| TimetableError::Config(format!("invalid section table: {e}")))?;
        Self::new(file.sections)
    }

    /// The section whose range contains `time`, or `None` when `time` falls in
    /// a break or outside class hours. A miss is a normal outcome.
    pub fn section_for_time(&self, time: NaiveTime) -> Option<Section> {
        self.spans
            .iter()
            .position(|span| span.start <= time && time < span.end)
            .map(|i| (i + 1) as Section)
    }

    /// The current or most recently started section: the latest section whose
    /// start is `<= time`. `None` when `time` precedes the whole grid.
    pub fn section_at_or_before(&self, time: NaiveTime) -> Option<Section> {
        self.spans
            .iter()
            .rposition(|span| span.start <= time)
            .map(|i| (i + 1) as Section)
    }

    pub fn span(&self, section: Section) -> Option<&SectionSpan> {
        if section == 0 {
            return None;
        }
        self.spans.get(section as usize - 1)
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
