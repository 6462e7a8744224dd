//! Marker-bounded, line-oriented extraction.
//!
//! Generated files carry comment markers around the blocks the generator
//! owns. This parser scans a file once, tracks which sections are open, and
//! hands every line inside an open section to that section's extractor.
//!
//! Lines that do not match are skipped. Nothing here can fail: files may have
//! been edited by hand, and a strict grammar would reject them.

use std::collections::BTreeMap;

use regex::Regex;

/// How a matching line becomes an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    /// The whole trimmed line, if the pattern matches it.
    FullMatch,
    /// Same behavior as `FullMatch`; kept separate for import sections.
    ImportLine,
    /// The first capture group of the pattern.
    MatchGroup,
}

impl Extractor {
    fn extract(self, line: &str, pattern: &Regex) -> Option<String> {
        match self {
            Self::FullMatch | Self::ImportLine => {
                let trimmed = line.trim();
                pattern.is_match(trimmed).then(|| trimmed.to_string())
            }
            Self::MatchGroup => pattern
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string()),
        }
    }
}

/// One tracked section.
#[derive(Debug, Clone)]
pub struct SectionSpec {
    pub name: String,
    pub start_marker: String,
    pub end_marker: String,
    pub pattern: Regex,
    pub extractor: Extractor,
}

impl SectionSpec {
    pub fn new(
        name: impl Into<String>,
        start_marker: impl Into<String>,
        end_marker: impl Into<String>,
        pattern: Regex,
        extractor: Extractor,
    ) -> Self {
        Self {
            name: name.into(),
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
            pattern,
            extractor,
        }
    }
}

/// Extract entries for every section, in scan order.
///
/// Every section name appears in the result, with an empty list when nothing
/// matched.
pub fn parse_sections(text: &str, sections: &[SectionSpec]) -> BTreeMap<String, Vec<String>> {
    let mut results: BTreeMap<String, Vec<String>> = sections
        .iter()
        .map(|s| (s.name.clone(), Vec::new()))
        .collect();
    let mut active = vec![false; sections.len()];

    for line in text.lines() {
        for (index, section) in sections.iter().enumerate() {
            if line.contains(&section.start_marker) {
                active[index] = true;
            } else if active[index] && line.contains(&section.end_marker) {
                active[index] = false;
            }

            if !active[index] {
                continue;
            }

            if let Some(entry) = section
                .extractor
                .extract(line, &section.pattern)
                .filter(|entry| !entry.is_empty())
            {
                if let Some(list) = results.get_mut(&section.name) {
                    list.push(entry);
                }
            }
        }
    }

    results
}
