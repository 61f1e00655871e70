//! Line-based include/exclude filtering of converted text.
//!
//! ## Evaluation policy
//!
//! A text passes when it contains at least one line matching *any* include
//! substring and no line matching *any* exclude substring. Matching is
//! case-insensitive substring containment, line by line, top to bottom.
//! The precedence rules, in order:
//!
//! 1. A non-empty exclude list is evaluated first. The first line containing
//!    any excluded substring disqualifies the whole text — even if an include
//!    match would occur later in the scan.
//! 2. A non-empty include list then requires at least one matching line. The
//!    first matching line/substring pair (lines in document order, substrings
//!    in list order per line) is kept as evidence for logging.
//! 3. With both lists empty, every text qualifies: the default behaviour is
//!    "convert everything".
//!
//! The exclude and include scans are deliberately two independent passes
//! rather than one fused scan; when exclude disqualifies, the include pass
//! never runs.

use crate::report::SkipReason;

/// Evidence of a matched line: the line itself and the substring that hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub line: String,
    pub needle: String,
}

/// The filter's verdict for one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    /// The text qualifies. `evidence` is the first include match, or `None`
    /// when no include list was given.
    Pass { evidence: Option<LineMatch> },
    /// The text is disqualified, with the structured reason.
    Reject(SkipReason),
}

impl FilterDecision {
    pub fn is_pass(&self) -> bool {
        matches!(self, FilterDecision::Pass { .. })
    }
}

/// Normalised include/exclude criteria.
///
/// Legacy single-string options are merged in by
/// [`FilterCriteria::with_legacy`] at the boundary, so the rest of the crate
/// only ever sees the list form. An empty list means "no constraint from
/// this axis"; [`FilterCriteria::default`] therefore passes everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl FilterCriteria {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    /// Build criteria from the list options plus the legacy single-string
    /// options, appending each legacy value unless the exact string is
    /// already present in the corresponding list.
    pub fn with_legacy(
        mut include: Vec<String>,
        mut exclude: Vec<String>,
        legacy_include: Option<String>,
        legacy_exclude: Option<String>,
    ) -> Self {
        if let Some(text) = legacy_include {
            if !include.contains(&text) {
                include.push(text);
            }
        }
        if let Some(text) = legacy_exclude {
            if !exclude.contains(&text) {
                exclude.push(text);
            }
        }
        Self { include, exclude }
    }

    pub fn include(&self) -> &[String] {
        &self.include
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// True when neither axis constrains anything.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Apply the full evaluation policy to `text`.
    pub fn evaluate(&self, text: &str) -> FilterDecision {
        // Exclude wins over include, so scan for it first.
        if !self.exclude.is_empty() {
            if let Some(hit) = find_first_line_with_any(text, &self.exclude) {
                return FilterDecision::Reject(SkipReason::ContainsExcluded {
                    needle: hit.needle,
                    line: hit.line,
                });
            }
        }

        if !self.include.is_empty() {
            return match find_first_line_with_any(text, &self.include) {
                Some(hit) => FilterDecision::Pass {
                    evidence: Some(hit),
                },
                None => FilterDecision::Reject(SkipReason::NoIncludeMatch),
            };
        }

        FilterDecision::Pass { evidence: None }
    }
}

/// Scan lines top to bottom for the first one containing any of `needles`
/// (case-insensitive substring). Substrings are tried in list order per line.
///
/// Returns `None` when `needles` is empty or nothing matched.
pub fn find_first_line_with_any(text: &str, needles: &[String]) -> Option<LineMatch> {
    if needles.is_empty() {
        return None;
    }
    let lowered: Vec<String> = needles.iter().map(|n| n.to_lowercase()).collect();
    for line in text.lines() {
        let line_lower = line.to_lowercase();
        for (needle, needle_lower) in needles.iter().zip(&lowered) {
            if line_lower.contains(needle_lower.as_str()) {
                return Some(LineMatch {
                    line: line.to_string(),
                    needle: needle.clone(),
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn include_match_reports_first_line_and_needle() {
        let text = "header\nTotal Invoice: $5\nInvoice again";
        let hit = find_first_line_with_any(text, &list(&["invoice"])).unwrap();
        assert_eq!(hit.line, "Total Invoice: $5");
        assert_eq!(hit.needle, "invoice");
    }

    #[test]
    fn match_is_case_insensitive_both_ways() {
        let text = "QUARTERLY REPORT";
        assert!(find_first_line_with_any(text, &list(&["Report"])).is_some());
        let text = "quarterly report";
        assert!(find_first_line_with_any(text, &list(&["REPORT"])).is_some());
    }

    #[test]
    fn needles_tried_in_list_order_per_line() {
        let text = "alpha beta";
        let hit = find_first_line_with_any(text, &list(&["beta", "alpha"])).unwrap();
        assert_eq!(hit.needle, "beta");
    }

    #[test]
    fn no_needles_never_matches() {
        assert!(find_first_line_with_any("anything", &[]).is_none());
    }

    #[test]
    fn empty_criteria_pass_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.evaluate("whatever").is_pass());
        assert!(criteria.evaluate("").is_pass());
    }

    #[test]
    fn include_only_pass_with_evidence() {
        let criteria = FilterCriteria::new(list(&["invoice"]), vec![]);
        match criteria.evaluate("line one\nInvoice #42\nline three") {
            FilterDecision::Pass { evidence: Some(hit) } => {
                assert_eq!(hit.line, "Invoice #42");
                assert_eq!(hit.needle, "invoice");
            }
            other => panic!("expected pass with evidence, got {other:?}"),
        }
    }

    #[test]
    fn include_only_reject_when_nothing_matches() {
        let criteria = FilterCriteria::new(list(&["invoice"]), vec![]);
        assert_eq!(
            criteria.evaluate("no relevant content"),
            FilterDecision::Reject(crate::report::SkipReason::NoIncludeMatch)
        );
    }

    #[test]
    fn exclude_only_rejects_on_match() {
        let criteria = FilterCriteria::new(vec![], list(&["draft"]));
        match criteria.evaluate("final\nDRAFT COPY\ndone") {
            FilterDecision::Reject(crate::report::SkipReason::ContainsExcluded {
                needle,
                line,
            }) => {
                assert_eq!(needle, "draft");
                assert_eq!(line, "DRAFT COPY");
            }
            other => panic!("expected exclusion, got {other:?}"),
        }
    }

    #[test]
    fn exclude_only_passes_clean_text() {
        let criteria = FilterCriteria::new(vec![], list(&["draft"]));
        assert_eq!(
            criteria.evaluate("final version"),
            FilterDecision::Pass { evidence: None }
        );
    }

    #[test]
    fn exclude_wins_even_when_include_matched_earlier() {
        // The include match appears on line 1, the exclude on line 2:
        // exclusion still disqualifies the whole text.
        let criteria = FilterCriteria::new(list(&["invoice"]), list(&["draft"]));
        let decision = criteria.evaluate("Invoice #1\nDRAFT COPY");
        match decision {
            FilterDecision::Reject(crate::report::SkipReason::ContainsExcluded {
                needle, ..
            }) => assert_eq!(needle, "draft"),
            other => panic!("expected exclusion to win, got {other:?}"),
        }
    }

    #[test]
    fn both_lists_pass_when_only_include_matches() {
        let criteria = FilterCriteria::new(list(&["invoice"]), list(&["draft"]));
        assert!(criteria.evaluate("Invoice #1\nfinal").is_pass());
    }

    #[test]
    fn legacy_options_promoted_into_lists() {
        let criteria = FilterCriteria::with_legacy(
            list(&["invoice"]),
            vec![],
            Some("receipt".into()),
            Some("draft".into()),
        );
        assert_eq!(criteria.include(), &["invoice", "receipt"]);
        assert_eq!(criteria.exclude(), &["draft"]);
    }

    #[test]
    fn legacy_duplicate_not_appended_twice() {
        let criteria = FilterCriteria::with_legacy(
            list(&["invoice"]),
            vec![],
            Some("invoice".into()),
            None,
        );
        assert_eq!(criteria.include(), &["invoice"]);
    }

    #[test]
    fn legacy_only_criteria_behave_like_lists() {
        let criteria =
            FilterCriteria::with_legacy(vec![], vec![], Some("invoice".into()), None);
        assert!(criteria.evaluate("an INVOICE line").is_pass());
        assert!(!criteria.evaluate("nothing here").is_pass());
    }
}
