//! Answer confidence classification
//!
//! Decides whether a synthesized answer actually carries information or is
//! the model saying, in one phrasing or another, that it found nothing.

/// Phrases whose presence marks an answer as carrying no usable information.
const LOW_CONFIDENCE_INDICATORS: &[&str] = &[
    "do not provide",
    "does not contain",
    "sorry",
    "no information",
    "no data",
    "data not available",
    "no answer",
    "unknown",
    "no details",
    "insufficient",
    "no record",
    "no mention",
    "no reference",
    "no clue",
    "no hint",
    "no context",
    "no explanation",
    "no insight",
    "no specifics",
    "no particular",
    "no information available",
];

/// Returns true when the answer contains any low-confidence indicator.
///
/// Matching is case-insensitive and substring-based, not whole-word; the
/// first match wins. No match means the answer is treated as confident.
pub fn is_low_confidence(answer: &str) -> bool {
    let lowered = answer.to_lowercase();
    LOW_CONFIDENCE_INDICATORS
        .iter()
        .any(|indicator| lowered.contains(indicator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_low_confidence("There is NO INFORMATION available"));
        assert!(is_low_confidence("The document Does Not Contain that detail."));
        assert!(is_low_confidence("UNKNOWN"));
    }

    #[test]
    fn substantive_answers_are_confident() {
        assert!(!is_low_confidence("The CEO is Jane Doe"));
        assert!(!is_low_confidence("Employees receive 20 vacation days per year."));
        assert!(!is_low_confidence(""));
    }

    #[test]
    fn matches_are_substring_based() {
        assert!(is_low_confidence("That remains unknown to the authors."));
        assert!(is_low_confidence("I'm sorry, I could not find that."));
    }

    #[test]
    fn every_indicator_triggers() {
        for indicator in LOW_CONFIDENCE_INDICATORS {
            let answer = format!("Well, {indicator} here.");
            assert!(is_low_confidence(&answer), "indicator {indicator:?} did not trigger");
        }
    }
}
