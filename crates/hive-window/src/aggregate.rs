//! Sector assessment
//!
//! Pure function of the window contents: count entries matching the pain
//! label, threshold into a coarse status. No side effects.
//!
//! The match here is a *substring* match, unlike the exact match gating the
//! write path. Every value ever written is the literal "PAIN" today, so the
//! two agree, but the asymmetry is contractual and must not be tightened.

use hive_common::{HiveStatus, PAIN_STATE, PANIC_THRESHOLD};

/// Result of assessing a sector's window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorAssessment {
    /// Count of entries containing the pain label
    pub pain_level: usize,
    /// PANIC iff pain_level exceeds the threshold
    pub status: HiveStatus,
}

/// Assess a window span read from the store
///
/// `entries` is expected to already be limited to the assessment span
/// (newest first); an absent or expired window reads as an empty slice and
/// assesses as CALM with pain level 0.
pub fn assess(entries: &[String]) -> SectorAssessment {
    let pain_level = entries.iter().filter(|e| e.contains(PAIN_STATE)).count();
    let status = if pain_level > PANIC_THRESHOLD {
        HiveStatus::Panic
    } else {
        HiveStatus::Calm
    };
    SectorAssessment { pain_level, status }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_window_is_calm() {
        let assessment = assess(&[]);
        assert_eq!(assessment.pain_level, 0);
        assert_eq!(assessment.status, HiveStatus::Calm);
    }

    #[test]
    fn test_threshold_boundary() {
        // 5 matches stays CALM, 6 tips to PANIC
        let five = labels(&["PAIN", "PAIN", "PAIN", "PAIN", "PAIN"]);
        assert_eq!(assess(&five).status, HiveStatus::Calm);
        assert_eq!(assess(&five).pain_level, 5);

        let six = labels(&["PAIN", "PAIN", "PAIN", "PAIN", "PAIN", "PAIN"]);
        assert_eq!(assess(&six).status, HiveStatus::Panic);
        assert_eq!(assess(&six).pain_level, 6);
    }

    #[test]
    fn test_substring_match_counts() {
        let entries = labels(&["PAIN_SPIKE", "NO_PAIN", "HUNGER", "pain"]);
        let assessment = assess(&entries);
        // Case-sensitive substring: the lowercase entry does not match
        assert_eq!(assessment.pain_level, 2);
        assert_eq!(assessment.status, HiveStatus::Calm);
    }

    #[test]
    fn test_non_matching_entries_ignored() {
        let entries = labels(&["HUNGER", "DIZZY", "OK"]);
        let assessment = assess(&entries);
        assert_eq!(assessment.pain_level, 0);
        assert_eq!(assessment.status, HiveStatus::Calm);
    }
}
