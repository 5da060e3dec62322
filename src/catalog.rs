//! Fixed selection catalogs and the strategy toggle
//!
//! The form collaborator renders these catalogs; the toggle is the pure
//! (current set, candidate) -> new set function behind the strategy mixer.

use crate::error::{PlanError, Result};

/// Maximum number of strategies that can be combined into one plan
pub const MAX_STRATEGIES: usize = 3;

/// Static catalogs — zero allocation
pub const STRATEGIES: &[&str] = &[
    "Smart Money Concepts (ICT/SMC)",
    "Price Action (Pure)",
    "Supply & Demand Zones",
    "Wyckoff Method",
    "Trend Following (Swing)",
    "Scalping (High Frequency)",
    "Mean Reversion (Quant)",
    "Breakout Trading",
    "Harmonic Patterns",
    "Volume Spread Analysis (VSA)",
    "RSI/MACD Divergence",
    "Elliott Wave Theory",
];

pub const LANGUAGES: &[&str] = &[
    "English",
    "Hindi (हिंदी)",
    "Spanish (Español)",
    "French (Français)",
    "German (Deutsch)",
    "Chinese (Simplified)",
    "Japanese (日本語)",
    "Russian (Русский)",
    "Portuguese (Português)",
    "Arabic (العربية)",
    "Korean (한국어)",
    "Italian (Italiano)",
    "Turkish (Türkçe)",
    "Dutch (Nederlands)",
    "Polish (Polski)",
    "Swedish (Svenska)",
    "Indonesian (Bahasa Indonesia)",
    "Vietnamese (Tiếng Việt)",
    "Thai (ไทย)",
    "Greek (Ελληνικά)",
];

pub const EXPERIENCE_LEVELS: &[&str] = &[
    "Beginner (0-1 Years)",
    "Intermediate (1-3 Years)",
    "Advanced (3+ Years)",
    "Professional (Full Time)",
];

/// Toggle a strategy in the current selection.
///
/// Selected candidates are removed unless they are the last one left;
/// unselected candidates are added unless the selection is already full.
/// Order of retained entries is preserved.
pub fn toggle_strategy(current: &[String], candidate: &str) -> Vec<String> {
    let mut next: Vec<String> = current.to_vec();

    if let Some(pos) = next.iter().position(|s| s == candidate) {
        if next.len() > 1 {
            next.remove(pos);
        }
    } else if next.len() < MAX_STRATEGIES {
        next.push(candidate.to_string());
    }

    next
}

/// Defensive check used by the request builder. The form collaborator keeps
/// selections in bounds, but a malformed caller must not reach the model.
pub fn validate_strategies(strategies: &[String]) -> Result<()> {
    if strategies.is_empty() {
        return Err(PlanError::Configuration(
            "at least one strategy must be selected".to_string(),
        ));
    }

    if strategies.len() > MAX_STRATEGIES {
        return Err(PlanError::Configuration(format!(
            "at most {} strategies may be combined, got {}",
            MAX_STRATEGIES,
            strategies.len()
        )));
    }

    for (i, strategy) in strategies.iter().enumerate() {
        if strategies[..i].contains(strategy) {
            return Err(PlanError::Configuration(format!(
                "duplicate strategy selection: {}",
                strategy
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_adds_unselected() {
        let current = selection(&["A", "B"]);
        let next = toggle_strategy(&current, "C");
        assert_eq!(next, selection(&["A", "B", "C"]));
    }

    #[test]
    fn test_toggle_removes_selected() {
        let current = selection(&["A", "B", "C"]);
        let next = toggle_strategy(&current, "B");
        assert_eq!(next, selection(&["A", "C"]));
    }

    #[test]
    fn test_fourth_selection_is_a_no_op() {
        let current = selection(&["A", "B", "C"]);
        let next = toggle_strategy(&current, "D");
        assert_eq!(next, current);
    }

    #[test]
    fn test_last_strategy_cannot_be_removed() {
        let current = selection(&["A"]);
        let next = toggle_strategy(&current, "A");
        assert_eq!(next, current);
    }

    #[test]
    fn test_validate_rejects_empty() {
        let result = validate_strategies(&[]);
        assert!(matches!(result, Err(PlanError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_more_than_three() {
        let result = validate_strategies(&selection(&["A", "B", "C", "D"]));
        assert!(matches!(result, Err(PlanError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let result = validate_strategies(&selection(&["A", "A"]));
        assert!(matches!(result, Err(PlanError::Configuration(_))));
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(validate_strategies(&selection(&["A"])).is_ok());
        assert!(validate_strategies(&selection(&["A", "B", "C"])).is_ok());
    }

    #[test]
    fn test_every_toggle_result_is_a_valid_selection() {
        // Walk the catalog from a single selection; each reachable state
        // must pass the builder's defensive check.
        let mut current = selection(&[STRATEGIES[0]]);
        for candidate in STRATEGIES {
            current = toggle_strategy(&current, candidate);
            assert!(validate_strategies(&current).is_ok());
        }
    }
}
