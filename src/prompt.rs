//! Request builder
//!
//! Turns a configuration into the natural-language instruction and the
//! schema declaration handed to the model invoker. Pure data transformation;
//! no I/O happens here.

use serde_json::Value;

use crate::catalog::validate_strategies;
use crate::error::Result;
use crate::models::{PlanConfig, ReportDepth};
use crate::schema::plan_response_schema;

/// Model used for plan generation
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// What the invocation collaborator receives: instruction text, the output
/// shape the model must conform to, and the model identifier.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub prompt: String,
    pub schema: Value,
    pub model: String,
}

/// Depth-to-instruction mapping. Pure lookup; exactly one variant per tier,
/// never blended.
pub fn depth_instruction(depth: ReportDepth) -> &'static str {
    match depth {
        ReportDepth::Standard => {
            "Provide a concise professional plan (approx 10 pages content). \
             Focus on core mechanics."
        }
        ReportDepth::Deep => {
            "Provide a deep-dive analysis (approx 20 pages content). \
             Include nuances, caveats, and detailed psychology."
        }
        ReportDepth::GodMode => {
            "GOD MODE: Provide extreme detail (30+ pages content). Cover every \
             possible edge case, advanced institutional concepts, and exhaustive \
             risk modeling. This must be the ultimate trading bible."
        }
    }
}

/// Single-focus line for one strategy; a synthesis directive for two or
/// three. The synthesis directive names every selected strategy, forbids
/// treating them independently, assigns each a distinct functional role and
/// demands one conflict-free unified rule set.
pub fn strategy_instruction(strategies: &[String]) -> String {
    let list = strategies.join(", ");

    if strategies.len() > 1 {
        format!(
            "**CRITICAL - HYBRID STRATEGY SYNTHESIS**: The user wants to combine \
             these methodologies: [{}]. DO NOT treat them separately. You must \
             INVENT a specific system that uses the strengths of each (e.g., Use \
             {} for direction bias, and {} for entry triggers). Create a unified, \
             conflict-free algorithm.",
            list, strategies[0], strategies[1]
        )
    } else {
        format!("Strategy Focus: {}.", list)
    }
}

/// Assemble the full instruction text for a configuration.
pub fn build_prompt(config: &PlanConfig) -> String {
    format!(
        r#"Act as a World-Class Hedge Fund Manager, Quantitative Risk Analyst, and Elite Trading Psychologist.
Create a "Master Level", Institutional-Grade Trading Bible.

**LANGUAGE INSTRUCTION: GENERATE EVERYTHING IN {language}.**

User Profile:
- Capital: {currency} {capital}
- Market: {market}
- Experience: {experience}
- Risk Style: {risk_style}
- Plan Duration: {duration} days
- Report Depth: {depth} ({depth_instruction})

{strategy_instruction}

REQUIREMENTS:
1. **Workable Strategy (High Accuracy)**:
   - Define the "Philosophy" (Why it works).
   - Define the "Setup" (Visual description).
   - **Entry Criteria**: Must be Step-by-Step (e.g., 1. Wait for liquidity sweep, 2. MSS, 3. Entry on FVG).
   - **Exit Criteria**: Precise invalidation points.
2. **Math & Risk**:
   - Calculate "Risk of Ruin".
   - Define position sizing relative to {capital}.
   - Provide a "Risk Overview" narrative.
3. **Psychology Deep Dive**:
   - Provide detailed content on specific topics (e.g., Tilt, FOMO, Process over Outcome).
4. **{duration}-Day Roadmap**:
   - Break down into weeks. Each week has a focus, goal, rules, and habits.
5. **Journaling**:
   - Create Pre-trade and Post-trade routines.
6. **Financials**:
   - Generate realistic {duration}-day equity curve data points.

Output must be extremely detailed, professional, and ready for print.
"#,
        language = config.language,
        currency = config.currency,
        capital = config.capital,
        market = config.market,
        experience = config.experience_level,
        risk_style = config.risk_style,
        duration = config.duration_days,
        depth = config.report_depth,
        depth_instruction = depth_instruction(config.report_depth),
        strategy_instruction = strategy_instruction(&config.strategies),
    )
}

/// Build the complete request for one submission. Rejects selections the
/// form collaborator should never produce (0 or more than 3 strategies).
pub fn build_request(config: &PlanConfig) -> Result<ModelRequest> {
    validate_strategies(&config.strategies)?;

    Ok(ModelRequest {
        prompt: build_prompt(config),
        schema: plan_response_schema(),
        model: DEFAULT_MODEL.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use crate::models::RiskStyle;

    fn config_with_strategies(strategies: &[&str]) -> PlanConfig {
        PlanConfig {
            capital: 2000.0,
            currency: "₹".to_string(),
            market: "Crypto".to_string(),
            duration_days: 30,
            experience_level: "Intermediate (1-3 Years)".to_string(),
            risk_style: RiskStyle::Balanced,
            language: "English".to_string(),
            strategies: strategies.iter().map(|s| s.to_string()).collect(),
            report_depth: ReportDepth::Deep,
        }
    }

    #[test]
    fn test_single_strategy_has_no_synthesis_directive() {
        let config = config_with_strategies(&["Smart Money Concepts (ICT/SMC)"]);
        let prompt = build_prompt(&config);

        assert!(prompt.contains("Strategy Focus: Smart Money Concepts (ICT/SMC)."));
        assert!(!prompt.contains("HYBRID STRATEGY SYNTHESIS"));
    }

    #[test]
    fn test_two_strategies_get_synthesis_with_distinct_roles() {
        let config = config_with_strategies(&["Wyckoff Method", "Breakout Trading"]);
        let prompt = build_prompt(&config);

        assert!(prompt.contains("HYBRID STRATEGY SYNTHESIS"));
        assert!(prompt.contains("Wyckoff Method"));
        assert!(prompt.contains("Breakout Trading"));
        assert!(prompt.contains("Use Wyckoff Method for direction bias"));
        assert!(prompt.contains("Breakout Trading for entry triggers"));
        assert!(prompt.contains("unified, conflict-free"));
    }

    #[test]
    fn test_three_strategies_all_named() {
        let config =
            config_with_strategies(&["Wyckoff Method", "Breakout Trading", "Elliott Wave Theory"]);
        let instruction = strategy_instruction(&config.strategies);

        for strategy in &config.strategies {
            assert!(instruction.contains(strategy.as_str()));
        }
        assert!(instruction.contains("DO NOT treat them separately"));
    }

    #[test]
    fn test_depth_instruction_is_a_pure_lookup() {
        // Same depth, different configs -> identical text
        let a = config_with_strategies(&["A"]);
        let mut b = config_with_strategies(&["B"]);
        b.capital = 99999.0;
        b.language = "Greek (Ελληνικά)".to_string();

        assert_eq!(
            depth_instruction(a.report_depth),
            depth_instruction(b.report_depth)
        );

        // Exactly three fixed variants
        assert!(depth_instruction(ReportDepth::Standard).contains("concise"));
        assert!(depth_instruction(ReportDepth::Deep).contains("deep-dive"));
        assert!(depth_instruction(ReportDepth::GodMode).contains("GOD MODE"));
    }

    #[test]
    fn test_deep_tier_example_scenario() {
        // ₹2000 / SMC / Deep / Balanced / English / Intermediate / 30d / Crypto
        let config = config_with_strategies(&["Smart Money Concepts (ICT/SMC)"]);
        let prompt = build_prompt(&config);

        assert!(prompt.contains("deep-dive"));
        assert!(prompt.contains("₹ 2000"));
        assert!(!prompt.contains("HYBRID STRATEGY SYNTHESIS"));
    }

    #[test]
    fn test_prompt_carries_language_and_profile() {
        let mut config = config_with_strategies(&["Wyckoff Method"]);
        config.language = "Spanish (Español)".to_string();
        let prompt = build_prompt(&config);

        assert!(prompt.contains("GENERATE EVERYTHING IN Spanish (Español)"));
        assert!(prompt.contains("- Market: Crypto"));
        assert!(prompt.contains("- Risk Style: Balanced"));
        assert!(prompt.contains("- Plan Duration: 30 days"));
    }

    #[test]
    fn test_build_request_rejects_out_of_bounds_selections() {
        let empty = config_with_strategies(&[]);
        assert!(matches!(
            build_request(&empty),
            Err(PlanError::Configuration(_))
        ));

        let four = config_with_strategies(&["A", "B", "C", "D"]);
        assert!(matches!(
            build_request(&four),
            Err(PlanError::Configuration(_))
        ));
    }

    #[test]
    fn test_build_request_carries_schema_and_model() {
        let config = config_with_strategies(&["Wyckoff Method"]);
        let request = build_request(&config).unwrap();

        assert_eq!(request.model, DEFAULT_MODEL);
        assert!(request.schema["required"].is_array());
        assert!(request.prompt.contains("Wyckoff Method"));
    }
}
