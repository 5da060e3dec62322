//! Model invocation seam
//!
//! The generator talks to the external model exclusively through the
//! [`ModelInvoker`] trait: one await point, a text payload or an error.
//! Retry, backoff and cancellation are deliberately absent; a caller that
//! wants them wraps the trait.

use async_trait::async_trait;

use crate::error::{PlanError, Result};
use crate::models::{
    AllocationStat, ChecklistItem, EquityPoint, GlossaryItem, Importance, PsychologyTopic,
    Resource, ResourceKind, RiskManagement, TradingPlan, WeekPlan, WinRateScenario,
};
use crate::prompt::ModelRequest;

pub mod gemini;
pub use gemini::GeminiInvoker;

/// Trait for model invocation (single-shot, textual)
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, request: &ModelRequest) -> Result<String>;
}

/// Mock invoker for development & testing
/// Keeps the system functional without the Gemini dependency
pub struct MockInvoker;

#[async_trait]
impl ModelInvoker for MockInvoker {
    async fn invoke(&self, _request: &ModelRequest) -> Result<String> {
        serde_json::to_string(&sample_plan())
            .map_err(|e| PlanError::Invocation(format!("mock serialization failed: {}", e)))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A small schema-conformant plan used by the mock invoker and tests.
pub fn sample_plan() -> TradingPlan {
    TradingPlan {
        title: "The 30-Day Liquidity Playbook".to_string(),
        executive_summary: "A session-based reversal plan built around swept \
            liquidity, strict daily loss caps and a weekly skill progression."
            .to_string(),
        strategy_name: "Session Liquidity Reversal".to_string(),
        strategy_description: "Fade the first liquidity sweep of the London or \
            New York session after a confirmed shift in market structure."
            .to_string(),
        strategy_philosophy: "Session opens concentrate resting orders; the \
            first sweep routinely reverses once that liquidity is consumed."
            .to_string(),
        setup_explanation: "Equal lows under an Asian-range consolidation get \
            swept at the London open, followed by a sharp reclaim of the range."
            .to_string(),
        timeframe: "15m entries / 1h bias".to_string(),
        best_sessions: strings(&["London Open", "New York AM"]),
        entry_criteria: strings(&[
            "Wait for the prior session low to be swept",
            "Confirm a 15m market structure shift",
            "Enter on the first fair value gap retrace",
        ]),
        exit_criteria: strings(&[
            "Structure break against the position",
            "Opposing session high reached",
        ]),
        risk_management: RiskManagement {
            max_risk_per_trade_percent: 1.0,
            max_daily_loss_percent: 3.0,
            max_open_positions: 2,
            risk_of_ruin_probability: "Below 1% at a 45% win rate risking 1R per trade"
                .to_string(),
            position_sizing_rule: "Risk 1% of current equity per position".to_string(),
            stop_loss_guideline: "Beyond the sweep wick plus average spread".to_string(),
            drawdown_recovery_rule: "Halve size after three consecutive losses".to_string(),
            risk_overview: "Capital preservation comes first; daily caps keep a \
                losing streak survivable."
                .to_string(),
        },
        allocation_stats: vec![
            AllocationStat {
                name: "Active risk".to_string(),
                value: 20.0,
            },
            AllocationStat {
                name: "Cash buffer".to_string(),
                value: 80.0,
            },
        ],
        psychology_rules: strings(&[
            "No trades after two consecutive losses",
            "Journal before and after every session",
        ]),
        psychology_detailed: vec![
            PsychologyTopic {
                topic: "Tilt".to_string(),
                content: "Stop for the day the moment a trade is taken to win \
                    back a loss rather than to follow the setup."
                    .to_string(),
            },
            PsychologyTopic {
                topic: "Process over Outcome".to_string(),
                content: "Grade each trade on rule adherence, never on PnL."
                    .to_string(),
            },
        ],
        pre_trade_checklist: vec![
            ChecklistItem {
                item: "Higher timeframe bias marked".to_string(),
                importance: Importance::High,
            },
            ChecklistItem {
                item: "News calendar checked".to_string(),
                importance: Importance::Medium,
            },
        ],
        post_trade_routine: strings(&[
            "Screenshot the entry and exit",
            "Grade the trade against the checklist",
        ]),
        weekly_roadmap: vec![
            WeekPlan {
                week_number: 1,
                focus: "Observation".to_string(),
                goal: "Twenty journaled setups, no live risk".to_string(),
                rules: strings(&["Demo only", "Mark every sweep of a session low"]),
                micro_habits: strings(&["Pre-market bias note before 08:00"]),
            },
            WeekPlan {
                week_number: 2,
                focus: "Execution at minimum size".to_string(),
                goal: "Ten live trades at 0.25% risk".to_string(),
                rules: strings(&["One trade per session", "Full checklist before entry"]),
                micro_habits: strings(&["End-of-day journal review"]),
            },
        ],
        equity_curve_data: vec![
            EquityPoint {
                day: 1,
                projected_balance: 2000.0,
                worst_case_balance: 1980.0,
                risk_cap: 1940.0,
            },
            EquityPoint {
                day: 15,
                projected_balance: 2110.0,
                worst_case_balance: 1905.0,
                risk_cap: 1847.0,
            },
            EquityPoint {
                day: 30,
                projected_balance: 2245.0,
                worst_case_balance: 1860.0,
                risk_cap: 1804.0,
            },
        ],
        daily_routine: strings(&[
            "Mark session highs and lows before the open",
            "Review the economic calendar",
            "Close the platform after the daily loss cap is hit",
        ]),
        contract_terms: strings(&[
            "I will not exceed my daily loss limit",
            "I will not move a stop loss away from price",
        ]),
        glossary: vec![GlossaryItem {
            term: "Liquidity sweep".to_string(),
            definition: "A push through an obvious high or low that fills \
                resting orders before reversing."
                .to_string(),
        }],
        recommended_resources: vec![Resource {
            title: "Trading in the Zone".to_string(),
            kind: ResourceKind::Book,
            description: "The standard text on probabilistic thinking and \
                trade psychology."
                .to_string(),
        }],
        visual_patterns_to_look_for: strings(&[
            "Equal lows beneath a tight consolidation",
            "Sharp single-candle reclaim of a swept level",
        ]),
        win_rate_scenarios: vec![
            WinRateScenario {
                win_rate: 40.0,
                outcome: "Break-even after fees at a 1.5R average winner".to_string(),
            },
            WinRateScenario {
                win_rate: 50.0,
                outcome: "Roughly 8% monthly growth at 1% risk per trade".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::build_request;
    use crate::models::{PlanConfig, ReportDepth, RiskStyle};
    use crate::validator::parse_plan;

    #[tokio::test]
    async fn test_mock_output_passes_the_validator() {
        let config = PlanConfig {
            capital: 2000.0,
            currency: "₹".to_string(),
            market: "Crypto".to_string(),
            duration_days: 30,
            experience_level: "Intermediate (1-3 Years)".to_string(),
            risk_style: RiskStyle::Balanced,
            language: "English".to_string(),
            strategies: vec!["Smart Money Concepts (ICT/SMC)".to_string()],
            report_depth: ReportDepth::Standard,
        };
        let request = build_request(&config).unwrap();

        let raw = MockInvoker.invoke(&request).await.unwrap();
        let plan = parse_plan(&raw).unwrap();
        assert_eq!(plan, sample_plan());
    }
}
