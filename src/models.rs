//! Core data models for the trading plan generator
//!
//! Wire names are camelCase because the JSON contract with the model (and
//! with the rendering frontend) is camelCase throughout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskStyle {
    Conservative,
    Balanced,
    Aggressive,
}

/// Verbosity tier. Controls the prompt instruction only; output length is
/// never validated against it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportDepth {
    Standard,
    Deep,
    GodMode,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Importance {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResourceKind {
    Book,
    Video,
    Tool,
}

//
// ================= Configuration =================
//

/// User-supplied parameters describing the desired plan. Constructed once
/// per submission and read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanConfig {
    pub capital: f64,
    pub currency: String,
    pub market: String,
    pub duration_days: u32,
    pub experience_level: String,
    pub risk_style: RiskStyle,
    pub language: String,
    /// Ordered, distinct, 1-3 entries from the strategy catalog
    pub strategies: Vec<String>,
    pub report_depth: ReportDepth,
}

//
// ================= Plan =================
//

/// The full structured document returned by the model. Constructed once from
/// a single call; a new submission fully replaces any prior plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradingPlan {
    pub title: String,
    pub executive_summary: String,

    // Strategy section
    pub strategy_name: String,
    pub strategy_description: String,
    pub strategy_philosophy: String,
    pub setup_explanation: String,
    pub timeframe: String,
    pub best_sessions: Vec<String>,
    pub entry_criteria: Vec<String>,
    pub exit_criteria: Vec<String>,

    // Risk section
    pub risk_management: RiskManagement,
    pub allocation_stats: Vec<AllocationStat>,

    // Psychology section
    pub psychology_rules: Vec<String>,
    pub psychology_detailed: Vec<PsychologyTopic>,

    // Execution
    pub pre_trade_checklist: Vec<ChecklistItem>,
    pub post_trade_routine: Vec<String>,
    pub weekly_roadmap: Vec<WeekPlan>,

    // Financials
    pub equity_curve_data: Vec<EquityPoint>,

    // Extras
    pub daily_routine: Vec<String>,
    pub contract_terms: Vec<String>,
    pub glossary: Vec<GlossaryItem>,
    pub recommended_resources: Vec<Resource>,
    pub visual_patterns_to_look_for: Vec<String>,
    pub win_rate_scenarios: Vec<WinRateScenario>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskManagement {
    pub max_risk_per_trade_percent: f64,
    pub max_daily_loss_percent: f64,
    pub max_open_positions: u32,
    pub risk_of_ruin_probability: String,
    pub position_sizing_rule: String,
    pub stop_loss_guideline: String,
    pub drawdown_recovery_rule: String,
    pub risk_overview: String,
}

/// No sum-to-100 invariant is enforced on allocation values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationStat {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PsychologyTopic {
    pub topic: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub item: String,
    pub importance: Importance,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
    pub week_number: u32,
    pub focus: String,
    pub goal: String,
    pub rules: Vec<String>,
    pub micro_habits: Vec<String>,
}

/// Day values are not required to be monotone or start at 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EquityPoint {
    pub day: u32,
    pub projected_balance: f64,
    pub worst_case_balance: f64,
    pub risk_cap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryItem {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WinRateScenario {
    pub win_rate: f64,
    pub outcome: String,
}

//
// ================= Generation Record =================
//

/// A validated plan with provenance. Never mutated or merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    pub plan_id: Uuid,
    pub model: String,
    pub generated_at: DateTime<Utc>,
    pub config: PlanConfig,
    pub plan: TradingPlan,
}

impl fmt::Display for RiskStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskStyle::Conservative => "Conservative",
            RiskStyle::Balanced => "Balanced",
            RiskStyle::Aggressive => "Aggressive",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for ReportDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportDepth::Standard => "Standard",
            ReportDepth::Deep => "Deep",
            ReportDepth::GodMode => "GodMode",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_wire_names_are_camel_case() {
        let config = PlanConfig {
            capital: 2000.0,
            currency: "₹".to_string(),
            market: "Crypto".to_string(),
            duration_days: 30,
            experience_level: "Intermediate (1-3 Years)".to_string(),
            risk_style: RiskStyle::Balanced,
            language: "English".to_string(),
            strategies: vec!["Smart Money Concepts (ICT/SMC)".to_string()],
            report_depth: ReportDepth::Deep,
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"durationDays\":30"));
        assert!(json.contains("\"experienceLevel\""));
        assert!(json.contains("\"riskStyle\":\"Balanced\""));
        assert!(json.contains("\"reportDepth\":\"Deep\""));
    }

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(
            serde_json::to_string(&ReportDepth::GodMode).unwrap(),
            "\"GodMode\""
        );
        assert_eq!(
            serde_json::to_string(&Importance::High).unwrap(),
            "\"High\""
        );
        assert_eq!(
            serde_json::to_string(&ResourceKind::Tool).unwrap(),
            "\"Tool\""
        );
    }

    #[test]
    fn test_resource_kind_field_serializes_as_type() {
        let resource = Resource {
            title: "Trading in the Zone".to_string(),
            kind: ResourceKind::Book,
            description: "Risk psychology classic".to_string(),
        };
        let json = serde_json::to_string(&resource).unwrap();
        assert!(json.contains("\"type\":\"Book\""));
    }
}
