//! Response validator/adapter
//!
//! Converts raw model text into a fully-typed [`TradingPlan`] or fails with
//! a single distinguishable error. Validation is all-or-nothing: no partial
//! plan ever leaves this module.

use serde_json::Value;

use crate::error::{PlanError, Result};
use crate::models::{
    AllocationStat, ChecklistItem, EquityPoint, GlossaryItem, Importance, PsychologyTopic,
    Resource, ResourceKind, RiskManagement, TradingPlan, WeekPlan, WinRateScenario,
};

/// Parse and validate one raw response.
pub fn parse_plan(raw: &str) -> Result<TradingPlan> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PlanError::EmptyResponse);
    }

    // Models occasionally fence the payload even in JSON mode.
    let cleaned = strip_fences(trimmed);

    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| PlanError::Parse(format!("response is not valid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(PlanError::SchemaViolation(
            "response must be a JSON object".to_string(),
        ));
    }

    plan_from_value(&value)
}

fn strip_fences(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

//
// ================= Field helpers =================
//

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn field<'a>(value: &'a Value, path: &str, key: &str) -> Result<&'a Value> {
    value.get(key).ok_or_else(|| {
        PlanError::SchemaViolation(format!("missing required field {}", join(path, key)))
    })
}

fn str_field(value: &Value, path: &str, key: &str) -> Result<String> {
    field(value, path, key)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| PlanError::SchemaViolation(format!("{} must be a string", join(path, key))))
}

fn num_field(value: &Value, path: &str, key: &str) -> Result<f64> {
    field(value, path, key)?
        .as_f64()
        .ok_or_else(|| PlanError::SchemaViolation(format!("{} must be a number", join(path, key))))
}

fn int_field(value: &Value, path: &str, key: &str) -> Result<u32> {
    let raw = field(value, path, key)?.as_u64().ok_or_else(|| {
        PlanError::SchemaViolation(format!(
            "{} must be a non-negative integer",
            join(path, key)
        ))
    })?;

    u32::try_from(raw).map_err(|_| {
        PlanError::SchemaViolation(format!("{} is out of range", join(path, key)))
    })
}

fn seq<'a>(value: &'a Value, path: &str, key: &str) -> Result<&'a Vec<Value>> {
    field(value, path, key)?
        .as_array()
        .ok_or_else(|| PlanError::SchemaViolation(format!("{} must be an array", join(path, key))))
}

fn str_seq(value: &Value, path: &str, key: &str) -> Result<Vec<String>> {
    seq(value, path, key)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_owned).ok_or_else(|| {
                PlanError::SchemaViolation(format!(
                    "{}[{}] must be a string",
                    join(path, key),
                    i
                ))
            })
        })
        .collect()
}

//
// ================= Section builders =================
//

fn risk_management(value: &Value) -> Result<RiskManagement> {
    let section = field(value, "", "riskManagement")?;
    let path = "riskManagement";

    Ok(RiskManagement {
        max_risk_per_trade_percent: num_field(section, path, "maxRiskPerTradePercent")?,
        max_daily_loss_percent: num_field(section, path, "maxDailyLossPercent")?,
        max_open_positions: int_field(section, path, "maxOpenPositions")?,
        risk_of_ruin_probability: str_field(section, path, "riskOfRuinProbability")?,
        position_sizing_rule: str_field(section, path, "positionSizingRule")?,
        stop_loss_guideline: str_field(section, path, "stopLossGuideline")?,
        drawdown_recovery_rule: str_field(section, path, "drawdownRecoveryRule")?,
        risk_overview: str_field(section, path, "riskOverview")?,
    })
}

fn allocation_stats(value: &Value) -> Result<Vec<AllocationStat>> {
    seq(value, "", "allocationStats")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("allocationStats[{}]", i);
            Ok(AllocationStat {
                name: str_field(item, &path, "name")?,
                value: num_field(item, &path, "value")?,
            })
        })
        .collect()
}

fn psychology_detailed(value: &Value) -> Result<Vec<PsychologyTopic>> {
    seq(value, "", "psychologyDetailed")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("psychologyDetailed[{}]", i);
            Ok(PsychologyTopic {
                topic: str_field(item, &path, "topic")?,
                content: str_field(item, &path, "content")?,
            })
        })
        .collect()
}

fn pre_trade_checklist(value: &Value) -> Result<Vec<ChecklistItem>> {
    seq(value, "", "preTradeChecklist")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("preTradeChecklist[{}]", i);
            let importance = match str_field(item, &path, "importance")?.as_str() {
                "High" => Importance::High,
                "Medium" => Importance::Medium,
                other => {
                    return Err(PlanError::SchemaViolation(format!(
                        "{}.importance must be one of High, Medium, got \"{}\"",
                        path, other
                    )))
                }
            };

            Ok(ChecklistItem {
                item: str_field(item, &path, "item")?,
                importance,
            })
        })
        .collect()
}

fn weekly_roadmap(value: &Value) -> Result<Vec<WeekPlan>> {
    seq(value, "", "weeklyRoadmap")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("weeklyRoadmap[{}]", i);
            Ok(WeekPlan {
                week_number: int_field(item, &path, "weekNumber")?,
                focus: str_field(item, &path, "focus")?,
                goal: str_field(item, &path, "goal")?,
                rules: str_seq(item, &path, "rules")?,
                micro_habits: str_seq(item, &path, "microHabits")?,
            })
        })
        .collect()
}

fn equity_curve_data(value: &Value) -> Result<Vec<EquityPoint>> {
    seq(value, "", "equityCurveData")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("equityCurveData[{}]", i);
            Ok(EquityPoint {
                day: int_field(item, &path, "day")?,
                projected_balance: num_field(item, &path, "projectedBalance")?,
                worst_case_balance: num_field(item, &path, "worstCaseBalance")?,
                risk_cap: num_field(item, &path, "riskCap")?,
            })
        })
        .collect()
}

fn glossary(value: &Value) -> Result<Vec<GlossaryItem>> {
    seq(value, "", "glossary")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("glossary[{}]", i);
            Ok(GlossaryItem {
                term: str_field(item, &path, "term")?,
                definition: str_field(item, &path, "definition")?,
            })
        })
        .collect()
}

fn recommended_resources(value: &Value) -> Result<Vec<Resource>> {
    seq(value, "", "recommendedResources")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("recommendedResources[{}]", i);
            let kind = match str_field(item, &path, "type")?.as_str() {
                "Book" => ResourceKind::Book,
                "Video" => ResourceKind::Video,
                "Tool" => ResourceKind::Tool,
                other => {
                    return Err(PlanError::SchemaViolation(format!(
                        "{}.type must be one of Book, Video, Tool, got \"{}\"",
                        path, other
                    )))
                }
            };

            Ok(Resource {
                title: str_field(item, &path, "title")?,
                kind,
                description: str_field(item, &path, "description")?,
            })
        })
        .collect()
}

fn win_rate_scenarios(value: &Value) -> Result<Vec<WinRateScenario>> {
    seq(value, "", "winRateScenarios")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("winRateScenarios[{}]", i);
            Ok(WinRateScenario {
                win_rate: num_field(item, &path, "winRate")?,
                outcome: str_field(item, &path, "outcome")?,
            })
        })
        .collect()
}

fn plan_from_value(value: &Value) -> Result<TradingPlan> {
    Ok(TradingPlan {
        title: str_field(value, "", "title")?,
        executive_summary: str_field(value, "", "executiveSummary")?,
        strategy_name: str_field(value, "", "strategyName")?,
        strategy_description: str_field(value, "", "strategyDescription")?,
        strategy_philosophy: str_field(value, "", "strategyPhilosophy")?,
        setup_explanation: str_field(value, "", "setupExplanation")?,
        timeframe: str_field(value, "", "timeframe")?,
        best_sessions: str_seq(value, "", "bestSessions")?,
        entry_criteria: str_seq(value, "", "entryCriteria")?,
        exit_criteria: str_seq(value, "", "exitCriteria")?,
        risk_management: risk_management(value)?,
        allocation_stats: allocation_stats(value)?,
        psychology_rules: str_seq(value, "", "psychologyRules")?,
        psychology_detailed: psychology_detailed(value)?,
        pre_trade_checklist: pre_trade_checklist(value)?,
        post_trade_routine: str_seq(value, "", "postTradeRoutine")?,
        weekly_roadmap: weekly_roadmap(value)?,
        equity_curve_data: equity_curve_data(value)?,
        daily_routine: str_seq(value, "", "dailyRoutine")?,
        contract_terms: str_seq(value, "", "contractTerms")?,
        glossary: glossary(value)?,
        recommended_resources: recommended_resources(value)?,
        visual_patterns_to_look_for: str_seq(value, "", "visualPatternsToLookFor")?,
        win_rate_scenarios: win_rate_scenarios(value)?,
    })
}
