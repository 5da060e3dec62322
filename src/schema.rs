//! Response schema descriptor
//!
//! The fixed structural declaration the model must conform its output to,
//! expressed in the Gemini REST schema dialect. The model enforces this
//! server-side; the validator re-checks it locally field by field.
//!
//! Closed enum sets (checklist importance, resource type) are declared as
//! enums here, not open strings.

use serde_json::{json, Value};

/// Bump when the declared plan shape changes
pub const PLAN_SCHEMA_VERSION: u32 = 1;

/// Structural declaration matching [`crate::models::TradingPlan`] exactly
pub fn plan_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "executiveSummary": { "type": "STRING" },
            "strategyName": { "type": "STRING" },
            "strategyDescription": { "type": "STRING" },
            "strategyPhilosophy": { "type": "STRING" },
            "setupExplanation": { "type": "STRING" },
            "timeframe": { "type": "STRING" },
            "bestSessions": { "type": "ARRAY", "items": { "type": "STRING" } },
            "entryCriteria": { "type": "ARRAY", "items": { "type": "STRING" } },
            "exitCriteria": { "type": "ARRAY", "items": { "type": "STRING" } },
            "riskManagement": {
                "type": "OBJECT",
                "properties": {
                    "maxRiskPerTradePercent": { "type": "NUMBER" },
                    "maxDailyLossPercent": { "type": "NUMBER" },
                    "maxOpenPositions": { "type": "INTEGER" },
                    "riskOfRuinProbability": { "type": "STRING" },
                    "positionSizingRule": { "type": "STRING" },
                    "stopLossGuideline": { "type": "STRING" },
                    "drawdownRecoveryRule": { "type": "STRING" },
                    "riskOverview": { "type": "STRING" }
                },
                "required": [
                    "maxRiskPerTradePercent",
                    "maxDailyLossPercent",
                    "maxOpenPositions",
                    "riskOfRuinProbability",
                    "positionSizingRule",
                    "stopLossGuideline",
                    "drawdownRecoveryRule",
                    "riskOverview"
                ]
            },
            "allocationStats": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "value": { "type": "NUMBER" }
                    },
                    "required": ["name", "value"]
                }
            },
            "psychologyRules": { "type": "ARRAY", "items": { "type": "STRING" } },
            "psychologyDetailed": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "topic": { "type": "STRING" },
                        "content": { "type": "STRING" }
                    },
                    "required": ["topic", "content"]
                }
            },
            "preTradeChecklist": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "item": { "type": "STRING" },
                        "importance": { "type": "STRING", "enum": ["High", "Medium"] }
                    },
                    "required": ["item", "importance"]
                }
            },
            "postTradeRoutine": { "type": "ARRAY", "items": { "type": "STRING" } },
            "weeklyRoadmap": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "weekNumber": { "type": "INTEGER" },
                        "focus": { "type": "STRING" },
                        "goal": { "type": "STRING" },
                        "rules": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "microHabits": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["weekNumber", "focus", "goal", "rules", "microHabits"]
                }
            },
            "equityCurveData": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "INTEGER" },
                        "projectedBalance": { "type": "NUMBER" },
                        "worstCaseBalance": { "type": "NUMBER" },
                        "riskCap": { "type": "NUMBER" }
                    },
                    "required": ["day", "projectedBalance", "worstCaseBalance", "riskCap"]
                }
            },
            "dailyRoutine": { "type": "ARRAY", "items": { "type": "STRING" } },
            "contractTerms": { "type": "ARRAY", "items": { "type": "STRING" } },
            "glossary": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "term": { "type": "STRING" },
                        "definition": { "type": "STRING" }
                    },
                    "required": ["term", "definition"]
                }
            },
            "recommendedResources": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "type": { "type": "STRING", "enum": ["Book", "Video", "Tool"] },
                        "description": { "type": "STRING" }
                    },
                    "required": ["title", "type", "description"]
                }
            },
            "visualPatternsToLookFor": { "type": "ARRAY", "items": { "type": "STRING" } },
            "winRateScenarios": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "winRate": { "type": "NUMBER" },
                        "outcome": { "type": "STRING" }
                    },
                    "required": ["winRate", "outcome"]
                }
            }
        },
        "required": [
            "title",
            "executiveSummary",
            "strategyName",
            "strategyDescription",
            "strategyPhilosophy",
            "setupExplanation",
            "timeframe",
            "bestSessions",
            "entryCriteria",
            "exitCriteria",
            "riskManagement",
            "allocationStats",
            "psychologyRules",
            "psychologyDetailed",
            "preTradeChecklist",
            "postTradeRoutine",
            "weeklyRoadmap",
            "equityCurveData",
            "dailyRoutine",
            "contractTerms",
            "glossary",
            "recommendedResources",
            "visualPatternsToLookFor",
            "winRateScenarios"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_declares_every_required_field() {
        let schema = plan_response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 24);

        let properties = schema["properties"].as_object().unwrap();
        for field in required {
            assert!(
                properties.contains_key(field.as_str().unwrap()),
                "required field {} has no property declaration",
                field
            );
        }
    }

    #[test]
    fn test_enum_sets_are_closed() {
        let schema = plan_response_schema();

        let importance =
            &schema["properties"]["preTradeChecklist"]["items"]["properties"]["importance"];
        assert_eq!(importance["enum"], json!(["High", "Medium"]));

        let resource_type =
            &schema["properties"]["recommendedResources"]["items"]["properties"]["type"];
        assert_eq!(resource_type["enum"], json!(["Book", "Video", "Tool"]));
    }
}
