//! Plan generation pipeline
//!
//! CONFIG → BUILD REQUEST → INVOKE → VALIDATE → PLAN
//!
//! Strictly sequential, no feedback loop. A submission either yields a
//! fully-typed plan or fails with one distinguishable error; there is no
//! retry and never a partial result.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::invoker::ModelInvoker;
use crate::models::{GeneratedPlan, PlanConfig};
use crate::prompt::build_request;
use crate::validator::parse_plan;

pub struct PlanGenerator {
    invoker: Box<dyn ModelInvoker>,
}

impl PlanGenerator {
    pub fn new(invoker: Box<dyn ModelInvoker>) -> Self {
        Self { invoker }
    }

    /// Run one submission end to end.
    pub async fn generate(&self, config: &PlanConfig) -> Result<GeneratedPlan> {
        let request = build_request(config)?;

        debug!(
            model = %request.model,
            strategies = config.strategies.len(),
            depth = %config.report_depth,
            "Plan request built"
        );

        let raw = self.invoker.invoke(&request).await.inspect_err(|e| {
            warn!(kind = e.kind(), "Model invocation failed: {}", e);
        })?;

        let plan = parse_plan(&raw).inspect_err(|e| {
            warn!(kind = e.kind(), "Response validation failed: {}", e);
        })?;

        let generated = GeneratedPlan {
            plan_id: Uuid::new_v4(),
            model: request.model,
            generated_at: Utc::now(),
            config: config.clone(),
            plan,
        };

        info!(plan_id = ?generated.plan_id, "Plan generated");

        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use crate::invoker::{sample_plan, MockInvoker, ModelInvoker};
    use crate::models::{ReportDepth, RiskStyle};
    use crate::prompt::{ModelRequest, DEFAULT_MODEL};
    use async_trait::async_trait;

    fn test_config(strategies: &[&str]) -> PlanConfig {
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

    #[tokio::test]
    async fn test_generate_with_mock_invoker() {
        let generator = PlanGenerator::new(Box::new(MockInvoker));
        let config = test_config(&["Smart Money Concepts (ICT/SMC)"]);

        let generated = generator.generate(&config).await.unwrap();

        assert_eq!(generated.model, DEFAULT_MODEL);
        assert_eq!(generated.config, config);
        assert_eq!(generated.plan, sample_plan());
    }

    #[tokio::test]
    async fn test_configuration_error_precedes_invocation() {
        struct PanickyInvoker;

        #[async_trait]
        impl ModelInvoker for PanickyInvoker {
            async fn invoke(&self, _request: &ModelRequest) -> crate::error::Result<String> {
                panic!("invoker must not be reached for a bad configuration");
            }
        }

        let generator = PlanGenerator::new(Box::new(PanickyInvoker));
        let config = test_config(&[]);

        let result = generator.generate(&config).await;
        assert!(matches!(result, Err(PlanError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_garbage_response_propagates_as_parse_error() {
        struct GarbageInvoker;

        #[async_trait]
        impl ModelInvoker for GarbageInvoker {
            async fn invoke(&self, _request: &ModelRequest) -> crate::error::Result<String> {
                Ok("not json at all".to_string())
            }
        }

        let generator = PlanGenerator::new(Box::new(GarbageInvoker));
        let config = test_config(&["Wyckoff Method"]);

        let result = generator.generate(&config).await;
        assert!(matches!(result, Err(PlanError::Parse(_))));
    }
}
