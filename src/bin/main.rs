use tracing::info;
use trading_plan_generator::{
    catalog,
    generator::PlanGenerator,
    invoker::MockInvoker,
    models::{PlanConfig, ReportDepth, RiskStyle},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("Trading plan generator starting");

    // Mock invoker: exercises the full pipeline without an API key
    let generator = PlanGenerator::new(Box::new(MockInvoker));

    let config = PlanConfig {
        capital: 2000.0,
        currency: "₹".to_string(),
        market: "Crypto (Futures/Spot)".to_string(),
        duration_days: 30,
        experience_level: catalog::EXPERIENCE_LEVELS[1].to_string(),
        risk_style: RiskStyle::Balanced,
        language: "English".to_string(),
        strategies: vec!["Smart Money Concepts (ICT/SMC)".to_string()],
        report_depth: ReportDepth::Deep,
    };

    info!(
        strategies = ?config.strategies,
        depth = %config.report_depth,
        "Generating plan"
    );

    match generator.generate(&config).await {
        Ok(generated) => {
            println!("\n=== GENERATED PLAN ===");
            println!("Plan ID: {}", generated.plan_id);
            println!("Model: {}", generated.model);
            println!("Title: {}", generated.plan.title);
            println!("Strategy: {}", generated.plan.strategy_name);
            println!("Timeframe: {}", generated.plan.timeframe);
            println!("\nEntry Criteria:");
            for (i, rule) in generated.plan.entry_criteria.iter().enumerate() {
                println!("  {}: {}", i + 1, rule);
            }
            println!(
                "\nMax risk per trade: {}%",
                generated.plan.risk_management.max_risk_per_trade_percent
            );
            println!(
                "Max daily loss: {}%",
                generated.plan.risk_management.max_daily_loss_percent
            );
            println!("Weeks in roadmap: {}", generated.plan.weekly_roadmap.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("Plan generation failed: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}
