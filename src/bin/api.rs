use std::sync::Arc;
use tracing::info;
use trading_plan_generator::{
    api::start_server, generator::PlanGenerator, invoker::GeminiInvoker,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let gemini_api_key = std::env::var("GEMINI_API_KEY").unwrap_or_else(|_| {
        eprintln!("GEMINI_API_KEY not set in .env; generation requests will fail until it is");
        String::new()
    });

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    info!("Trading Plan Generator - API Server");
    info!("Port: {}", api_port);

    let generator = Arc::new(PlanGenerator::new(Box::new(GeminiInvoker::new(
        gemini_api_key,
    ))));

    info!("Generator initialized, starting API server");

    start_server(generator, api_port).await?;

    Ok(())
}
