use lambda_runtime::{run, service_fn, LambdaEvent};
use serde_json::Value;
use tracing::info;

use status_badges::{function_handler, BadgeController};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    // Initialize the tracing subscriber
    tracing_subscriber::fmt()
        .with_ansi(false)
        // CloudWatch adds the ingestion time
        .without_time()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Status badge Lambda function initialized");

    let controller = BadgeController::new();
    let controller = &controller;
    run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(controller, event).await
    }))
    .await
}
