use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

pub mod controller;
pub mod error;

pub use controller::{BadgeController, CreateStatusBadge};
pub use error::BadgeError;

#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct ErrorPayload {
    pub kind: String,
    pub message: String,
}

impl From<&BadgeError> for ErrorPayload {
    fn from(err: &BadgeError) -> Self {
        ErrorPayload {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

// Serialized as {"ok": ..} or {"error": ..}
#[derive(Serialize, Deserialize, PartialEq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum BadgeOutcome {
    Ok(Value),
    Error(ErrorPayload),
}

impl BadgeOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, BadgeOutcome::Ok(_))
    }
}

pub async fn function_handler<C>(
    controller: &C,
    event: LambdaEvent<Value>,
) -> Result<BadgeOutcome, Error>
where
    C: CreateStatusBadge + ?Sized,
{
    let (payload, _context) = event.into_parts();
    Ok(invoke(controller, payload).await)
}

// Failures, panics included, are logged and returned as BadgeOutcome::Error
pub async fn invoke<C>(controller: &C, event: Value) -> BadgeOutcome
where
    C: CreateStatusBadge + ?Sized,
{
    // the call itself sits inside the guarded future so a panic while
    // building the future is caught as well
    let result = AssertUnwindSafe(async move { controller.create_status_badge(event).await })
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(BadgeError::Panicked(panic_message(panic))));

    match result {
        Ok(response) => {
            info!("status badge created: {}", response);
            BadgeOutcome::Ok(response)
        }
        Err(err) => {
            error!("status badge creation failed: {}", err);
            BadgeOutcome::Error(ErrorPayload::from(&err))
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
