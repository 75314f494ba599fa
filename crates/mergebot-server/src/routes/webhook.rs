//! Inbound webhook endpoint.
//!
//! Signature verification runs over the raw body bytes before anything is
//! parsed; a rejected delivery produces no side effects and no record.
//! Accepted `pull_request` events with an `opened` or `synchronize` action
//! spawn a detached review cycle — the 200 acknowledgement carries no
//! outcome guarantee. Duplicate deliveries are not deduplicated (known gap):
//! a retried webhook starts a second, independent cycle.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::{info, warn};

use mergebot_core::{signature, MergebotError, WebhookPayload};

use crate::error::AppError;
use crate::state::AppState;

const SIGNATURE_HEADER: &str = "x-hub-signature-256";
const EVENT_HEADER: &str = "x-github-event";

pub async fn receive(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let supplied = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());
    if !signature::verify(&app.config.webhook_secret, &body, supplied) {
        warn!("webhook rejected: invalid or missing signature");
        return Err(MergebotError::InvalidSignature.into());
    }

    let event_kind = headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    // A signed but unparseable body is acknowledged and ignored, same as an
    // event kind we don't handle.
    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "webhook body did not parse; ignoring event");
            return Ok(ignored());
        }
    };

    if event_kind == "pull_request" && payload.action.triggers_review() {
        if let Some(pr_number) = payload.number {
            info!(pr = pr_number, "accepted pull_request event; spawning review cycle");
            let orchestrator = app.orchestrator.clone();
            // Fire and forget: the triggering request does not wait for the
            // cycle, and there is no caller-visible handle.
            tokio::spawn(async move {
                orchestrator.run_cycle(pr_number).await;
            });
            return Ok(Json(serde_json::json!({ "message": "PR review started" })));
        }
    }

    Ok(ignored())
}

fn ignored() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Event ignored" }))
}
