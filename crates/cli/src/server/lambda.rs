//! Lambda custom runtime: poll the runtime API for API Gateway proxy events,
//! answer each through the shared DoH handler.

use dohgate_api::{handle_event, ApiGatewayProxyRequest};
use dohgate_application::use_cases::HandleDohQueryUseCase;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const RUNTIME_API_VERSION: &str = "2018-06-01";
const REQUEST_ID_HEADER: &str = "Lambda-Runtime-Aws-Request-Id";
const POLL_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Host and port of the runtime API, when running inside a Lambda container.
pub fn lambda_runtime_api() -> Option<String> {
    std::env::var_os("LAMBDA_TASK_ROOT")?;
    std::env::var("AWS_LAMBDA_RUNTIME_API").ok()
}

pub async fn run_lambda_runtime(
    runtime_api: &str,
    handler: Arc<HandleDohQueryUseCase>,
) -> anyhow::Result<()> {
    let base = format!("http://{}/{}/runtime", runtime_api, RUNTIME_API_VERSION);
    // The next-invocation call long-polls, so no request timeout here.
    let client = reqwest::Client::builder().build()?;

    info!(runtime_api = %runtime_api, "Starting Lambda runtime loop");

    loop {
        let invocation = match client
            .get(format!("{}/invocation/next", base))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Failed to fetch next invocation");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        let Some(request_id) = invocation
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
        else {
            warn!("Invocation without request id, skipping");
            tokio::time::sleep(POLL_RETRY_DELAY).await;
            continue;
        };

        let payload = match invocation.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                report_error(&client, &base, &request_id, &e.to_string()).await;
                continue;
            }
        };

        let event: ApiGatewayProxyRequest = match serde_json::from_slice(&payload) {
            Ok(event) => event,
            Err(e) => {
                report_error(&client, &base, &request_id, &e.to_string()).await;
                continue;
            }
        };

        let response = handle_event(&handler, event).await;
        debug!(request_id = %request_id, status = response.status_code, "Invocation handled");

        let body = match serde_json::to_vec(&response) {
            Ok(body) => body,
            Err(e) => {
                report_error(&client, &base, &request_id, &e.to_string()).await;
                continue;
            }
        };
        if let Err(e) = client
            .post(format!("{}/invocation/{}/response", base, request_id))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
        {
            error!(request_id = %request_id, error = %e, "Failed to post invocation response");
        }
    }
}

async fn report_error(client: &reqwest::Client, base: &str, request_id: &str, message: &str) {
    warn!(request_id = %request_id, error = %message, "Invocation failed");

    let body = serde_json::json!({
        "errorMessage": message,
        "errorType": "InvalidEvent",
    });
    if let Err(e) = client
        .post(format!("{}/invocation/{}/error", base, request_id))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .send()
        .await
    {
        error!(request_id = %request_id, error = %e, "Failed to post invocation error");
    }
}
