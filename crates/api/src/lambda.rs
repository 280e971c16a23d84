//! Function-as-a-service entrypoint: API Gateway proxy events in and out.
//!
//! The event is mapped onto the same `DohRequest` the HTTP listener builds,
//! so both surfaces share decoding, resolution and status mapping.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use dohgate_application::use_cases::HandleDohQueryUseCase;
use dohgate_domain::{DohMethod, DohRequest, DohResponse};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyRequest {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl ApiGatewayProxyRequest {
    /// Header lookup; API Gateway does not normalise header-name case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        })
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    fn body_bytes(&self) -> Result<Bytes, base64::DecodeError> {
        let body = self.body.as_deref().unwrap_or_default();
        if self.is_base64_encoded {
            STANDARD.decode(body).map(Bytes::from)
        } else {
            Ok(Bytes::copy_from_slice(body.as_bytes()))
        }
    }

    fn to_doh_request(&self) -> Result<DohRequest, base64::DecodeError> {
        let method = DohMethod::parse(&self.http_method);
        Ok(DohRequest {
            dns_param: self.query_param("dns").map(str::to_string),
            content_type: self.header("content-type").map(str::to_string),
            body: match method {
                DohMethod::Post => self.body_bytes()?,
                _ => Bytes::new(),
            },
            method,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl From<DohResponse> for ApiGatewayProxyResponse {
    fn from(response: DohResponse) -> Self {
        let mut headers = HashMap::new();
        if let Some(content_type) = response.content_type {
            headers.insert("Content-Type".to_string(), content_type.to_string());
        }
        Self {
            status_code: response.status,
            headers,
            body: STANDARD.encode(&response.body),
            is_base64_encoded: true,
        }
    }
}

pub async fn handle_event(
    use_case: &HandleDohQueryUseCase,
    event: ApiGatewayProxyRequest,
) -> ApiGatewayProxyResponse {
    let request = match event.to_doh_request() {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Event body is not valid base64");
            return DohResponse::failure(400).into();
        }
    };

    use_case.execute(&request).await.into()
}
