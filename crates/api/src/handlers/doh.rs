use crate::{dto::DohQueryParams, response::WireResponse, state::AppState};
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, Method},
};
use dohgate_domain::{DohMethod, DohRequest};
use tracing::{debug, instrument};

/// GET /dns-query?dns=<base64url>
#[instrument(skip_all, name = "doh_get")]
pub async fn get_dns_query(
    State(state): State<AppState>,
    params: Result<Query<DohQueryParams>, QueryRejection>,
) -> WireResponse {
    // An unparseable query string is reported like a missing parameter.
    let dns = match params {
        Ok(Query(params)) => params.dns,
        Err(rejection) => {
            debug!(error = %rejection, "Rejected DoH query string");
            None
        }
    };
    let request = DohRequest::get(dns);
    state.doh.execute(&request).await.into()
}

/// POST /dns-query (Content-Type: application/dns-udpwireformat)
#[instrument(skip_all, name = "doh_post")]
pub async fn post_dns_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> WireResponse {
    let request = DohRequest::post(content_type(&headers), body);
    state.doh.execute(&request).await.into()
}

/// Any other method is a malformed request.
pub async fn unsupported_method(State(state): State<AppState>, method: Method) -> WireResponse {
    let request = DohRequest {
        method: DohMethod::parse(method.as_str()),
        dns_param: None,
        content_type: None,
        body: Bytes::new(),
    };
    state.doh.execute(&request).await.into()
}

fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
