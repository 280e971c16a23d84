use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use dohgate_domain::DohResponse;

/// HTTP rendering of a gateway response.
pub struct WireResponse(pub DohResponse);

impl From<DohResponse> for WireResponse {
    fn from(response: DohResponse) -> Self {
        Self(response)
    }
}

impl IntoResponse for WireResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Response::new(Body::from(self.0.body));
        *response.status_mut() = status;
        if let Some(content_type) = self.0.content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        response
    }
}
