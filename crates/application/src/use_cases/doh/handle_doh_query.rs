use super::{encode_response, DecodeDohRequestUseCase, ResolutionOutcome};
use crate::ports::DnsResolver;
use dohgate_domain::{DohRequest, DohResponse, DomainError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Decode → resolve → encode for one DoH request.
///
/// The deadline for the whole request is fixed on arrival; only the
/// resolution stage is timed for logging.
pub struct HandleDohQueryUseCase {
    decoder: Arc<DecodeDohRequestUseCase>,
    resolver: Arc<dyn DnsResolver>,
    timeout: Duration,
    verbose: bool,
}

impl HandleDohQueryUseCase {
    pub fn new(
        decoder: Arc<DecodeDohRequestUseCase>,
        resolver: Arc<dyn DnsResolver>,
        timeout: Duration,
    ) -> Self {
        Self {
            decoder,
            resolver,
            timeout,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn strategy_name(&self) -> &'static str {
        self.resolver.strategy_name()
    }

    pub async fn execute(&self, request: &DohRequest) -> DohResponse {
        let deadline = Instant::now() + self.timeout;

        let query = match self.decoder.execute(request) {
            Ok(query) => query,
            Err(e) => return self.reject(request, &e),
        };

        let start = Instant::now();
        let result = self.resolver.resolve(&query, deadline).await;
        let outcome = ResolutionOutcome::from_result(result, start.elapsed());

        match &outcome {
            ResolutionOutcome::Success { elapsed, wire_bytes } => {
                if self.verbose {
                    info!(
                        method = %request.method,
                        domain = %query.domain,
                        record_type = %query.record_type,
                        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                        bytes = wire_bytes.len(),
                        "Request resolved"
                    );
                } else {
                    debug!(
                        method = %request.method,
                        domain = %query.domain,
                        record_type = %query.record_type,
                        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                        "Request resolved"
                    );
                }
            }
            ResolutionOutcome::Failure {
                kind,
                elapsed,
                detail,
            } => {
                if self.verbose {
                    warn!(
                        method = %request.method,
                        domain = %query.domain,
                        record_type = %query.record_type,
                        kind = %kind,
                        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                        error = %detail,
                        "Request failed"
                    );
                } else {
                    debug!(
                        method = %request.method,
                        domain = %query.domain,
                        record_type = %query.record_type,
                        kind = %kind,
                        error = %detail,
                        "Request failed"
                    );
                }
            }
        }

        encode_response(outcome)
    }

    fn reject(&self, request: &DohRequest, error: &DomainError) -> DohResponse {
        let kind = error.kind();
        if self.verbose {
            info!(method = %request.method, kind = %kind, error = %error, "Request rejected");
        } else {
            debug!(method = %request.method, kind = %kind, error = %error, "Request rejected");
        }
        DohResponse::failure(kind.http_status())
    }
}
