use dohgate_application::use_cases::HandleDohQueryUseCase;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub doh: Arc<HandleDohQueryUseCase>,
}

impl AppState {
    pub fn new(doh: Arc<HandleDohQueryUseCase>) -> Self {
        Self { doh }
    }
}
