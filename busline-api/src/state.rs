use busline_core::ReservationRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ReservationRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn ReservationRepository>) -> Self {
        Self { repository }
    }
}
