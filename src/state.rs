use std::sync::Arc;

use crate::observability::metrics::Metrics;
use crate::service::RiderService;
use crate::store::RecordStore;

pub struct AppState {
    pub riders: RiderService,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            riders: RiderService::new(store),
            metrics: Metrics::new(),
        }
    }
}
