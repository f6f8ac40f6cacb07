use std::sync::Arc;

use carbvision_core::{application::CarbVisionService, domain::session::SessionController};
use tokio::sync::Mutex;

use crate::args::Args;

/// Shared by every handler. The process serves exactly one session.
#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: Arc<CarbVisionService>,
    pub session: Arc<Mutex<SessionController>>,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: CarbVisionService) -> Self {
        Self {
            args,
            service: Arc::new(service),
            session: Arc::new(Mutex::new(SessionController::new())),
        }
    }
}
