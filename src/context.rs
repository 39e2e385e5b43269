use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::HostingService;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub hosting: Arc<dyn HostingService>,
}

impl AppContext {
    pub fn new(config: AppConfig, hosting: Arc<dyn HostingService>) -> Self {
        Self { config, hosting }
    }
}
