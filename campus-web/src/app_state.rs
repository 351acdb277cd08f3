use campus_service::{AuthService, ResourceService};
use std::sync::Arc;

/// 应用状态
/// 包含所有需要的服务实例
#[derive(Clone)]
pub struct AppState {
    pub resource_service: Arc<dyn ResourceService>,
    pub auth_service: Arc<dyn AuthService>,
}

impl AppState {
    pub fn new(resource_service: Arc<dyn ResourceService>, auth_service: Arc<dyn AuthService>) -> Self {
        Self {
            resource_service,
            auth_service,
        }
    }
}
