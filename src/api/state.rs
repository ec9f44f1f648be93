//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::SessionManager;
use crate::infrastructure::content::ContentService;
use crate::infrastructure::user::UserService;

/// Services shared by every request handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub content_service: Arc<ContentService>,
    pub session_manager: Arc<SessionManager>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        content_service: Arc<ContentService>,
        session_manager: Arc<SessionManager>,
    ) -> Self {
        Self {
            user_service,
            content_service,
            session_manager,
        }
    }
}
