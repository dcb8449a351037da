use std::sync::Arc;

use roster_core::SellerRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<SellerRepository>,
}

impl AppState {
    pub fn new(repository: Arc<SellerRepository>) -> Self {
        Self { repository }
    }
}
