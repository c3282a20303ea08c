//! Shared server state.

use std::sync::Arc;

use pneumo_core::Classifier;

/// State handed to every handler. The classifier is loaded once at startup
/// and only read afterwards.
pub struct ServerState {
    pub classifier: Arc<dyn Classifier>,
}

impl ServerState {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }
}
