//! Reader Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::ReaderRegistryPort;
use crate::application::queries::GetReaderHighlight;
use crate::domain::HighlightState;

/// GetReaderHighlight Handler
pub struct GetReaderHighlightHandler {
    registry: Arc<dyn ReaderRegistryPort>,
}

impl GetReaderHighlightHandler {
    pub fn new(registry: Arc<dyn ReaderRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        query: GetReaderHighlight,
    ) -> Result<HighlightState, ApplicationError> {
        let entry = self.registry.get(&query.reader_id)?;
        Ok(entry.handle.highlight())
    }
}
