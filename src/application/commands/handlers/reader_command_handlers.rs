//! Reader Command Handlers

use std::sync::Arc;

use uuid::Uuid;

use crate::application::commands::reader_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{PassageRepositoryPort, ReaderEntry, ReaderRegistryPort};
use crate::application::synchronizer::{spawn_reader, ReaderHandle, SynchronizerConfig};
use crate::domain::passage::Passage;

/// OpenReader Handler - 加载文章、启动同步器并注册阅读会话
pub struct OpenReaderHandler {
    passage_repo: Arc<dyn PassageRepositoryPort>,
    registry: Arc<dyn ReaderRegistryPort>,
    config: SynchronizerConfig,
}

impl OpenReaderHandler {
    pub fn new(
        passage_repo: Arc<dyn PassageRepositoryPort>,
        registry: Arc<dyn ReaderRegistryPort>,
        config: SynchronizerConfig,
    ) -> Self {
        Self {
            passage_repo,
            registry,
            config,
        }
    }

    pub async fn handle(
        &self,
        cmd: OpenReaderCommand,
    ) -> Result<OpenReaderResponse, ApplicationError> {
        let record = self
            .passage_repo
            .find_by_slug(&cmd.slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Passage", &cmd.slug))?;
        let passage = Passage::try_from(record)?;

        let reader_id = Uuid::new_v4().to_string();
        let (handle, _task) = spawn_reader(
            reader_id.clone(),
            passage.clone(),
            self.config,
            cmd.native,
            cmd.proxy,
        );

        if let Err(e) = self
            .registry
            .register(ReaderEntry::new(handle.clone(), passage.id().value()))
        {
            handle.shutdown();
            return Err(e.into());
        }

        tracing::info!(
            reader_id = %reader_id,
            passage_id = %passage.id(),
            slug = %cmd.slug,
            token_count = passage.token_count(),
            "Reader opened"
        );

        Ok(OpenReaderResponse {
            reader_id,
            passage,
            handle,
        })
    }
}

/// CloseReader Handler - 停止播放并注销阅读会话
pub struct CloseReaderHandler {
    registry: Arc<dyn ReaderRegistryPort>,
}

impl CloseReaderHandler {
    pub fn new(registry: Arc<dyn ReaderRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        cmd: CloseReaderCommand,
    ) -> Result<ReaderCommandResponse, ApplicationError> {
        let entry = self.registry.unregister(&cmd.reader_id)?;
        entry.handle.shutdown();

        tracing::info!(reader_id = %cmd.reader_id, "Reader closed");

        Ok(ReaderCommandResponse {
            reader_id: cmd.reader_id,
        })
    }
}

fn lookup_reader(
    registry: &dyn ReaderRegistryPort,
    reader_id: &str,
) -> Result<ReaderHandle, ApplicationError> {
    Ok(registry.get(reader_id)?.handle)
}

/// SpeakToken Handler - 点读单词
pub struct SpeakTokenHandler {
    registry: Arc<dyn ReaderRegistryPort>,
}

impl SpeakTokenHandler {
    pub fn new(registry: Arc<dyn ReaderRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        cmd: SpeakTokenCommand,
    ) -> Result<ReaderCommandResponse, ApplicationError> {
        lookup_reader(self.registry.as_ref(), &cmd.reader_id)?.speak_token(cmd.index)?;

        tracing::debug!(reader_id = %cmd.reader_id, index = cmd.index, "Speak token requested");

        Ok(ReaderCommandResponse {
            reader_id: cmd.reader_id,
        })
    }
}

/// SpeakAll Handler - 从头朗读全文
pub struct SpeakAllHandler {
    registry: Arc<dyn ReaderRegistryPort>,
}

impl SpeakAllHandler {
    pub fn new(registry: Arc<dyn ReaderRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        cmd: SpeakAllCommand,
    ) -> Result<ReaderCommandResponse, ApplicationError> {
        lookup_reader(self.registry.as_ref(), &cmd.reader_id)?.speak_all()?;

        tracing::debug!(reader_id = %cmd.reader_id, "Speak all requested");

        Ok(ReaderCommandResponse {
            reader_id: cmd.reader_id,
        })
    }
}

/// StopReading Handler - 停止朗读
pub struct StopReadingHandler {
    registry: Arc<dyn ReaderRegistryPort>,
}

impl StopReadingHandler {
    pub fn new(registry: Arc<dyn ReaderRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        cmd: StopReadingCommand,
    ) -> Result<ReaderCommandResponse, ApplicationError> {
        lookup_reader(self.registry.as_ref(), &cmd.reader_id)?.stop()?;

        tracing::debug!(reader_id = %cmd.reader_id, "Stop requested");

        Ok(ReaderCommandResponse {
            reader_id: cmd.reader_id,
        })
    }
}
