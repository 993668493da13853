//! In-Memory Reader Registry Implementation

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{ReaderEntry, ReaderError, ReaderRegistryPort};

/// 内存阅读会话注册表
pub struct InMemoryReaderRegistry {
    readers: DashMap<String, ReaderEntry>,
}

impl InMemoryReaderRegistry {
    pub fn new() -> Self {
        Self {
            readers: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 关闭所有阅读会话（进程退出时调用）
    pub fn shutdown_all(&self) {
        for entry in self.readers.iter() {
            entry.handle.shutdown();
        }
        let count = self.readers.len();
        self.readers.clear();
        tracing::info!(count, "All readers shut down");
    }
}

impl Default for InMemoryReaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderRegistryPort for InMemoryReaderRegistry {
    fn register(&self, entry: ReaderEntry) -> Result<String, ReaderError> {
        let reader_id = entry.reader_id().to_string();
        match self.readers.entry(reader_id.clone()) {
            Entry::Occupied(_) => Err(ReaderError::AlreadyExists(reader_id)),
            Entry::Vacant(slot) => {
                tracing::debug!(
                    reader_id = %reader_id,
                    passage_id = entry.passage_id,
                    "Reader registered"
                );
                slot.insert(entry);
                Ok(reader_id)
            }
        }
    }

    fn get(&self, reader_id: &str) -> Result<ReaderEntry, ReaderError> {
        self.readers
            .get(reader_id)
            .map(|e| e.clone())
            .ok_or_else(|| ReaderError::NotFound(reader_id.to_string()))
    }

    fn unregister(&self, reader_id: &str) -> Result<ReaderEntry, ReaderError> {
        self.readers
            .remove(reader_id)
            .map(|(_, entry)| {
                tracing::debug!(reader_id = %reader_id, "Reader unregistered");
                entry
            })
            .ok_or_else(|| ReaderError::NotFound(reader_id.to_string()))
    }

    fn list_all(&self) -> Vec<String> {
        self.readers.iter().map(|e| e.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        NativeSpeechPort, PlaybackError, ProxiedAudioPort, SpeechRequest,
    };
    use crate::application::synchronizer::{spawn_reader, ReaderHandle, SynchronizerConfig};
    use crate::domain::passage::{Language, Passage, PassageId, Title};

    struct Mute;

    impl NativeSpeechPort for Mute {
        fn speak(&self, _request: SpeechRequest) -> Result<(), PlaybackError> {
            Ok(())
        }
        fn cancel(&self) {}
    }

    impl ProxiedAudioPort for Mute {
        fn play(&self, _request: SpeechRequest) -> Result<(), PlaybackError> {
            Ok(())
        }
        fn pause_and_unload(&self) {}
    }

    fn reader(id: &str) -> ReaderHandle {
        let passage = Passage::new(
            PassageId::new(1),
            Title::new("t").unwrap(),
            "one two",
            Language::English,
            None,
            None,
        );
        let mute = Arc::new(Mute);
        spawn_reader(id, passage, SynchronizerConfig::default(), mute.clone(), mute).0
    }

    #[tokio::test]
    async fn test_reader_lifecycle() {
        let registry = InMemoryReaderRegistry::new();

        let id = registry.register(ReaderEntry::new(reader("r-1"), 1)).unwrap();
        assert_eq!(id, "r-1");
        assert!(matches!(
            registry.register(ReaderEntry::new(reader("r-1"), 1)),
            Err(ReaderError::AlreadyExists(_))
        ));

        let entry = registry.get("r-1").unwrap();
        assert_eq!(entry.passage_id, 1);
        assert_eq!(registry.list_all(), vec!["r-1".to_string()]);

        registry.unregister("r-1").unwrap();
        assert!(matches!(registry.get("r-1"), Err(ReaderError::NotFound(_))));
        assert!(matches!(
            registry.unregister("r-1"),
            Err(ReaderError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_shutdown_all_closes_readers() {
        let registry = InMemoryReaderRegistry::new();
        let handle = reader("r-2");
        registry.register(ReaderEntry::new(handle.clone(), 1)).unwrap();

        registry.shutdown_all();
        assert!(registry.list_all().is_empty());

        // 任务退出后 inbox 关闭
        for _ in 0..100 {
            if handle.is_closed() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(handle.is_closed());
    }
}
