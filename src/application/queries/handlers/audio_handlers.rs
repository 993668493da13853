//! Audio Query Handlers - 代理音频（缓存优先）

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    generate_cache_key, AudioCachePort, AudioRelayPort, CacheMetadata,
};
use crate::application::queries::{GetProxiedAudio, ProxiedAudioResponse};

/// GetProxiedAudio Handler
///
/// 缓存命中直接返回；未命中时请求远端并写入缓存。
/// 缓存读写失败只记录日志，不影响返回音频。
pub struct GetProxiedAudioHandler {
    relay: Arc<dyn AudioRelayPort>,
    audio_cache: Arc<dyn AudioCachePort>,
}

impl GetProxiedAudioHandler {
    pub fn new(relay: Arc<dyn AudioRelayPort>, audio_cache: Arc<dyn AudioCachePort>) -> Self {
        Self { relay, audio_cache }
    }

    pub async fn handle(
        &self,
        query: GetProxiedAudio,
    ) -> Result<ProxiedAudioResponse, ApplicationError> {
        let text = query.text.trim();
        if text.is_empty() {
            return Err(ApplicationError::validation("Missing text"));
        }

        let cache_key = generate_cache_key(text, &query.lang);

        match self.audio_cache.get(&cache_key).await {
            Ok(Some(cached)) => {
                tracing::debug!(cache_key = %cache_key, "Proxied audio cache hit");
                return Ok(ProxiedAudioResponse {
                    audio_data: cached.audio_data,
                    content_type: cached.content_type,
                    cached: true,
                });
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(cache_key = %cache_key, error = %e, "Audio cache read failed");
            }
        }

        let relayed = self.relay.fetch(text, &query.lang).await.map_err(|e| {
            tracing::error!(lang = %query.lang, error = %e, "Audio relay failed");
            ApplicationError::from(e)
        })?;

        let metadata = CacheMetadata {
            text_hash: format!("{:x}", md5::compute(text.as_bytes())),
            language: query.lang.clone(),
            content_type: relayed.content_type.clone(),
        };
        if let Err(e) = self
            .audio_cache
            .put(&cache_key, relayed.audio_data.clone(), metadata)
            .await
        {
            tracing::warn!(cache_key = %cache_key, error = %e, "Audio cache write failed");
        }

        tracing::info!(
            lang = %query.lang,
            size = relayed.audio_data.len(),
            "Proxied audio fetched"
        );

        Ok(ProxiedAudioResponse {
            audio_data: relayed.audio_data,
            content_type: relayed.content_type,
            cached: false,
        })
    }
}
