//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                        GET   健康检查
//! - /api/passages/featured           GET   首页推荐文章
//! - /api/passages/slug/:slug         GET   按 slug 获取文章
//! - /api/passages/id/:id             GET   按 id 获取文章
//! - /api/categories/:slug            GET   分类列表（子分类 + 文章）
//! - /api/dictionary/:word            GET   仅查希伯来文词典
//! - /api/lookup?word=&lang=          GET   查词典，未命中走在线翻译
//! - /api/proxy-audio?q=&tl=          GET   远端 TTS 音频中转
//! - /api/reader/speak_token          POST  点读单词
//! - /api/reader/speak_all            POST  朗读全文
//! - /api/reader/stop                 POST  停止朗读
//! - /api/reader/:reader_id/highlight GET   当前高亮
//! - /ws/reader/:slug                 WS    阅读会话 WebSocket

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/reader/:slug", get(handlers::reader_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/passages", passage_routes())
        .route("/categories/:slug", get(handlers::list_category))
        .route("/dictionary/:word", get(handlers::lookup_dictionary))
        .route("/lookup", get(handlers::lookup_word))
        .route("/proxy-audio", get(handlers::proxy_audio))
        .nest("/reader", reader_routes())
}

/// Passage 路由
fn passage_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/featured", get(handlers::list_featured_passages))
        .route("/slug/:slug", get(handlers::get_passage_by_slug))
        .route("/id/:id", get(handlers::get_passage_by_id))
}

/// Reader 路由
fn reader_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/speak_token", post(handlers::reader_speak_token))
        .route("/speak_all", post(handlers::reader_speak_all))
        .route("/stop", post(handlers::reader_stop))
        .route("/:reader_id/highlight", get(handlers::reader_highlight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        spawn_reader, AudioRelayPort, CategoryRecord, NativeSpeechPort, PassageRecord,
        PassageRepositoryPort,
        PlaybackError, ProxiedAudioPort, ReaderEntry, ReaderRegistryPort, RelayError,
        RelayedAudio, SpeechRequest, SynchronizerConfig, TranslationError, TranslatorPort,
    };
    use crate::domain::passage::Passage;
    use crate::infrastructure::http::state::ReaderSettings;
    use crate::infrastructure::memory::InMemoryReaderRegistry;
    use crate::infrastructure::persistence::sled::SledAudioCache;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteCategoryRepository,
        SqliteDictionaryRepository, SqlitePassageRepository,
    };
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    struct EchoTranslator;

    #[async_trait]
    impl TranslatorPort for EchoTranslator {
        async fn translate(
            &self,
            text: &str,
            source_lang: &str,
            target_lang: &str,
        ) -> Result<Option<String>, TranslationError> {
            Ok(Some(format!("{} ({}|{})", text, source_lang, target_lang)))
        }
    }

    #[derive(Default)]
    struct FakeRelay {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AudioRelayPort for FakeRelay {
        async fn fetch(&self, text: &str, _lang: &str) -> Result<RelayedAudio, RelayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text == "fail" {
                return Err(RelayError::UpstreamError("status 503".to_string()));
            }
            Ok(RelayedAudio {
                audio_data: b"ID3mp3".to_vec(),
                content_type: "audio/mpeg".to_string(),
            })
        }
    }

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

    struct Fixture {
        router: Router,
        registry: Arc<InMemoryReaderRegistry>,
        relay: Arc<FakeRelay>,
        passages: Arc<SqlitePassageRepository>,
        _cache_dir: TempDir,
    }

    fn passage(id: i64, title: &str, slug: &str, body: &str, lang: &str) -> PassageRecord {
        PassageRecord {
            id,
            title: title.to_string(),
            slug: Some(slug.to_string()),
            body: body.to_string(),
            language_code: lang.to_string(),
            image_url: None,
            category_id: Some(1),
            clicks: 0,
        }
    }

    async fn fixture() -> Fixture {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let passages = Arc::new(SqlitePassageRepository::new(pool.clone()));
        let categories = Arc::new(SqliteCategoryRepository::new(pool.clone()));
        let dictionary = Arc::new(SqliteDictionaryRepository::new(pool));

        categories
            .save(&CategoryRecord {
                id: 1,
                name: "Hebreo".to_string(),
                slug: "hebreo".to_string(),
                parent_id: None,
            })
            .await
            .unwrap();
        categories
            .save(&CategoryRecord {
                id: 2,
                name: "Salmos".to_string(),
                slug: "salmos".to_string(),
                parent_id: Some(1),
            })
            .await
            .unwrap();
        passages
            .save(&passage(1, "Bereshit", "bereshit", "בְּרֵאשִׁית בָּרָא", "he"))
            .await
            .unwrap();
        passages
            .save(&passage(2, "Genesis", "genesis", "In the beginning", "en"))
            .await
            .unwrap();
        dictionary.save("שלום", "paz").await.unwrap();

        let cache_dir = TempDir::new().unwrap();
        let cache = SledAudioCache::open(cache_dir.path().join("cache.sled"), 1024 * 1024, 3600)
            .unwrap()
            .arc();
        let relay = Arc::new(FakeRelay::default());
        let registry = InMemoryReaderRegistry::new().arc();

        let state = AppState::new(
            passages.clone(),
            categories,
            dictionary,
            Arc::new(EchoTranslator),
            relay.clone(),
            cache,
            registry.clone(),
            ReaderSettings::default(),
        );

        Fixture {
            router: create_routes().with_state(Arc::new(state)),
            registry,
            relay,
            passages,
            _cache_dir: cache_dir,
        }
    }

    async fn get(router: &Router, uri: &str) -> Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        router.clone().oneshot(request).await.unwrap()
    }

    async fn post_json(router: &Router, uri: &str, body: Value) -> Value {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        read_json(response).await
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get_json(router: &Router, uri: &str) -> Value {
        read_json(get(router, uri).await).await
    }

    #[tokio::test]
    async fn test_ping() {
        let f = fixture().await;
        let json = get_json(&f.router, "/api/ping").await;
        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_passage_endpoints() {
        let f = fixture().await;

        let json = get_json(&f.router, "/api/passages/slug/bereshit").await;
        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["language"], "he");
        assert_eq!(json["data"]["rtl"], true);

        let json = get_json(&f.router, "/api/passages/id/2").await;
        assert_eq!(json["data"]["slug"], "genesis");
        assert_eq!(json["data"]["rtl"], false);

        let json = get_json(&f.router, "/api/passages/slug/missing").await;
        assert_eq!(json["errno"], 404);
        assert!(json["data"].is_null());

        let json = get_json(&f.router, "/api/passages/featured").await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_category_listing() {
        let f = fixture().await;

        let json = get_json(&f.router, "/api/categories/hebreo").await;
        let entries = json["data"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["slug"], "salmos");
        assert_eq!(entries[0]["is_passage"], false);
        assert_eq!(entries[1]["is_passage"], true);

        let json = get_json(&f.router, "/api/categories/nada").await;
        assert_eq!(json["errno"], 404);
    }

    #[tokio::test]
    async fn test_lookup_endpoints() {
        let f = fixture().await;

        let json = get_json(&f.router, "/api/dictionary/%D7%A9%D7%9C%D7%95%D7%9D").await;
        assert_eq!(json["data"]["translation"], "paz");

        let json = get_json(&f.router, "/api/dictionary/xyz").await;
        assert_eq!(json["errno"], 0);
        assert!(json["data"]["translation"].is_null());

        let json = get_json(&f.router, "/api/lookup?word=%D7%A9%D7%9C%D7%95%D7%9D").await;
        assert_eq!(json["data"]["source"], "dictionary");

        let json = get_json(&f.router, "/api/lookup?word=beginning,&lang=en").await;
        assert_eq!(json["data"]["source"], "translator");
        assert_eq!(json["data"]["translation"], "beginning (en|es)");

        let json = get_json(&f.router, "/api/lookup").await;
        assert_eq!(json["errno"], 400);
    }

    #[tokio::test]
    async fn test_proxy_audio() {
        let f = fixture().await;

        let response = get(&f.router, "/api/proxy-audio?q=shalom&tl=he").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=3600"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ID3mp3");

        // 第二次命中缓存
        get(&f.router, "/api/proxy-audio?q=shalom&tl=he").await;
        assert_eq!(f.relay.calls.load(Ordering::SeqCst), 1);

        let response = get(&f.router, "/api/proxy-audio?tl=he").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["errno"], 400);

        let response = get(&f.router, "/api/proxy-audio?q=fail").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_json(response).await["errno"], 500);

        // 失败结果不进缓存
        get(&f.router, "/api/proxy-audio?q=fail").await;
        assert_eq!(f.relay.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_reader_rest_mirror() {
        let f = fixture().await;

        let record = f.passages.find_by_slug("genesis").await.unwrap().unwrap();
        let passage = Passage::try_from(record).unwrap();
        let (handle, _task) = spawn_reader(
            "reader-rest",
            passage,
            SynchronizerConfig::default(),
            Arc::new(Mute),
            Arc::new(Mute),
        );
        let mut highlight = handle.subscribe();
        f.registry.register(ReaderEntry::new(handle, 2)).unwrap();

        let json = post_json(
            &f.router,
            "/api/reader/speak_token",
            json!({"reader_id": "reader-rest", "index": 2}),
        )
        .await;
        assert_eq!(json["errno"], 0);
        highlight.changed().await.unwrap();

        let json = get_json(&f.router, "/api/reader/reader-rest/highlight").await;
        assert_eq!(json["data"]["active_index"], 2);
        assert_eq!(json["data"]["is_playing_all"], false);

        let json = post_json(
            &f.router,
            "/api/reader/speak_token",
            json!({"reader_id": "reader-rest", "index": 3}),
        )
        .await;
        assert_eq!(json["errno"], 400);

        let json = post_json(&f.router, "/api/reader/stop", json!({"reader_id": "nobody"})).await;
        assert_eq!(json["errno"], 404);

        f.registry.shutdown_all();
    }
}
