//! Lector - 多语种阅读服务
//!
//! - Domain: passage/ (Bounded Context), 分词, 高亮
//! - Application: synchronizer, commands, queries, ports
//! - Infrastructure: http, memory, persistence, adapters, events

use std::sync::Arc;

use lector::config::{load_config, print_config, AppConfig};
use lector::infrastructure::adapters::{
    GoogleTtsClient, GoogleTtsClientConfig, MyMemoryClient, MyMemoryClientConfig,
};
use lector::infrastructure::http::{AppState, HttpServer, ReaderSettings};
use lector::infrastructure::memory::InMemoryReaderRegistry;
use lector::infrastructure::persistence::sled::{SledAudioCache, SledCacheConfig};
use lector::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteCategoryRepository,
    SqliteDictionaryRepository, SqlitePassageRepository,
};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},lector={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);
    tracing::info!("Lector - 多语种阅读服务");
    print_config(&config);

    // 确保数据目录存在
    tokio::fs::create_dir_all(&config.cache.path).await?;
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let passage_repo = Arc::new(SqlitePassageRepository::new(pool.clone()));
    let category_repo = Arc::new(SqliteCategoryRepository::new(pool.clone()));
    let dictionary_repo = Arc::new(SqliteDictionaryRepository::new(pool));

    // 外部服务
    let relay = Arc::new(GoogleTtsClient::new(GoogleTtsClientConfig {
        url: config.tts_proxy.url.clone(),
        client: config.tts_proxy.client.clone(),
        user_agent: config.tts_proxy.user_agent.clone(),
        timeout_secs: config.tts_proxy.timeout_secs,
    })?);
    let translator = Arc::new(MyMemoryClient::new(MyMemoryClientConfig {
        url: config.translator.url.clone(),
        timeout_secs: config.translator.timeout_secs,
    })?);

    // 创建 Sled 音频缓存
    let cache_config = SledCacheConfig {
        db_path: format!("{}/cache.sled", config.cache.path.display()),
        max_size_bytes: config.cache.max_size_bytes,
        max_age_secs: config.cache.max_age_secs,
    };
    let audio_cache = Arc::new(SledAudioCache::new(&cache_config)?);

    let registry = InMemoryReaderRegistry::new().arc();

    let settings = ReaderSettings {
        synchronizer: config.reader.synchronizer(),
        autoplay_delay: config.reader.autoplay_delay(),
        public_base_url: config.server.public_base_url(),
        target_lang: config.translator.target_lang.clone(),
    };
    let state = AppState::new(
        passage_repo,
        category_repo,
        dictionary_repo,
        translator,
        relay,
        audio_cache.clone(),
        registry.clone(),
        settings,
    );

    let server = HttpServer::new(config.server.addr(), Arc::new(state));
    server.run_with_shutdown(shutdown_signal()).await?;

    // 关闭所有阅读会话并落盘缓存
    registry.shutdown_all();
    if let Err(e) = audio_cache.flush() {
        tracing::warn!(error = %e, "Failed to flush audio cache");
    }

    tracing::info!("Server shutdown complete");

    Ok(())
}
