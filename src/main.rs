use chirp::cache::{InMemoryTimelineCache, InvalidationQueue, NoopCache, TimelineCache};
use chirp::config::Config;
use chirp::logger::{Logger, TracingLogger};
use chirp::service::{FollowService, TweetService};
use chirp::store::MemoryStore;
use chirp::web::{run_server, AppState};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize logging, level controlled via RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Config::from_env();
    info!(
        "chirp starting on port {} (cache: {})",
        config.port, config.enable_cache
    );

    let store = Arc::new(MemoryStore::new());
    if config.seed_demo_users {
        store.seed_demo_users().await;
        info!("Seeded demo users");
    }

    let logger: Arc<dyn Logger> = Arc::new(TracingLogger);

    let cache: Arc<dyn TimelineCache> = if config.enable_cache {
        Arc::new(InMemoryTimelineCache::new())
    } else {
        Arc::new(NoopCache)
    };

    let invalidations =
        InvalidationQueue::spawn(cache.clone(), logger.clone(), config.invalidation_queue_depth);

    let state = AppState {
        tweets: Arc::new(TweetService::new(
            store.clone(),
            cache,
            invalidations.clone(),
            logger.clone(),
        )),
        follows: Arc::new(FollowService::new(store.clone(), invalidations, logger)),
        store,
    };

    let addr = format!("0.0.0.0:{}", config.port);
    if let Err(e) = run_server(&addr, state).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
