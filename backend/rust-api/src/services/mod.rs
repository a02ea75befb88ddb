use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::error::{LedgerError, LedgerResult};
use crate::storage::{KeyValueStore, MemoryStore, MongoStore, RedisStore, Repository};

pub mod attempt_service;
pub mod leaderboard_service;
pub mod match_service;
pub mod quiz_service;
pub mod ranking_service;
pub mod scoring;
pub mod stats_service;
pub mod team_service;
pub mod tournament_service;

pub use attempt_service::AttemptService;
pub use leaderboard_service::LeaderboardService;
pub use match_service::MatchService;
pub use quiz_service::QuizService;
pub use ranking_service::RankingService;
pub use stats_service::StatsService;
pub use team_service::TeamService;
pub use tournament_service::TournamentService;

pub struct AppState {
    pub config: Config,
    pub repo: Repository,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        tracing::info!("Connecting to {} storage backend...", config.storage_backend);

        let store: Arc<dyn KeyValueStore> = match config.storage_backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Redis => Arc::new(RedisStore::connect(&config.redis_uri).await?),
            StorageBackend::Mongo => Arc::new(
                MongoStore::connect(&config.mongo_uri, &config.mongo_database).await?,
            ),
        };

        tracing::info!("Storage backend ready: {}", store.backend_name());
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        let repo = Repository::new(store, &config.key_prefix);
        Self { config, repo }
    }
}

/// Scores are percentages.
pub(crate) fn validate_score(score: f64) -> LedgerResult<()> {
    if !score.is_finite() || !(0.0..=100.0).contains(&score) {
        return Err(LedgerError::Validation(format!(
            "score must be between 0 and 100, got {}",
            score
        )));
    }
    Ok(())
}
