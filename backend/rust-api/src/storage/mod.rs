//! Key-value persistence for ledger collections.
//!
//! Every collection is stored as one JSON array under `<prefix><collection>`,
//! mirroring the layout the web client kept in browser storage. Backends only
//! move opaque strings; decoding and locking live in [`Repository`].

use anyhow::Result;
use async_trait::async_trait;

pub mod memory;
pub mod mongo_store;
pub mod redis_store;
pub mod repository;

pub use memory::MemoryStore;
pub use mongo_store::MongoStore;
pub use redis_store::RedisStore;
pub use repository::Repository;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Cheap liveness probe used by the health endpoint.
    async fn ping(&self) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Tests,
    Tournaments,
    Matches,
    UserStats,
    Teams,
    TestResults,
}

impl Collection {
    pub const COUNT: usize = 6;

    pub const ALL: [Collection; Self::COUNT] = [
        Collection::Tests,
        Collection::Tournaments,
        Collection::Matches,
        Collection::UserStats,
        Collection::Teams,
        Collection::TestResults,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Tests => "tests",
            Collection::Tournaments => "tournaments",
            Collection::Matches => "matches",
            Collection::UserStats => "user_stats",
            Collection::Teams => "teams",
            Collection::TestResults => "test_results",
        }
    }
}
