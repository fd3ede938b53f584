//! # volta-db
//!
//! Database layer implementing the store traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all store traits
//! defined in `volta-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity <-> Model mappers
//! - Store implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use volta_db::pool::{create_pool, DatabaseConfig};
//! use volta_db::stores::PgUserStore;
//! use volta_core::traits::UserStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::default();
//!     let pool = create_pool(&config).await?;
//!     volta_db::run_migrations(&pool).await?;
//!     let user_store = PgUserStore::new(pool);
//!
//!     // Use the store...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod stores;

// Re-export commonly used types
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use stores::{PgApiKeyStore, PgDeviceStore, PgRefreshTokenStore, PgUserStore};

/// Apply any pending schema migrations to the connected database
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
