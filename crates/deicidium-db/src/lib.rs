//! # deicidium-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `deicidium-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model -> entity mappers
//! - Repository implementations (user/guild association, members, events)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use deicidium_db::pool::{create_pool, DatabaseConfig};
//! use deicidium_db::repositories::PgMemberRepository;
//! use deicidium_core::{GuildId, QueryOptions, ScopedRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let members = PgMemberRepository::new(pool);
//!
//!     let page = members.find_by_guild(GuildId::new(1), QueryOptions::default()).await?;
//!     println!("{} of {}", page.rows.len(), page.total);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgEventRepository, PgMemberRepository, PgUserGuildRepository};
