//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in deicidium-core.
//! Member and event reads share the guild-scoped query in [`scoped`].

mod error;
mod event;
mod member;
mod scoped;
mod user_guild;

pub use event::PgEventRepository;
pub use member::PgMemberRepository;
pub use user_guild::PgUserGuildRepository;
