//! Database models - SQLx-compatible structs for PostgreSQL tables

mod event;
mod guild;
mod member;

pub use event::EventModel;
pub use guild::GuildModel;
pub use member::MemberModel;
