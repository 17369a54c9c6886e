//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions from database rows to domain objects.
//! The dashboard only reads, so there are no insert/update counterparts.

mod event;
mod guild;
mod member;
