//! Domain entities - core business objects

mod country;
mod event;
mod guild;
mod member;

pub use country::Country;
pub use event::{Event, Participant};
pub use guild::Guild;
pub use member::Member;
