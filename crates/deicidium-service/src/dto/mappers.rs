//! Domain value to DTO mappers

use deicidium_core::entities::{Event, Member};
use deicidium_core::value_objects::Page;

use super::responses::{EventListResponse, MemberListResponse};

impl From<Page<Member>> for MemberListResponse {
    fn from(page: Page<Member>) -> Self {
        Self {
            members: page.rows,
            total: page.total,
        }
    }
}

impl From<Page<Event>> for EventListResponse {
    fn from(page: Page<Event>) -> Self {
        Self {
            events: page.rows,
            total: page.total,
        }
    }
}
