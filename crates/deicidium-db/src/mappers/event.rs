//! Event model -> entity mapper

use deicidium_core::entities::Event;
use deicidium_core::value_objects::GuildId;

use crate::models::EventModel;

impl From<EventModel> for Event {
    fn from(model: EventModel) -> Self {
        Event {
            id: model.id,
            event_type: model.event_type,
            participants: model.participants,
            created_at: model.created_at,
            updated_at: model.updated_at,
            guild: GuildId::new(model.guild),
        }
    }
}
