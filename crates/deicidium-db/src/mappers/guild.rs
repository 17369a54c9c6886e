//! Guild model -> entity mapper

use deicidium_core::entities::Guild;
use deicidium_core::value_objects::GuildId;

use crate::models::GuildModel;

impl From<GuildModel> for Guild {
    fn from(model: GuildModel) -> Self {
        Guild {
            id: GuildId::new(model.id),
            name: model.name,
            intro: model.intro,
            region: model.region,
            server: model.server,
        }
    }
}
