//! Member model -> entity mapper

use deicidium_core::entities::Member;
use deicidium_core::value_objects::GuildId;

use crate::models::MemberModel;

impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            id: model.id,
            name: model.name,
            class: model.class,
            stat_atk: model.stat_atk,
            stat_def: model.stat_def,
            stat_acc: model.stat_acc,
            growth_rate: model.growth_rate,
            grade: model.grade,
            created_at: model.created_at,
            guild: GuildId::new(model.guild),
        }
    }
}
