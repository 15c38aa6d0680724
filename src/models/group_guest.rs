//! Group guest join entity
//!
//! One row per (stay, guest) membership. The row carries its own
//! `tenant_id`, always equal to the stay's, so the tenant row filter
//! applies uniformly to join tables too.

use sea_orm::ActiveModelBehavior;
use serde::Serialize;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "group_guests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub stay_id: Uuid,
    pub guest_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stay::Entity",
        from = "Column::StayId",
        to = "super::stay::Column::Id"
    )]
    Stay,
    #[sea_orm(
        belongs_to = "super::guest::Entity",
        from = "Column::GuestId",
        to = "super::guest::Column::Id"
    )]
    Guest,
}

impl Related<super::stay::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stay.def()
    }
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
