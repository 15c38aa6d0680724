//! Stay entity model
//!
//! The reservation aggregate root. Owns group_guests and group_rooms
//! memberships and service tickets; references a holder guest, a visit
//! reason, and optionally a company.

use sea_orm::ActiveModelBehavior;
use serde::Serialize;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::enums::StayState;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "stays")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning tenant
    pub tenant_id: Uuid,

    pub visit_reason_id: Uuid,
    /// The guest holding the reservation
    pub holder_id: Uuid,
    pub company_id: Option<Uuid>,

    pub arrival_date: DateTimeWithTimeZone,
    pub departure_date: DateTimeWithTimeZone,
    /// Set by the orchestrator when the stay is created
    pub reservation_date: Option<DateTimeWithTimeZone>,

    pub pax: i32,
    pub final_price: Option<f64>,
    pub notes: Option<String>,
    pub state: StayState,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tenant::Entity",
        from = "Column::TenantId",
        to = "super::tenant::Column::Id"
    )]
    Tenant,
    #[sea_orm(
        belongs_to = "super::visit_reason::Entity",
        from = "Column::VisitReasonId",
        to = "super::visit_reason::Column::Id"
    )]
    VisitReason,
    #[sea_orm(
        belongs_to = "super::guest::Entity",
        from = "Column::HolderId",
        to = "super::guest::Column::Id"
    )]
    Holder,
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
    #[sea_orm(has_many = "super::group_guest::Entity")]
    GroupGuests,
    #[sea_orm(has_many = "super::group_room::Entity")]
    GroupRooms,
    #[sea_orm(has_many = "super::service_ticket::Entity")]
    ServiceTickets,
}

impl Related<super::visit_reason::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VisitReason.def()
    }
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Holder.def()
    }
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::group_guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupGuests.def()
    }
}

impl Related<super::group_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupRooms.def()
    }
}

impl Related<super::service_ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceTickets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
