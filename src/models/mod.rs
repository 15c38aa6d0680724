//! # Data Models
//!
//! SeaORM entity models for every table in the shared multi-tenant
//! schema, plus the string-coded enumerations.

use serde::{Deserialize, Serialize};

pub mod city;
pub mod company;
pub mod country;
pub mod enums;
pub mod group_guest;
pub mod group_room;
pub mod guest;
pub mod profession;
pub mod room;
pub mod room_type;
pub mod service;
pub mod service_ticket;
pub mod stay;
pub mod tenant;
pub mod user;
pub mod visit_reason;

pub use city::Entity as City;
pub use company::Entity as Company;
pub use country::Entity as Country;
pub use group_guest::Entity as GroupGuest;
pub use group_room::Entity as GroupRoom;
pub use guest::Entity as Guest;
pub use profession::Entity as Profession;
pub use room::Entity as Room;
pub use room_type::Entity as RoomType;
pub use service::Entity as Service;
pub use service_ticket::Entity as ServiceTicket;
pub use stay::Entity as Stay;
pub use tenant::Entity as Tenant;
pub use user::Entity as User;
pub use visit_reason::Entity as VisitReason;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "innkeep".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
