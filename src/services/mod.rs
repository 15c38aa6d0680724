//! # Service Layer
//!
//! Domain services encapsulating the business rules over the persistence
//! gateway: stay orchestration, group membership, rooms, the service
//! catalog and tenant administration.

pub mod catalog;
pub mod membership;
pub mod reservation;
pub mod room;
pub mod room_type;
pub mod tenant;
pub mod user;

pub use catalog::CatalogService;
pub use membership::{
    AddOutcome, BulkOutcome, GuestMemberships, Memberships, RemoveOutcome, RoomMemberships,
    SyncOutcome,
};
pub use reservation::StayService;
pub use room::RoomService;
pub use room_type::RoomTypeService;
pub use tenant::TenantService;
pub use user::UserService;
