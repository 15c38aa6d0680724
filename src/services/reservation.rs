//! # Stay Orchestration
//!
//! The reservation aggregate: creating a stay with its guest and room
//! groups, merge-patch updates, guarded deletion, and the state machine.
//!
//! Projections degrade gracefully: a stay whose visit reason or holder
//! row has gone missing still renders, with "Unknown" and an empty name
//! standing in for the lookups.

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveValue, ColumnTrait, IntoActiveModel, PaginatorTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::gateway::Gateway;
use crate::models::{self, enums::StayState, service_ticket, stay};
use crate::services::membership::{GuestMemberships, RoomMemberships, SyncOutcome};

/// Request data for creating a stay.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStayRequest {
    pub visit_reason_id: Uuid,
    pub holder_id: Uuid,
    #[serde(default)]
    pub company_id: Option<Uuid>,
    pub arrival_date: DateTimeWithTimeZone,
    pub departure_date: DateTimeWithTimeZone,
    pub pax: i32,
    #[serde(default)]
    pub final_price: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub guest_ids: Vec<Uuid>,
    #[serde(default)]
    pub room_ids: Vec<Uuid>,
}

/// Merge-patch update for a stay. Absent fields are untouched; for the
/// nullable fields an explicit `null` clears the value. Membership lists
/// replace the stored set when present, including the empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStayRequest {
    #[serde(default)]
    pub visit_reason_id: Option<Uuid>,
    #[serde(default)]
    pub holder_id: Option<Uuid>,
    #[serde(default, with = "double_option")]
    pub company_id: Option<Option<Uuid>>,
    #[serde(default)]
    pub arrival_date: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub departure_date: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub pax: Option<i32>,
    #[serde(default, with = "double_option")]
    pub final_price: Option<Option<f64>>,
    #[serde(default, with = "double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default)]
    pub guest_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub room_ids: Option<Vec<Uuid>>,
}

/// Distinguishes an absent field from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// Projection of a stay with its groups resolved to display data.
#[derive(Debug, Clone, Serialize)]
pub struct StayDto {
    pub id: Uuid,
    pub state: StayState,
    pub visit_reason: String,
    pub holder_name: String,
    pub holder_email: Option<String>,
    pub company: Option<String>,
    pub arrival_date: DateTimeWithTimeZone,
    pub departure_date: DateTimeWithTimeZone,
    pub reservation_date: Option<DateTimeWithTimeZone>,
    pub pax: i32,
    pub final_price: Option<f64>,
    pub notes: Option<String>,
    pub guests: Vec<GuestSummary>,
    pub rooms: Vec<RoomSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuestSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomSummary {
    pub id: Uuid,
    pub number: String,
}

/// Stay operations within one tenant scope.
pub struct StayService<'a> {
    gateway: Gateway<'a>,
}

impl<'a> StayService<'a> {
    pub fn new(gateway: Gateway<'a>) -> Self {
        Self { gateway }
    }

    fn guests(&self) -> GuestMemberships<'a> {
        GuestMemberships::new(self.gateway)
    }

    fn rooms(&self) -> RoomMemberships<'a> {
        RoomMemberships::new(self.gateway)
    }

    /// Creates a stay in `Pending` state and populates its guest and
    /// room groups. Group members that do not exist in scope are
    /// skipped, matching bulk-add semantics.
    pub async fn create(&self, request: CreateStayRequest) -> Result<StayDto, ServiceError> {
        self.gateway.require_tenant()?;
        validate_dates(request.arrival_date, request.departure_date)?;
        validate_pax(request.pax)?;

        self.require_visit_reason(request.visit_reason_id).await?;
        self.require_guest(request.holder_id).await?;
        if let Some(company_id) = request.company_id {
            self.require_company(company_id).await?;
        }

        let active = stay::ActiveModel {
            visit_reason_id: ActiveValue::Set(request.visit_reason_id),
            holder_id: ActiveValue::Set(request.holder_id),
            company_id: ActiveValue::Set(request.company_id),
            arrival_date: ActiveValue::Set(request.arrival_date),
            departure_date: ActiveValue::Set(request.departure_date),
            reservation_date: ActiveValue::Set(Some(Utc::now().into())),
            pax: ActiveValue::Set(request.pax),
            final_price: ActiveValue::Set(request.final_price),
            notes: ActiveValue::Set(request.notes),
            state: ActiveValue::Set(StayState::Pending),
            ..Default::default()
        };
        let created = self.gateway.insert::<models::Stay>(active).await?;

        if !request.guest_ids.is_empty() {
            self.guests().add_many(created.id, &request.guest_ids).await?;
        }
        if !request.room_ids.is_empty() {
            self.rooms().add_many(created.id, &request.room_ids).await?;
        }

        self.to_dto(created).await
    }

    /// Loads a stay projection by id.
    pub async fn get(&self, id: Uuid) -> Result<StayDto, ServiceError> {
        let stay = self.require_stay(id).await?;
        self.to_dto(stay).await
    }

    /// Lists all stays in scope as projections.
    pub async fn list(&self) -> Result<Vec<StayDto>, ServiceError> {
        let stays = self.gateway.find_all::<models::Stay>().await?;
        let mut dtos = Vec::with_capacity(stays.len());
        for stay in stays {
            dtos.push(self.to_dto(stay).await?);
        }
        Ok(dtos)
    }

    /// Applies a merge-patch to a stay. Membership lists, when present,
    /// are converged to the given set; `Some(vec![])` clears a group
    /// while `None` leaves it alone.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateStayRequest,
    ) -> Result<StayDto, ServiceError> {
        let stay = self.require_stay(id).await?;

        let arrival = request.arrival_date.unwrap_or(stay.arrival_date);
        let departure = request.departure_date.unwrap_or(stay.departure_date);
        validate_dates(arrival, departure)?;
        if let Some(pax) = request.pax {
            validate_pax(pax)?;
        }

        if let Some(visit_reason_id) = request.visit_reason_id {
            self.require_visit_reason(visit_reason_id).await?;
        }
        if let Some(holder_id) = request.holder_id {
            self.require_guest(holder_id).await?;
        }
        if let Some(Some(company_id)) = request.company_id {
            self.require_company(company_id).await?;
        }

        let mut active = stay.into_active_model();
        if let Some(value) = request.visit_reason_id {
            active.visit_reason_id = ActiveValue::Set(value);
        }
        if let Some(value) = request.holder_id {
            active.holder_id = ActiveValue::Set(value);
        }
        if let Some(value) = request.company_id {
            active.company_id = ActiveValue::Set(value);
        }
        if let Some(value) = request.arrival_date {
            active.arrival_date = ActiveValue::Set(value);
        }
        if let Some(value) = request.departure_date {
            active.departure_date = ActiveValue::Set(value);
        }
        if let Some(value) = request.pax {
            active.pax = ActiveValue::Set(value);
        }
        if let Some(value) = request.final_price {
            active.final_price = ActiveValue::Set(value);
        }
        if let Some(value) = request.notes {
            active.notes = ActiveValue::Set(value);
        }
        let updated = self.gateway.update::<models::Stay>(active).await?;

        if let Some(guest_ids) = request.guest_ids {
            self.guests().sync(id, &guest_ids).await?;
        }
        if let Some(room_ids) = request.room_ids {
            self.rooms().sync(id, &room_ids).await?;
        }

        self.to_dto(updated).await
    }

    /// Deletes a stay and its group links. Refused while service tickets
    /// reference the stay.
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.require_stay(id).await?;

        let tickets = self
            .gateway
            .scoped::<models::ServiceTicket>()
            .filter(service_ticket::Column::StayId.eq(id))
            .count(self.gateway.db())
            .await?;
        if tickets > 0 {
            return Err(ServiceError::in_use("Stay", "service tickets"));
        }

        self.guests().sync(id, &[]).await?;
        self.rooms().sync(id, &[]).await?;
        self.gateway.delete_by_id::<models::Stay>(id).await?;
        Ok(())
    }

    /// Moves a stay to the next lifecycle state, enforcing the
    /// transition table. Terminal states are frozen.
    pub async fn change_state(&self, id: Uuid, next: StayState) -> Result<StayDto, ServiceError> {
        let stay = self.require_stay(id).await?;

        if !stay.state.can_transition_to(next) {
            return Err(ServiceError::InvalidState {
                from: stay.state.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }

        let mut active = stay.into_active_model();
        active.state = ActiveValue::Set(next);
        let updated = self.gateway.update::<models::Stay>(active).await?;
        self.to_dto(updated).await
    }

    /// Converges the guest group of a stay to the given set.
    pub async fn set_guests(
        &self,
        id: Uuid,
        guest_ids: &[Uuid],
    ) -> Result<SyncOutcome, ServiceError> {
        self.guests().sync(id, guest_ids).await
    }

    /// Converges the room group of a stay to the given set.
    pub async fn set_rooms(&self, id: Uuid, room_ids: &[Uuid]) -> Result<SyncOutcome, ServiceError> {
        self.rooms().sync(id, room_ids).await
    }

    async fn to_dto(&self, stay: stay::Model) -> Result<StayDto, ServiceError> {
        let visit_reason = self
            .gateway
            .find_by_id::<models::VisitReason>(stay.visit_reason_id)
            .await?
            .map(|r| r.name)
            .unwrap_or_else(|| "Unknown".to_string());

        let holder = self.gateway.find_by_id::<models::Guest>(stay.holder_id).await?;
        let holder_name = holder.as_ref().map(models::guest::Model::full_name).unwrap_or_default();
        let holder_email = holder.and_then(|g| g.email);

        let company = match stay.company_id {
            Some(company_id) => self
                .gateway
                .find_by_id::<models::Company>(company_id)
                .await?
                .map(|c| c.name),
            None => None,
        };

        let guests = self
            .guests()
            .members(stay.id)
            .await?
            .into_iter()
            .map(|g| GuestSummary {
                id: g.id,
                name: g.full_name(),
            })
            .collect();

        let rooms = self
            .rooms()
            .members(stay.id)
            .await?
            .into_iter()
            .map(|r| RoomSummary {
                id: r.id,
                number: r.number,
            })
            .collect();

        Ok(StayDto {
            id: stay.id,
            state: stay.state,
            visit_reason,
            holder_name,
            holder_email,
            company,
            arrival_date: stay.arrival_date,
            departure_date: stay.departure_date,
            reservation_date: stay.reservation_date,
            pax: stay.pax,
            final_price: stay.final_price,
            notes: stay.notes,
            guests,
            rooms,
        })
    }

    async fn require_stay(&self, id: Uuid) -> Result<stay::Model, ServiceError> {
        self.gateway
            .find_by_id::<models::Stay>(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Stay"))
    }

    async fn require_visit_reason(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.gateway.exists::<models::VisitReason>(id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Visit reason"))
        }
    }

    async fn require_guest(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.gateway.exists::<models::Guest>(id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Guest"))
        }
    }

    async fn require_company(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.gateway.exists::<models::Company>(id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Company"))
        }
    }
}

fn validate_dates(
    arrival: DateTimeWithTimeZone,
    departure: DateTimeWithTimeZone,
) -> Result<(), ServiceError> {
    if arrival >= departure {
        return Err(ServiceError::Validation(
            "arrival date must be before departure date".to_string(),
        ));
    }
    Ok(())
}

fn validate_pax(pax: i32) -> Result<(), ServiceError> {
    if pax < 1 {
        return Err(ServiceError::Validation(
            "pax must be at least 1".to_string(),
        ));
    }
    Ok(())
}
