//! Guest entity model
//!
//! Guests carry personal and identification data and optional lookup
//! links. A guest holds stays directly (as holder) and participates in
//! additional stays through the group_guests join.

use sea_orm::ActiveModelBehavior;
use serde::Serialize;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "guests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning tenant
    pub tenant_id: Uuid,

    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// National id / passport number
    pub document_id: Option<String>,

    pub company_id: Option<Uuid>,
    pub profession_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub country_id: Option<Uuid>,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Display label used by reservation projections.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
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
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
}

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn guest(first: &str, last: &str) -> Model {
        Model {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: None,
            phone: None,
            document_id: None,
            company_id: None,
            profession_id: None,
            city_id: None,
            country_id: None,
            created_at: chrono::Utc::now().into(),
            updated_at: chrono::Utc::now().into(),
        }
    }

    #[test]
    fn full_name_joins_and_trims() {
        assert_eq!(guest("Ana", "Ruiz").full_name(), "Ana Ruiz");
        assert_eq!(guest("Ana", "").full_name(), "Ana");
    }
}
