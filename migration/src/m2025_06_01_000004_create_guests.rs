//! Migration to create the guests table.
//!
//! Guests hold personal and identification data and optional links to the
//! lookup tables. Lookup links are nullable and survive lookup deletion.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Guests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Guests::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Guests::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Guests::FirstName).text().not_null())
                    .col(ColumnDef::new(Guests::LastName).text().not_null())
                    .col(ColumnDef::new(Guests::Email).text().null())
                    .col(ColumnDef::new(Guests::Phone).text().null())
                    .col(ColumnDef::new(Guests::DocumentId).text().null())
                    .col(ColumnDef::new(Guests::CompanyId).uuid().null())
                    .col(ColumnDef::new(Guests::ProfessionId).uuid().null())
                    .col(ColumnDef::new(Guests::CityId).uuid().null())
                    .col(ColumnDef::new(Guests::CountryId).uuid().null())
                    .col(
                        ColumnDef::new(Guests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Guests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guests_tenant_id")
                            .from(Guests::Table, Guests::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guests_company_id")
                            .from(Guests::Table, Guests::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guests_profession_id")
                            .from(Guests::Table, Guests::ProfessionId)
                            .to(Professions::Table, Professions::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guests_city_id")
                            .from(Guests::Table, Guests::CityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guests_country_id")
                            .from(Guests::Table, Guests::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guests_tenant_id")
                    .table(Guests::Table)
                    .col(Guests::TenantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_guests_tenant_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Guests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Guests {
    Table,
    Id,
    TenantId,
    FirstName,
    LastName,
    Email,
    Phone,
    DocumentId,
    CompanyId,
    ProfessionId,
    CityId,
    CountryId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Professions {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Cities {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Countries {
    Table,
    Id,
}
