//! Migration to create the stays table.
//!
//! A stay is the reservation aggregate root: holder guest, visit reason,
//! arrival/departure window, pax, optional price/notes/company, and a
//! state stored as a stable string code (Pending, Active, Completed,
//! Canceled).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stays::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stays::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Stays::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Stays::VisitReasonId).uuid().not_null())
                    .col(ColumnDef::new(Stays::HolderId).uuid().not_null())
                    .col(ColumnDef::new(Stays::CompanyId).uuid().null())
                    .col(
                        ColumnDef::new(Stays::ArrivalDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Stays::DepartureDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Stays::ReservationDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Stays::Pax).integer().not_null())
                    .col(ColumnDef::new(Stays::FinalPrice).double().null())
                    .col(ColumnDef::new(Stays::Notes).text().null())
                    .col(
                        ColumnDef::new(Stays::State)
                            .string_len(32)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Stays::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Stays::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stays_tenant_id")
                            .from(Stays::Table, Stays::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stays_visit_reason_id")
                            .from(Stays::Table, Stays::VisitReasonId)
                            .to(VisitReasons::Table, VisitReasons::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stays_holder_id")
                            .from(Stays::Table, Stays::HolderId)
                            .to(Guests::Table, Guests::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stays_company_id")
                            .from(Stays::Table, Stays::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stays_tenant_id")
                    .table(Stays::Table)
                    .col(Stays::TenantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stays_holder_id")
                    .table(Stays::Table)
                    .col(Stays::HolderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_stays_holder_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_stays_tenant_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stays::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Stays {
    Table,
    Id,
    TenantId,
    VisitReasonId,
    HolderId,
    CompanyId,
    ArrivalDate,
    DepartureDate,
    ReservationDate,
    Pax,
    FinalPrice,
    Notes,
    State,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum VisitReasons {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Guests {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
}
