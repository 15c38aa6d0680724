//! Migration to create the service_tickets table.
//!
//! A ticket links a stay, a catalog service and the issuing user. The stay
//! and service links are Restrict: deletion of either is blocked at the
//! service layer (and backstopped here) while tickets reference them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceTickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceTickets::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceTickets::TenantId).uuid().not_null())
                    .col(ColumnDef::new(ServiceTickets::StayId).uuid().not_null())
                    .col(ColumnDef::new(ServiceTickets::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(ServiceTickets::UserId).uuid().not_null())
                    .col(ColumnDef::new(ServiceTickets::Price).double().not_null())
                    .col(
                        ColumnDef::new(ServiceTickets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ServiceTickets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_tickets_tenant_id")
                            .from(ServiceTickets::Table, ServiceTickets::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_tickets_stay_id")
                            .from(ServiceTickets::Table, ServiceTickets::StayId)
                            .to(Stays::Table, Stays::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_tickets_service_id")
                            .from(ServiceTickets::Table, ServiceTickets::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_tickets_user_id")
                            .from(ServiceTickets::Table, ServiceTickets::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_service_tickets_tenant_id")
                    .table(ServiceTickets::Table)
                    .col(ServiceTickets::TenantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_service_tickets_stay_id")
                    .table(ServiceTickets::Table)
                    .col(ServiceTickets::StayId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_tickets_stay_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_service_tickets_tenant_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceTickets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceTickets {
    Table,
    Id,
    TenantId,
    StayId,
    ServiceId,
    UserId,
    Price,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Stays {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
