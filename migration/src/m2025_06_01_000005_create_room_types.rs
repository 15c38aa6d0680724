//! Migration to create the room_types table.
//!
//! Room type names are unique within a tenant, enforced by a composite
//! unique index so two tenants can both have a "Standard".

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoomTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RoomTypes::TenantId).uuid().not_null())
                    .col(ColumnDef::new(RoomTypes::Name).text().not_null())
                    .col(ColumnDef::new(RoomTypes::Price).double().not_null())
                    .col(
                        ColumnDef::new(RoomTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RoomTypes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_types_tenant_id")
                            .from(RoomTypes::Table, RoomTypes::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_types_tenant_id")
                    .table(RoomTypes::Table)
                    .col(RoomTypes::TenantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_types_tenant_name")
                    .table(RoomTypes::Table)
                    .col(RoomTypes::TenantId)
                    .col(RoomTypes::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_room_types_tenant_name").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_room_types_tenant_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoomTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RoomTypes {
    Table,
    Id,
    TenantId,
    Name,
    Price,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
}
