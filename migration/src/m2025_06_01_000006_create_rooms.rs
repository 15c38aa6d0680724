//! Migration to create the rooms table.
//!
//! Room numbers are unique within a tenant. Status is stored as a stable
//! string code (Available, Occupied, Maintenance, Cleaning, OutOfOrder).
//! The room type link is Restrict so a type cannot vanish under its rooms.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rooms::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Rooms::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Rooms::Number).text().not_null())
                    .col(ColumnDef::new(Rooms::RoomTypeId).uuid().not_null())
                    .col(
                        ColumnDef::new(Rooms::Status)
                            .string_len(32)
                            .not_null()
                            .default("Available"),
                    )
                    .col(
                        ColumnDef::new(Rooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Rooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_tenant_id")
                            .from(Rooms::Table, Rooms::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_room_type_id")
                            .from(Rooms::Table, Rooms::RoomTypeId)
                            .to(RoomTypes::Table, RoomTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rooms_tenant_id")
                    .table(Rooms::Table)
                    .col(Rooms::TenantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rooms_tenant_number")
                    .table(Rooms::Table)
                    .col(Rooms::TenantId)
                    .col(Rooms::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_rooms_tenant_number").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_rooms_tenant_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Rooms {
    Table,
    Id,
    TenantId,
    Number,
    RoomTypeId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RoomTypes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
}
