//! Migration to create the group_rooms join table.
//!
//! Symmetric with group_guests: one row per (stay, room) assignment, with
//! a composite unique index closing the check-then-insert race.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GroupRooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GroupRooms::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GroupRooms::TenantId).uuid().not_null())
                    .col(ColumnDef::new(GroupRooms::StayId).uuid().not_null())
                    .col(ColumnDef::new(GroupRooms::RoomId).uuid().not_null())
                    .col(
                        ColumnDef::new(GroupRooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(GroupRooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_rooms_tenant_id")
                            .from(GroupRooms::Table, GroupRooms::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_rooms_stay_id")
                            .from(GroupRooms::Table, GroupRooms::StayId)
                            .to(Stays::Table, Stays::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_rooms_room_id")
                            .from(GroupRooms::Table, GroupRooms::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_group_rooms_stay_room")
                    .table(GroupRooms::Table)
                    .col(GroupRooms::StayId)
                    .col(GroupRooms::RoomId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_group_rooms_tenant_id")
                    .table(GroupRooms::Table)
                    .col(GroupRooms::TenantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_group_rooms_tenant_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_group_rooms_stay_room").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GroupRooms::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GroupRooms {
    Table,
    Id,
    TenantId,
    StayId,
    RoomId,
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
enum Rooms {
    Table,
    Id,
}
