//! Migration to create the group_guests join table.
//!
//! One row per (stay, guest) membership. The composite unique index is
//! what keeps concurrent add calls from producing duplicate memberships;
//! the service layer treats a violation as "already associated".

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GroupGuests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GroupGuests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GroupGuests::TenantId).uuid().not_null())
                    .col(ColumnDef::new(GroupGuests::StayId).uuid().not_null())
                    .col(ColumnDef::new(GroupGuests::GuestId).uuid().not_null())
                    .col(
                        ColumnDef::new(GroupGuests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(GroupGuests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_guests_tenant_id")
                            .from(GroupGuests::Table, GroupGuests::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_guests_stay_id")
                            .from(GroupGuests::Table, GroupGuests::StayId)
                            .to(Stays::Table, Stays::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_guests_guest_id")
                            .from(GroupGuests::Table, GroupGuests::GuestId)
                            .to(Guests::Table, Guests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_group_guests_stay_guest")
                    .table(GroupGuests::Table)
                    .col(GroupGuests::StayId)
                    .col(GroupGuests::GuestId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_group_guests_tenant_id")
                    .table(GroupGuests::Table)
                    .col(GroupGuests::TenantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_group_guests_tenant_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_group_guests_stay_guest").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GroupGuests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GroupGuests {
    Table,
    Id,
    TenantId,
    StayId,
    GuestId,
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
enum Guests {
    Table,
    Id,
}
