//! Migration to create the visit_reasons table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VisitReasons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VisitReasons::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VisitReasons::TenantId).uuid().not_null())
                    .col(ColumnDef::new(VisitReasons::Name).text().not_null())
                    .col(
                        ColumnDef::new(VisitReasons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(VisitReasons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visit_reasons_tenant_id")
                            .from(VisitReasons::Table, VisitReasons::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_visit_reasons_tenant_id")
                    .table(VisitReasons::Table)
                    .col(VisitReasons::TenantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_visit_reasons_tenant_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VisitReasons::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VisitReasons {
    Table,
    Id,
    TenantId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
}
