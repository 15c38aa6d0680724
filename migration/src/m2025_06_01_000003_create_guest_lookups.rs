//! Migration to create guest lookup tables.
//!
//! Companies, professions, cities and countries are small name-only rows a
//! Guest (or Stay, for companies) can point at. They carry a `tenant_id`
//! like everything else so the tenant row filter stays uniform.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create_lookup_table<T>(
    manager: &SchemaManager<'_>,
    table: T,
    id: T,
    tenant_id: T,
    name: T,
    created_at: T,
    updated_at: T,
    fk_name: &str,
    idx_name: &str,
) -> Result<(), DbErr>
where
    T: IntoIden + Copy + 'static,
{
    manager
        .create_table(
            Table::create()
                .table(table)
                .if_not_exists()
                .col(ColumnDef::new(id).uuid().not_null().primary_key())
                .col(ColumnDef::new(tenant_id).uuid().not_null())
                .col(ColumnDef::new(name).text().not_null())
                .col(
                    ColumnDef::new(created_at)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .col(
                    ColumnDef::new(updated_at)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name(fk_name)
                        .from(table, tenant_id)
                        .to(Tenants::Table, Tenants::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name(idx_name)
                .table(table)
                .col(tenant_id)
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_lookup_table(
            manager,
            Companies::Table,
            Companies::Id,
            Companies::TenantId,
            Companies::Name,
            Companies::CreatedAt,
            Companies::UpdatedAt,
            "fk_companies_tenant_id",
            "idx_companies_tenant_id",
        )
        .await?;

        create_lookup_table(
            manager,
            Professions::Table,
            Professions::Id,
            Professions::TenantId,
            Professions::Name,
            Professions::CreatedAt,
            Professions::UpdatedAt,
            "fk_professions_tenant_id",
            "idx_professions_tenant_id",
        )
        .await?;

        create_lookup_table(
            manager,
            Cities::Table,
            Cities::Id,
            Cities::TenantId,
            Cities::Name,
            Cities::CreatedAt,
            Cities::UpdatedAt,
            "fk_cities_tenant_id",
            "idx_cities_tenant_id",
        )
        .await?;

        create_lookup_table(
            manager,
            Countries::Table,
            Countries::Id,
            Countries::TenantId,
            Countries::Name,
            Countries::CreatedAt,
            Countries::UpdatedAt,
            "fk_countries_tenant_id",
            "idx_countries_tenant_id",
        )
        .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Countries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Professions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Companies {
    Table,
    Id,
    TenantId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum Professions {
    Table,
    Id,
    TenantId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum Cities {
    Table,
    Id,
    TenantId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum Countries {
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
