//! Migration: Create user_technologies table.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_user_profiles_table::UserProfiles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserTechnologies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserTechnologies::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserTechnologies::ProfileId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserTechnologies::TechnologyName)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_technologies_profile_id")
                            .from(UserTechnologies::Table, UserTechnologies::ProfileId)
                            .to(UserProfiles::Table, UserProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A technology is attached to a profile at most once
        manager
            .create_index(
                Index::create()
                    .name("idx_user_technologies_profile_name")
                    .table(UserTechnologies::Table)
                    .col(UserTechnologies::ProfileId)
                    .col(UserTechnologies::TechnologyName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_technologies_name")
                    .table(UserTechnologies::Table)
                    .col(UserTechnologies::TechnologyName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserTechnologies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserTechnologies {
    Table,
    Id,
    ProfileId,
    TechnologyName,
}
