use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create access_rules table. The composite primary key carries the
        // natural-key uniqueness invariant: at most one rule per
        // (path, action, entity) triple.
        manager
            .create_table(
                Table::create()
                    .table(AccessRules::Table)
                    .if_not_exists()
                    .col(string(AccessRules::Path))
                    .col(string(AccessRules::Action))
                    .col(string(AccessRules::Entity))
                    .col(boolean(AccessRules::Allowed))
                    .col(big_integer(AccessRules::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(AccessRules::Path)
                            .col(AccessRules::Action)
                            .col(AccessRules::Entity),
                    )
                    .to_owned(),
            )
            .await?;

        // Entity-keyed lookups (the denial reporter scans by entity alone)
        manager
            .create_index(
                Index::create()
                    .name("idx_access_rules_entity")
                    .table(AccessRules::Table)
                    .col(AccessRules::Entity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create group_members table
        manager
            .create_table(
                Table::create()
                    .table(GroupMembers::Table)
                    .if_not_exists()
                    .col(string(GroupMembers::Actor))
                    .col(string(GroupMembers::GroupName))
                    .col(big_integer(GroupMembers::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(GroupMembers::Actor)
                            .col(GroupMembers::GroupName),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroupMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccessRules::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum AccessRules {
    Table,
    Path,
    Action,
    Entity,
    Allowed,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GroupMembers {
    Table,
    Actor,
    GroupName,
    CreatedAt,
}
