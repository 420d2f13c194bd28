use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Vocabulary tables; names are stored lowercased by the application
        manager
            .create_table(
                Table::create()
                    .table(Operators::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Operators::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Operators::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SampleTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SampleTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SampleTypes::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Deleting biosamples must remove their comments first, so no cascade here
        manager
            .create_table(
                Table::create()
                    .table(Biosamples::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Biosamples::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Biosamples::Location).string().not_null())
                    .col(ColumnDef::new(Biosamples::SamplingDate).date().not_null())
                    .col(
                        ColumnDef::new(Biosamples::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Biosamples::OperatorId).integer().not_null())
                    .col(ColumnDef::new(Biosamples::TypeId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_biosamples_operator_id")
                            .from(Biosamples::Table, Biosamples::OperatorId)
                            .to(Operators::Table, Operators::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_biosamples_type_id")
                            .from(Biosamples::Table, Biosamples::TypeId)
                            .to(SampleTypes::Table, SampleTypes::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comments::BiosampleId).integer().not_null())
                    .col(ColumnDef::new(Comments::Content).text().not_null())
                    .col(ColumnDef::new(Comments::Author).string().not_null())
                    .col(
                        ColumnDef::new(Comments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_biosample_id")
                            .from(Comments::Table, Comments::BiosampleId)
                            .to(Biosamples::Table, Biosamples::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_biosamples_created_at")
                    .table(Biosamples::Table)
                    .col(Biosamples::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comments_biosample_id")
                    .table(Comments::Table)
                    .col(Comments::BiosampleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reverse dependency order
        manager
            .drop_table(Table::drop().table(Comments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Biosamples::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(SampleTypes::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Operators::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Operators {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum SampleTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Biosamples {
    Table,
    Id,
    Location,
    SamplingDate,
    CreatedAt,
    OperatorId,
    TypeId,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    BiosampleId,
    Content,
    Author,
    CreatedAt,
}
