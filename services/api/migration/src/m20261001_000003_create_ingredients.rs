use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ingredients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ingredients::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ingredients::Name).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Ingredients::MeasurementUnit)
                            .string_len(200)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Ingredient search orders and filters by name.
        manager
            .create_index(
                Index::create()
                    .table(Ingredients::Table)
                    .col(Ingredients::Name)
                    .name("idx_ingredients_name")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ingredients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Ingredients {
    Table,
    Id,
    Name,
    MeasurementUnit,
}
