use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Favorites and shopping carts share one shape: a (user, recipe) pair.
fn recipe_list_table(table: RecipeList) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(RecipeList::UserId).integer().not_null())
        .col(ColumnDef::new(RecipeList::RecipeId).integer().not_null())
        .col(
            ColumnDef::new(RecipeList::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .primary_key(
            Index::create()
                .col(RecipeList::UserId)
                .col(RecipeList::RecipeId),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, RecipeList::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, RecipeList::RecipeId)
                .to(Recipes::Table, Recipes::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(recipe_list_table(RecipeList::Favorites))
            .await?;
        manager
            .create_table(recipe_list_table(RecipeList::ShoppingCarts))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeList::ShoppingCarts).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecipeList::Favorites).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum RecipeList {
    Favorites,
    ShoppingCarts,
    UserId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
