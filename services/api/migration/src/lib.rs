use sea_orm_migration::prelude::*;

mod m20261001_000001_create_users;
mod m20261001_000002_create_tags;
mod m20261001_000003_create_ingredients;
mod m20261001_000004_create_recipes;
mod m20261001_000005_create_recipe_links;
mod m20261001_000006_create_recipe_lists;
mod m20261001_000007_create_subscriptions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_users::Migration),
            Box::new(m20261001_000002_create_tags::Migration),
            Box::new(m20261001_000003_create_ingredients::Migration),
            Box::new(m20261001_000004_create_recipes::Migration),
            Box::new(m20261001_000005_create_recipe_links::Migration),
            Box::new(m20261001_000006_create_recipe_lists::Migration),
            Box::new(m20261001_000007_create_subscriptions::Migration),
        ]
    }
}
