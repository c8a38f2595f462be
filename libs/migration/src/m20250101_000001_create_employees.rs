use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn create_employees_table() -> TableCreateStatement {
    Table::create()
        .table(Employees::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Employees::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Employees::Name).text().not_null())
        .col(ColumnDef::new(Employees::Lastname).text().not_null())
        .col(ColumnDef::new(Employees::Email).text().not_null())
        .to_owned()
}

// Email uniqueness lives in the schema; the repository maps violations
// of this index to a duplicate-employee error.
fn create_email_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_employees_email_unique")
        .table(Employees::Table)
        .col(Employees::Email)
        .unique()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(create_employees_table()).await?;
        manager.create_index(create_email_index()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    Name,
    Lastname,
    Email,
}
