use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateStudentTable)]
    }
}

pub struct CreateStudentTable;

impl MigrationName for CreateStudentTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_student_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateStudentTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Students::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Students::StudentId)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Students::FirstName).string().not_null())
            .col(ColumnDef::new(Students::LastName).string().not_null())
            .col(ColumnDef::new(Students::Email).string().not_null())
            .col(ColumnDef::new(Students::Phone).string().not_null())
            .col(ColumnDef::new(Students::GradeId).integer().not_null())
            .col(
                ColumnDef::new(Students::Active)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    Table,
    StudentId,
    FirstName,
    LastName,
    Email,
    Phone,
    GradeId,
    Active,
}
