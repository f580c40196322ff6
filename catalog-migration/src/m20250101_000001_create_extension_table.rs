use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250101_000001_create_extension_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 列顺序固定为 (id, name, hyperlink, about, image, language)
        manager
            .create_table(
                Table::create()
                    .table(Extension::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Extension::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Extension::Name).text().not_null())
                    .col(ColumnDef::new(Extension::Hyperlink).text().not_null())
                    .col(ColumnDef::new(Extension::About).text().not_null())
                    .col(ColumnDef::new(Extension::Image).text().not_null())
                    .col(ColumnDef::new(Extension::Language).text().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Extension::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Extension {
    Table,
    Id,
    Name,
    Hyperlink,
    About,
    Image,
    Language,
}
