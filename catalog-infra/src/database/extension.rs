use catalog_domain::ExtensionRecord;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Extension 实体，对应数据库中的extension表
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "extension")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub hyperlink: String,

    #[sea_orm(column_type = "Text")]
    pub about: String,

    #[sea_orm(column_type = "Text")]
    pub image: String,

    #[sea_orm(column_type = "Text")]
    pub language: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ExtensionRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            hyperlink: model.hyperlink,
            about: model.about,
            image: model.image,
            language: model.language,
        }
    }
}
