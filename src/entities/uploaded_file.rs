use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "uploaded_files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub storage_key: String,
    /// SHA-256 of the blob, hex-encoded. None only before the hash is computed.
    #[sea_orm(unique)]
    pub file_hash: Option<String>,
    pub uploaded_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::campaign_record::Entity")]
    CampaignRecord,
}

impl Related<super::campaign_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CampaignRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
