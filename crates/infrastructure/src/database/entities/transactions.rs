use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub session_id: i64,
    pub direction: String,
    pub truck: String,
    /// JSON array of container ids
    pub containers: Json,
    pub bruto: i64,
    pub truck_tara: Option<i64>,
    /// NULL is "na" on out/none rows and unset on in rows
    pub neto: Option<i64>,
    pub produce: String,
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
