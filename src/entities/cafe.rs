use sea_orm::entity::prelude::*;
use sea_orm::{IdenStatic, Iterable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cafe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column names in table order, used as the header row of listings.
pub fn column_names() -> Vec<String> {
    Column::iter().map(|c| c.as_str().to_string()).collect()
}

impl Model {
    /// Plain column-name to value mapping of this row.
    pub fn to_attributes(&self) -> AppResult<Map<String, Value>> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(AppError::Internal(format!(
                "cafe serialized to a non-object value: {}",
                other
            ))),
            Err(e) => Err(AppError::Internal(format!("Failed to serialize cafe: {}", e))),
        }
    }
}
