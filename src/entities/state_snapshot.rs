//! State snapshot entity - key-value rows holding serialized application state.
//! The booking wizard keeps its whole state as one JSON document under a fixed key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// State snapshot database model - one serialized document per key
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "state_snapshots")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Storage key (e.g., `"bookingState"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Serialized JSON document
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this snapshot was last written
    pub updated_at: DateTime,
}

/// `StateSnapshot` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
