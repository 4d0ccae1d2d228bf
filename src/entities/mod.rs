//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod state_snapshot;

pub use state_snapshot::{
    Column as StateSnapshotColumn, Entity as StateSnapshot, Model as StateSnapshotModel,
};
