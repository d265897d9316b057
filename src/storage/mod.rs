//! Context-sensitive position storage

pub mod context;
pub mod error;
pub mod position;
pub mod position_store;
pub mod record;
pub mod reference_point;
pub mod relativity;

pub use context::Context;
pub use error::{ParseError, StoreError};
pub use position::Position;
pub use position_store::{PositionStore, StoredRecord};
pub use record::Record;
pub use reference_point::ReferencePointStore;
pub use relativity::Relativity;
