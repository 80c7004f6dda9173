//! Classification output schema and persistence

mod schema;
mod writer;

pub use schema::{
    ClassificationRecord, ClassificationStatus, IndustryAssociation, SubCategory,
};
pub use writer::{write_csv, write_json, WriteError};
