pub mod coerce;
pub mod converter;
pub mod etl;
pub mod table;

pub use crate::domain::model::{ConversionOutcome, Dataset, FileMapping, Record, Summary};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
