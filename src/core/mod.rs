pub mod aggregate;
pub mod engine;
pub mod grouping;
pub mod narrative;
pub mod partition;
pub mod pipeline;
pub mod prose;
pub mod releases;
pub mod report;
pub mod summary;

pub use crate::domain::model::{Dataset, Report};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
