pub mod etl;
pub mod period;
pub mod pipeline;
pub mod render;
pub mod sheet;

pub use crate::domain::model::{
    DayEntry, ExtractResult, FileFailure, RenderedDocument, ReportDocument, ReportPeriod,
    RunSummary, SheetData, SourceReport, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
