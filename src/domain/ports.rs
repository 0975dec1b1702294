use crate::core::sheet::SheetLayout;
use crate::domain::model::{ExtractResult, RunSummary, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// File access relative to a base directory.
pub trait Storage: Send + Sync {
    /// Names of the regular files directly inside the base directory.
    fn list_files(&self) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn file_extensions(&self) -> &[String];
    fn default_year(&self) -> i32;
    fn report_title(&self) -> &str;
    fn archive_name(&self) -> &str;
    fn trainee_name(&self) -> Option<&str>;
    fn program_name(&self) -> Option<&str>;
    fn layout(&self) -> &SheetLayout;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractResult>;
    async fn transform(&self, data: ExtractResult) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<RunSummary>;
}
