use crate::domain::model::{Dataset, GroupLimits, Report};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Path (inside storage) of the zip archive holding the CSV datasets.
    fn dataset_path(&self) -> &str;
    /// Path (inside storage) of the subject-classification taxonomy JSON.
    fn taxonomy_path(&self) -> &str;
    fn output_path(&self) -> &str;
    /// GitHub API base URL for release polling.
    fn releases_endpoint(&self) -> &str;
    /// `Name=owner/repo` pairs to poll; empty disables polling.
    fn release_repos(&self) -> &[String];
    fn group_limits(&self) -> GroupLimits;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Dataset>;
    async fn transform(&self, data: Dataset) -> Result<Report>;
    async fn load(&self, report: Report) -> Result<String>;
}
