use std::path::PathBuf;
use vitrine_core::{CatalogError, Dataset, Result};

#[async_trait::async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self) -> Result<Dataset>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl DatasetSource for FileSource {
    async fn fetch(&self) -> Result<Dataset> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| CatalogError::Load(format!("{}: {}", self.path.display(), e)))?;
        Dataset::from_slice(&bytes).map_err(|e| match e {
            CatalogError::Load(msg) => CatalogError::Load(format!("{}: {}", self.path.display(), msg)),
            other => other,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    dataset: Dataset,
}

impl StaticSource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

#[async_trait::async_trait]
impl DatasetSource for StaticSource {
    async fn fetch(&self) -> Result<Dataset> {
        Ok(self.dataset.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}
