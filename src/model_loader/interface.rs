use crate::image_classifier::interface::ImageClassifier;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    /// A user-selected file set: `model.json`, weight shards, optional `metadata.json`.
    Files { paths: Vec<PathBuf> },
    Mock { labels: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelFormat {
    Graph,
    Layers,
}

impl std::fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelFormat::Graph => write!(f, "graph-model"),
            ModelFormat::Layers => write!(f, "layers-model"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub loader: String,
    pub format: Option<ModelFormat>,
    pub labels: Vec<String>,
}

pub struct LoadedModel {
    pub info: ModelInfo,
    pub classifier: Arc<dyn ImageClassifier + Send + Sync>,
}

pub trait ModelLoader: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this loader is worth trying for the source at all.
    fn accepts(&self, _source: &ModelSource) -> bool {
        true
    }

    fn load(
        &self,
        source: &ModelSource,
    ) -> Result<LoadedModel, Box<dyn std::error::Error + Send + Sync>>;
}
