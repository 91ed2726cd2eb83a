use crate::image_classifier::impl_mock::ImageClassifierMock;
use crate::model_loader::interface::{LoadedModel, ModelInfo, ModelLoader, ModelSource};
use std::sync::Arc;

pub struct ModelLoaderMock {}

impl ModelLoaderMock {
    pub fn new() -> Self {
        Self {}
    }
}

impl ModelLoader for ModelLoaderMock {
    fn name(&self) -> &str {
        "mock"
    }

    fn accepts(&self, source: &ModelSource) -> bool {
        matches!(source, ModelSource::Mock { .. })
    }

    fn load(
        &self,
        source: &ModelSource,
    ) -> Result<LoadedModel, Box<dyn std::error::Error + Send + Sync>> {
        match source {
            ModelSource::Mock { labels } if labels.is_empty() => {
                Err("Mock model needs at least one label".into())
            }
            ModelSource::Mock { labels } => Ok(LoadedModel {
                info: ModelInfo {
                    loader: self.name().to_string(),
                    format: None,
                    labels: labels.clone(),
                },
                classifier: Arc::new(ImageClassifierMock::new(labels.clone())),
            }),
            ModelSource::Files { .. } => Err("Not a mock model".into()),
        }
    }
}
