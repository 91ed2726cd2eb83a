use crate::image_classifier::impl_mock::ImageClassifierMock;
use crate::model_loader::descriptor::{ModelDescriptor, ModelFiles, ModelMetadata};
use crate::model_loader::interface::{
    LoadedModel, ModelFormat, ModelInfo, ModelLoader, ModelSource,
};
use std::sync::Arc;

/// Loads an exported TensorFlow.js model of one specific format.
///
/// The descriptor, weight manifest and labels are validated; inference itself
/// is mocked over the model's labels since no ML runtime is linked.
pub struct ModelLoaderTfjs {
    format: ModelFormat,
    name: String,
}

impl ModelLoaderTfjs {
    pub fn graph() -> Self {
        Self::new(ModelFormat::Graph)
    }

    pub fn layers() -> Self {
        Self::new(ModelFormat::Layers)
    }

    fn new(format: ModelFormat) -> Self {
        Self {
            format,
            name: format.to_string(),
        }
    }
}

impl ModelLoader for ModelLoaderTfjs {
    fn name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, source: &ModelSource) -> bool {
        matches!(source, ModelSource::Files { .. })
    }

    fn load(
        &self,
        source: &ModelSource,
    ) -> Result<LoadedModel, Box<dyn std::error::Error + Send + Sync>> {
        let paths = match source {
            ModelSource::Files { paths } => paths,
            ModelSource::Mock { .. } => return Err("Not a file-based model".into()),
        };

        let files = ModelFiles::from_paths(paths)?;
        let descriptor = ModelDescriptor::read(&files.descriptor)?;

        match descriptor.model_format() {
            Some(format) if format == self.format => {}
            Some(format) => {
                return Err(format!("Expected a {} but found a {}", self.format, format).into())
            }
            None => {
                return Err(format!(
                    "Unrecognized model format in {}",
                    files.descriptor.display()
                )
                .into())
            }
        }

        files.check_weights(&descriptor)?;

        let metadata_labels = match &files.metadata {
            Some(path) => ModelMetadata::read(path)?.labels,
            None => vec![],
        };
        let labels = if metadata_labels.is_empty() {
            descriptor
                .labels()
                .ok_or("Model has no class labels (add metadata.json)")?
        } else {
            metadata_labels
        };

        Ok(LoadedModel {
            info: ModelInfo {
                loader: self.name.clone(),
                format: Some(self.format),
                labels: labels.clone(),
            },
            classifier: Arc::new(ImageClassifierMock::new(labels)),
        })
    }
}
