use crate::library::logger::interface::Logger;
use crate::model_loader::impl_mock::ModelLoaderMock;
use crate::model_loader::impl_tfjs::ModelLoaderTfjs;
use crate::model_loader::interface::{LoadedModel, ModelLoader, ModelSource};
use std::sync::Arc;

/// Tries each strategy in order and returns the first model that loads.
pub struct ModelLoaderChain {
    logger: Arc<dyn Logger + Send + Sync>,
    loaders: Vec<Box<dyn ModelLoader + Send + Sync>>,
}

impl ModelLoaderChain {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        loaders: Vec<Box<dyn ModelLoader + Send + Sync>>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("model_loader"),
            loaders,
        }
    }

    /// Graph model first, then layers model, then mock. Only loaders that
    /// accept the source are tried.
    pub fn standard(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::new(
            logger,
            vec![
                Box::new(ModelLoaderTfjs::graph()),
                Box::new(ModelLoaderTfjs::layers()),
                Box::new(ModelLoaderMock::new()),
            ],
        )
    }
}

impl ModelLoader for ModelLoaderChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn load(
        &self,
        source: &ModelSource,
    ) -> Result<LoadedModel, Box<dyn std::error::Error + Send + Sync>> {
        let mut failures = Vec::new();

        for loader in self.loaders.iter().filter(|l| l.accepts(source)) {
            match loader.load(source) {
                Ok(model) => {
                    let _ = self.logger.info(&format!(
                        "Loaded model with {} loader ({} labels)",
                        loader.name(),
                        model.info.labels.len()
                    ));
                    return Ok(model);
                }
                Err(e) => {
                    let _ = self.logger.warn(&format!(
                        "{} load failed, trying next loader: {}",
                        loader.name(),
                        e
                    ));
                    failures.push(format!("{}: {}", loader.name(), e));
                }
            }
        }

        if failures.is_empty() {
            return Err("No model loader accepts this model source".into());
        }
        Err(format!("all loaders failed ({})", failures.join("; ")).into())
    }
}
