use crate::model_loader::interface::ModelFormat;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const METADATA_FILE_NAME: &str = "metadata.json";

/// The selected model files, sorted by role.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFiles {
    pub descriptor: PathBuf,
    pub weights: Vec<PathBuf>,
    pub metadata: Option<PathBuf>,
}

impl ModelFiles {
    pub fn from_paths(paths: &[PathBuf]) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if paths.is_empty() {
            return Err("Please select your model.json and .bin file(s) first".into());
        }

        let mut descriptor: Option<PathBuf> = None;
        let mut weights = Vec::new();
        let mut metadata: Option<PathBuf> = None;

        for path in paths {
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase());

            match extension.as_deref() {
                Some("json") if file_name(path) == Some(METADATA_FILE_NAME) => {
                    metadata = Some(path.clone());
                }
                Some("json") => {
                    if let Some(existing) = &descriptor {
                        return Err(format!(
                            "More than one model descriptor selected: {} and {}",
                            existing.display(),
                            path.display()
                        )
                        .into());
                    }
                    descriptor = Some(path.clone());
                }
                Some("bin") => weights.push(path.clone()),
                _ => {
                    return Err(format!("Unsupported model file: {}", path.display()).into());
                }
            }
        }

        let descriptor = descriptor.ok_or("No model descriptor (model.json) selected")?;

        Ok(Self {
            descriptor,
            weights,
            metadata,
        })
    }

    /// Every shard named in the manifest must be among the selected weight files.
    pub fn check_weights(
        &self,
        descriptor: &ModelDescriptor,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let selected: Vec<&str> = self.weights.iter().filter_map(|p| file_name(p)).collect();

        let missing: Vec<&str> = descriptor
            .weight_paths()
            .filter(|wanted| {
                let wanted = Path::new(*wanted)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(*wanted);
                !selected.contains(&wanted)
            })
            .collect();

        if !missing.is_empty() {
            return Err(format!("Missing weight file(s): {}", missing.join(", ")).into());
        }
        if self.weights.is_empty() {
            return Err("No weight (.bin) files selected".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsGroup {
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub format: Option<String>,
    pub model_topology: Option<serde_json::Value>,
    #[serde(default)]
    pub weights_manifest: Vec<WeightsGroup>,
    pub user_defined_metadata: Option<serde_json::Value>,
}

impl ModelDescriptor {
    pub fn read(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let file = File::open(path)
            .map_err(|e| format!("Could not open {}: {}", path.display(), e))?;
        let descriptor = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| format!("Invalid model descriptor {}: {}", path.display(), e))?;
        Ok(descriptor)
    }

    pub fn model_format(&self) -> Option<ModelFormat> {
        match self.format.as_deref() {
            Some("graph-model") => return Some(ModelFormat::Graph),
            Some("layers-model") => return Some(ModelFormat::Layers),
            Some(_) => return None,
            None => {}
        }

        // Older exports omit `format`; the topology shape tells them apart.
        let topology = self.model_topology.as_ref()?;
        if topology.get("node").is_some() {
            Some(ModelFormat::Graph)
        } else if topology.get("class_name").is_some() || topology.get("model_config").is_some() {
            Some(ModelFormat::Layers)
        } else {
            None
        }
    }

    pub fn weight_paths(&self) -> impl Iterator<Item = &str> {
        self.weights_manifest
            .iter()
            .flat_map(|group| group.paths.iter().map(String::as_str))
    }

    pub fn labels(&self) -> Option<Vec<String>> {
        labels_from(self.user_defined_metadata.as_ref()?)
    }
}

/// Teachable Machine's `metadata.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    #[serde(default)]
    pub labels: Vec<String>,
}

impl ModelMetadata {
    pub fn read(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let file = File::open(path)
            .map_err(|e| format!("Could not open {}: {}", path.display(), e))?;
        let metadata = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| format!("Invalid metadata {}: {}", path.display(), e))?;
        Ok(metadata)
    }
}

fn labels_from(value: &serde_json::Value) -> Option<Vec<String>> {
    let labels: Vec<String> = value
        .get("labels")?
        .as_array()?
        .iter()
        .filter_map(|label| label.as_str().map(str::to_string))
        .collect();
    if labels.is_empty() {
        None
    } else {
        Some(labels)
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
