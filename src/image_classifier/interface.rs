#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

pub trait ImageClassifier: Send + Sync {
    /// One classification per known class for the given frame.
    fn classify(
        &self,
        frame: &[u8],
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>;
}
