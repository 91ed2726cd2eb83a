use crate::image_classifier::interface::{Classification, ImageClassifier};
use rand::distr::{Distribution, Uniform};

/// Mock inference: a random probability vector over the model's labels with
/// one label boosted, so the threshold is met on some ticks but not all.
pub struct ImageClassifierMock {
    labels: Vec<String>,
}

impl ImageClassifierMock {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

impl ImageClassifier for ImageClassifierMock {
    fn classify(
        &self,
        _frame: &[u8],
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        if self.labels.is_empty() {
            return Err("Mock model has no labels".into());
        }

        let mut rng = rand::rng();

        let index_dist = Uniform::new(0, self.labels.len())?;
        let boost_dist = Uniform::new(0.5, 1.0)?;
        let weight_dist = Uniform::new(0.0, 1.0)?;

        let boosted = index_dist.sample(&mut rng);
        let boost: f32 = boost_dist.sample(&mut rng);

        let weights: Vec<f32> = (0..self.labels.len())
            .map(|i| {
                if i == boosted {
                    0.0
                } else {
                    weight_dist.sample(&mut rng)
                }
            })
            .collect();
        let weight_sum: f32 = weights.iter().sum();
        let rest = 1.0 - boost;

        let classifications = self
            .labels
            .iter()
            .zip(weights)
            .enumerate()
            .map(|(i, (label, weight))| {
                let confidence = if i == boosted {
                    boost
                } else if weight_sum > 0.0 {
                    rest * weight / weight_sum
                } else {
                    0.0
                };
                Classification {
                    label: label.clone(),
                    confidence,
                }
            })
            .collect();

        Ok(classifications)
    }
}
