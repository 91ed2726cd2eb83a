use crate::image_classifier::interface::{Classification, ImageClassifier};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued results in order; once drained, returns no classifications.
pub struct ImageClassifierScripted {
    script: Mutex<VecDeque<Result<Vec<Classification>, String>>>,
}

impl ImageClassifierScripted {
    pub fn new(script: Vec<Result<Vec<Classification>, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

impl ImageClassifier for ImageClassifierScripted {
    fn classify(
        &self,
        _frame: &[u8],
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        let next = self.script.lock().map_err(|e| e.to_string())?.pop_front();
        match next {
            Some(Ok(classifications)) => Ok(classifications),
            Some(Err(message)) => Err(message.into()),
            None => Ok(vec![]),
        }
    }
}
