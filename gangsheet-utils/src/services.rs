use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::session::ImageSource;

/// Remote image capabilities the editor relies on.
/// Implementations talk to an AI backend, the session only sees requests and results.
#[cfg_attr(test, mockall::automock)]
pub trait ImageService {
    /// Returns a copy of `source` with a fully transparent background
    fn remove_background(&self, source: &ImageSource) -> Result<ImageSource>;

    /// Generates a seamlessly tileable pattern image
    fn generate_pattern(&self, request: &PatternRequest) -> Result<ImageSource>;
}

/// User input for pattern generation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRequest {
    /// Description of the subject of the pattern
    pub prompt: String,
    /// Art style identifier, `default` leaves the style to the model
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub colors: String,
    #[serde(default)]
    pub negative_prompt: String,
}

impl PatternRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        PatternRequest {
            prompt: prompt.into(),
            style: "default".to_string(),
            ..PatternRequest::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.prompt.trim().is_empty(),
            "a pattern needs a description"
        );
        Ok(())
    }

    /// The prompt sent to the image model
    pub fn full_prompt(&self) -> String {
        let mut full_prompt = format!(
            "A high-quality, detailed, 4k, seamlessly tileable, repeating pattern of: \"{}\". \
             The pattern must have a transparent background with isolated subject elements.",
            self.prompt
        );
        if !self.style.is_empty() && self.style != "default" {
            full_prompt += &format!(" Art style: {}.", self.style.replacen('-', " ", 1));
        }
        let colors = self.colors.trim();
        if !colors.is_empty() {
            full_prompt += &format!(" Dominant color palette: {colors}.");
        }
        let negative_prompt = self.negative_prompt.trim();
        if !negative_prompt.is_empty() {
            full_prompt += &format!(" Avoid the following: {negative_prompt}.");
        }
        full_prompt
    }
}
