//! Configuration file schema
//!
//! All fields have serde defaults so a partial file (or none at all)
//! yields a working configuration.

use macrolens_domain::{GenerationParams, RetryPolicy};
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Gemini model identifier
    pub model: String,
    /// API key; usually supplied via `GEMINI_API_KEY` instead
    pub api_key: Option<String>,
    pub generation: GenerationSection,
    pub retry: RetrySection,
    pub consensus: ConsensusSection,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            api_key: None,
            generation: GenerationSection::default(),
            retry: RetrySection::default(),
            consensus: ConsensusSection::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSection {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationSection {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            temperature: params.temperature,
            top_k: params.top_k,
            top_p: params.top_p,
            max_output_tokens: params.max_output_tokens,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySection {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetrySection {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_retries: policy.max_retries,
            initial_delay_ms: policy.initial_delay_ms,
            backoff_multiplier: policy.backoff_multiplier,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusSection {
    /// Number of independent samples for consensus flows
    pub samples: usize,
}

impl Default for ConsensusSection {
    fn default() -> Self {
        Self { samples: 2 }
    }
}

impl FileConfig {
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.generation.temperature,
            top_k: self.generation.top_k,
            top_p: self.generation.top_p,
            max_output_tokens: self.generation.max_output_tokens,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.retry.max_retries,
            initial_delay_ms: self.retry.initial_delay_ms,
            backoff_multiplier: self.retry.backoff_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_domain_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.generation_params(), GenerationParams::default());
        assert_eq!(config.consensus.samples, 2);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: FileConfig =
            toml::from_str("model = \"gemini-2.0-flash\"\n[retry]\nmax_retries = 5\n").unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.retry.max_retries, 5);
        assert_eq!(config.retry.initial_delay_ms, 1000);
        assert_eq!(config.generation.top_k, 32);
    }
}
