//! OCR Service
//!
//! Orchestrates OCR providers in their configured order.

use std::sync::Arc;

use super::{
    provider::{OcrProviderTrait, OllamaProvider, TesseractProvider},
    types::{OcrError, OcrProvider, OcrResult},
};

/// OCR service configuration
#[derive(Debug, Clone)]
pub struct OcrServiceConfig {
    /// Preferred provider order
    pub providers: Vec<OcrProvider>,
    /// Ollama base URL
    pub ollama_url: String,
    /// Ollama model name
    pub ollama_model: String,
    /// Default OCR language
    pub default_language: String,
}

impl Default for OcrServiceConfig {
    fn default() -> Self {
        Self {
            providers: vec![OcrProvider::Tesseract, OcrProvider::Ollama],
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: "llava".to_string(),
            default_language: "eng".to_string(),
        }
    }
}

/// OCR service for rasterized PDF pages
pub struct OcrService {
    config: OcrServiceConfig,
    providers: Vec<Arc<dyn OcrProviderTrait>>,
}

impl OcrService {
    /// Create a new OCR service
    pub fn new(config: OcrServiceConfig) -> Self {
        let providers = config
            .providers
            .iter()
            .map(|provider| -> Arc<dyn OcrProviderTrait> {
                match provider {
                    OcrProvider::Tesseract => {
                        Arc::new(TesseractProvider::new(&config.default_language))
                    }
                    OcrProvider::Ollama => {
                        Arc::new(OllamaProvider::new(&config.ollama_url, &config.ollama_model))
                    }
                }
            })
            .collect();

        Self { config, providers }
    }

    /// Create a service over explicit provider instances
    pub fn with_providers(
        config: OcrServiceConfig,
        providers: Vec<Arc<dyn OcrProviderTrait>>,
    ) -> Self {
        Self { config, providers }
    }

    /// Get available providers
    pub async fn available_providers(&self) -> Vec<OcrProvider> {
        let mut available = Vec::new();
        for provider in &self.providers {
            if provider.is_available().await {
                available.push(provider.provider_type());
            }
        }
        available
    }

    /// Perform OCR on a PNG image
    pub async fn recognize(
        &self,
        image_data: &[u8],
        preferred_provider: Option<OcrProvider>,
        language: Option<&str>,
    ) -> Result<OcrResult, OcrError> {
        let lang = language.unwrap_or(&self.config.default_language);

        // A requested provider is used exclusively
        if let Some(preferred) = preferred_provider {
            for provider in &self.providers {
                if provider.provider_type() == preferred {
                    if provider.is_available().await {
                        return provider.recognize(image_data, Some(lang)).await;
                    } else {
                        return Err(OcrError::ProviderNotAvailable(format!(
                            "{:?} provider is not available",
                            preferred
                        )));
                    }
                }
            }
            return Err(OcrError::ProviderNotAvailable(format!(
                "{:?} provider is not configured",
                preferred
            )));
        }

        for provider in &self.providers {
            if provider.is_available().await {
                match provider.recognize(image_data, Some(lang)).await {
                    Ok(result) => return Ok(result),
                    Err(e) => {
                        tracing::warn!(
                            "OCR provider {:?} failed: {}, trying next",
                            provider.provider_type(),
                            e
                        );
                        continue;
                    }
                }
            }
        }

        Err(OcrError::ProviderNotAvailable(
            "No OCR providers available".to_string(),
        ))
    }
}
