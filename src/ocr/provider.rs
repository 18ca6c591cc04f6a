//! OCR Providers
//!
//! Defines the provider trait and implementations for different OCR backends.

use async_trait::async_trait;

use super::types::{OcrError, OcrProvider, OcrResult};

/// OCR provider trait
#[async_trait]
pub trait OcrProviderTrait: Send + Sync {
    /// Get the provider type
    fn provider_type(&self) -> OcrProvider;

    /// Check if the provider is available
    async fn is_available(&self) -> bool;

    /// Perform OCR on a PNG image
    async fn recognize(&self, image_data: &[u8], language: Option<&str>) -> Result<OcrResult, OcrError>;
}

/// Tesseract OCR provider (shells out to the `tesseract` CLI)
pub struct TesseractProvider {
    /// Default language
    default_language: String,
}

impl TesseractProvider {
    pub fn new(default_language: &str) -> Self {
        Self {
            default_language: default_language.to_string(),
        }
    }
}

#[async_trait]
impl OcrProviderTrait for TesseractProvider {
    fn provider_type(&self) -> OcrProvider {
        OcrProvider::Tesseract
    }

    async fn is_available(&self) -> bool {
        tokio::process::Command::new("tesseract")
            .arg("--version")
            .output()
            .await
            .is_ok()
    }

    async fn recognize(&self, image_data: &[u8], language: Option<&str>) -> Result<OcrResult, OcrError> {
        let lang = language.unwrap_or(&self.default_language);

        let temp_dir = std::env::temp_dir();
        let input_path = temp_dir.join(format!("ocr_input_{}.png", uuid::Uuid::new_v4()));
        let output_path = temp_dir.join(format!("ocr_output_{}", uuid::Uuid::new_v4()));

        tokio::fs::write(&input_path, image_data)
            .await
            .map_err(|e| OcrError::ProcessingError(format!("Failed to write temp file: {}", e)))?;

        let output = tokio::process::Command::new("tesseract")
            .arg(&input_path)
            .arg(&output_path)
            .arg("-l")
            .arg(lang)
            .arg("--oem")
            .arg("3")
            .arg("--psm")
            .arg("3")
            .output()
            .await;

        let _ = tokio::fs::remove_file(&input_path).await;

        let output =
            output.map_err(|e| OcrError::ProcessingError(format!("Failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "Tesseract failed: {}",
                stderr
            )));
        }

        // tesseract appends the extension itself
        let output_file = format!("{}.txt", output_path.display());
        let text = read_output(&output_file).await?;

        Ok(OcrResult {
            // Page break marker only; keep line structure intact
            text: text.trim_end_matches('\u{c}').to_string(),
            confidence: 80.0, // Tesseract doesn't always provide confidence
            provider: OcrProvider::Tesseract,
        })
    }
}

/// Read tesseract's output file, removing it whether or not the read succeeds
async fn read_output(path: &str) -> Result<String, OcrError> {
    let text = tokio::fs::read_to_string(path).await;
    let _ = tokio::fs::remove_file(path).await;

    text.map_err(|e| OcrError::ProcessingError(format!("Failed to read output: {}", e)))
}

/// Ollama vision model provider
pub struct OllamaProvider {
    /// Ollama API URL
    base_url: String,
    /// Model name (e.g., "llava", "bakllava")
    model: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn prompt(language: Option<&str>) -> String {
        let lang_hint = language
            .map(|l| format!(" The text is in {}.", l))
            .unwrap_or_default();

        format!(
            "Extract all text from this image exactly as written.{} Return only the extracted text, nothing else.",
            lang_hint
        )
    }
}

#[async_trait]
impl OcrProviderTrait for OllamaProvider {
    fn provider_type(&self) -> OcrProvider {
        OcrProvider::Ollama
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn recognize(&self, image_data: &[u8], language: Option<&str>) -> Result<OcrResult, OcrError> {
        use base64::Engine;

        let url = format!("{}/api/generate", self.base_url);
        let image_base64 = base64::engine::general_purpose::STANDARD.encode(image_data);

        let request = serde_json::json!({
            "model": self.model,
            "prompt": Self::prompt(language),
            "images": [image_base64],
            "stream": false
        });

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| OcrError::ApiError(format!("Failed to call Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::ApiError(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| OcrError::ApiError(format!("Failed to parse response: {}", e)))?;

        let text = result["response"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        Ok(OcrResult {
            text,
            confidence: 75.0, // LLMs don't provide confidence scores
            provider: OcrProvider::Ollama,
        })
    }
}

/// Mock provider for testing
///
/// Returns `texts[n]` for the n-th call (the last entry repeats) and counts calls.
#[cfg(test)]
pub struct MockProvider {
    pub provider: OcrProvider,
    pub texts: Vec<String>,
    pub available: bool,
    pub fail: bool,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockProvider {
    pub fn new(provider: OcrProvider, texts: &[&str]) -> Self {
        Self {
            provider,
            texts: texts.iter().map(|t| t.to_string()).collect(),
            available: true,
            fail: false,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl OcrProviderTrait for MockProvider {
    fn provider_type(&self) -> OcrProvider {
        self.provider
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn recognize(&self, _image_data: &[u8], _language: Option<&str>) -> Result<OcrResult, OcrError> {
        let n = self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        if self.fail {
            return Err(OcrError::ProcessingError("mock failure".to_string()));
        }

        let text = self
            .texts
            .get(n)
            .or_else(|| self.texts.last())
            .cloned()
            .unwrap_or_default();

        Ok(OcrResult {
            text,
            confidence: 100.0,
            provider: self.provider,
        })
    }
}
