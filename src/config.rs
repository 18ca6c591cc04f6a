//! Configuration management for pdf-text-store

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::ocr::{OcrProvider, OcrServiceConfig};

#[derive(Debug, Clone)]
pub struct Config {
    pub pdf_path: PathBuf,
    pub store: StoreConfig,
    pub ocr: OcrConfig,
    /// Characters shown when previewing extracted or stored text
    pub preview_chars: usize,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub providers: Vec<OcrProvider>,
    pub language: String,
    /// Rasterization resolution for OCR
    pub dpi: u32,
    pub ollama_url: String,
    pub ollama_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pdf_path: PathBuf::from("./pdf.pdf"),
            store: StoreConfig {
                url: "mongodb://localhost:27017/".to_string(),
                database: "pdf_text_db".to_string(),
                collection: "pdf_text".to_string(),
            },
            ocr: OcrConfig {
                providers: vec![OcrProvider::Tesseract],
                language: "eng".to_string(),
                dpi: 200,
                ollama_url: "http://localhost:11434".to_string(),
                ollama_model: "llava".to_string(),
            },
            preview_chars: 1000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        Ok(Config {
            pdf_path: env::var("PDF_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.pdf_path),
            store: StoreConfig {
                url: env::var("STORE_URL").unwrap_or(defaults.store.url),
                database: env::var("STORE_DATABASE").unwrap_or(defaults.store.database),
                collection: env::var("STORE_COLLECTION").unwrap_or(defaults.store.collection),
            },
            ocr: OcrConfig {
                providers: match env::var("OCR_PROVIDERS") {
                    Ok(list) => parse_providers(&list)?,
                    Err(_) => defaults.ocr.providers,
                },
                language: env::var("OCR_LANGUAGE").unwrap_or(defaults.ocr.language),
                dpi: parse_var("OCR_DPI", defaults.ocr.dpi)?,
                ollama_url: env::var("OLLAMA_URL").unwrap_or(defaults.ocr.ollama_url),
                ollama_model: env::var("OLLAMA_MODEL").unwrap_or(defaults.ocr.ollama_model),
            },
            preview_chars: parse_var("PREVIEW_CHARS", defaults.preview_chars)?,
        })
    }
}

impl OcrConfig {
    /// Build the OCR service configuration
    pub fn service_config(&self) -> OcrServiceConfig {
        OcrServiceConfig {
            providers: self.providers.clone(),
            ollama_url: self.ollama_url.clone(),
            ollama_model: self.ollama_model.clone(),
            default_language: self.language.clone(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

/// Parse a comma-separated provider list, e.g. `tesseract,ollama`
pub fn parse_providers(list: &str) -> Result<Vec<OcrProvider>, ConfigError> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| match name.to_ascii_lowercase().as_str() {
            "tesseract" => Ok(OcrProvider::Tesseract),
            "ollama" => Ok(OcrProvider::Ollama),
            _ => Err(ConfigError::Invalid {
                key: "OCR_PROVIDERS",
                value: list.to_string(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_hardcoded_setup() {
        let config = Config::default();

        assert_eq!(config.pdf_path, PathBuf::from("./pdf.pdf"));
        assert_eq!(config.store.url, "mongodb://localhost:27017/");
        assert_eq!(config.store.database, "pdf_text_db");
        assert_eq!(config.store.collection, "pdf_text");
        assert_eq!(config.preview_chars, 1000);
        assert_eq!(config.ocr.dpi, 200);
    }

    #[test]
    fn test_parse_providers() {
        let providers = parse_providers("tesseract, Ollama").unwrap();
        assert_eq!(providers, vec![OcrProvider::Tesseract, OcrProvider::Ollama]);

        assert!(parse_providers("").unwrap().is_empty());
        assert!(matches!(
            parse_providers("tesseract,openai"),
            Err(ConfigError::Invalid { key: "OCR_PROVIDERS", .. })
        ));
    }

    #[test]
    fn test_service_config_carries_language() {
        let config = Config::default();
        let service = config.ocr.service_config();

        assert_eq!(service.default_language, "eng");
        assert_eq!(service.providers, vec![OcrProvider::Tesseract]);
    }
}
