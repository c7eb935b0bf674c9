use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::generation::{DocxStyle, PdfLayout};
use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO), or "auto" to detect
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation backend config
    pub backend: BackendConfig,

    /// Directory where uploaded documents are stored
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Directory where translated documents are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum accepted document size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Characters sampled for language detection
    #[serde(default = "default_detection_prefix_chars")]
    pub detection_prefix_chars: usize,

    /// PDF generation settings
    #[serde(default)]
    pub pdf: PdfConfig,

    /// DOCX generation settings
    #[serde(default)]
    pub docx: DocxConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Max chars per request
    #[serde(default = "default_max_chars_per_request")]
    pub max_chars_per_request: usize,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Retry attempts on server/network errors
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    // @field: Base backoff in milliseconds between retries
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

/// PDF page geometry and font settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PdfConfig {
    #[serde(default = "default_page_width")]
    pub page_width: f32,
    #[serde(default = "default_page_height")]
    pub page_height: f32,
    #[serde(default = "default_page_margin")]
    pub margin: f32,
    #[serde(default = "default_pdf_font_size")]
    pub font_size: f32,
    #[serde(default = "default_pdf_line_height")]
    pub line_height: f32,
    /// TrueType files to try embedding, in preference order; empty means
    /// the built-in layout defaults
    #[serde(default)]
    pub font_candidates: Vec<PathBuf>,
}

/// DOCX run and paragraph styling
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DocxConfig {
    #[serde(default = "default_docx_fonts")]
    pub font_preferences: Vec<String>,
    /// Run size in half-points
    #[serde(default = "default_docx_font_size")]
    pub font_size: usize,
    /// Paragraph space-after in twentieths of a point
    #[serde(default = "default_docx_space_after")]
    pub space_after: u32,
    /// Hyperlink run color (RRGGBB)
    #[serde(default = "default_link_color")]
    pub link_color: String,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_max_chars_per_request() -> usize {
    5000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("translated")
}

fn default_max_upload_bytes() -> usize {
    // 20 MiB
    20 * 1024 * 1024
}

fn default_detection_prefix_chars() -> usize {
    5000
}

fn default_page_width() -> f32 {
    612.0
}

fn default_page_height() -> f32 {
    792.0
}

fn default_page_margin() -> f32 {
    50.0
}

fn default_pdf_font_size() -> f32 {
    12.0
}

fn default_pdf_line_height() -> f32 {
    14.0
}

fn default_docx_fonts() -> Vec<String> {
    DocxStyle::default().font_preferences
}

fn default_docx_font_size() -> usize {
    24
}

fn default_docx_space_after() -> u32 {
    200
}

fn default_link_color() -> String {
    "0563C1".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            max_chars_per_request: default_max_chars_per_request(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page_width: default_page_width(),
            page_height: default_page_height(),
            margin: default_page_margin(),
            font_size: default_pdf_font_size(),
            line_height: default_pdf_line_height(),
            font_candidates: Vec::new(),
        }
    }
}

impl Default for DocxConfig {
    fn default() -> Self {
        Self {
            font_preferences: default_docx_fonts(),
            font_size: default_docx_font_size(),
            space_after: default_docx_space_after(),
            link_color: default_link_color(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            backend: BackendConfig::default(),
            upload_dir: default_upload_dir(),
            output_dir: default_output_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            detection_prefix_chars: default_detection_prefix_chars(),
            pdf: PdfConfig::default(),
            docx: DocxConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl PdfConfig {
    /// Build the generation layout, falling back to the stock font search
    /// paths when no candidates are configured
    pub fn to_layout(&self) -> PdfLayout {
        let defaults = PdfLayout::default();
        PdfLayout {
            page_width: self.page_width,
            page_height: self.page_height,
            margin: self.margin,
            font_size: self.font_size,
            line_height: self.line_height,
            font_candidates: if self.font_candidates.is_empty() {
                defaults.font_candidates
            } else {
                self.font_candidates.clone()
            },
        }
    }
}

impl DocxConfig {
    /// Build the generation style
    pub fn to_style(&self) -> DocxStyle {
        DocxStyle {
            font_preferences: self.font_preferences.clone(),
            font_size: self.font_size,
            space_after: self.space_after,
            link_color: self.link_color.clone(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).context(format!(
            "Failed to read config file: {}",
            path.as_ref().display()
        ))?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config file as JSON")?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.backend.endpoint)
            .map_err(|e| anyhow!("Invalid backend endpoint '{}': {}", self.backend.endpoint, e))?;

        if self.backend.max_chars_per_request == 0 {
            return Err(anyhow!("backend.max_chars_per_request must be positive"));
        }
        if self.max_upload_bytes == 0 {
            return Err(anyhow!("max_upload_bytes must be positive"));
        }
        if self.pdf.font_size <= 0.0 || self.pdf.line_height <= 0.0 {
            return Err(anyhow!("PDF font size and line height must be positive"));
        }
        if self.pdf.page_width <= 2.0 * self.pdf.margin
            || self.pdf.page_height <= 2.0 * self.pdf.margin
        {
            return Err(anyhow!("PDF margins leave no room for content"));
        }

        language_utils::validate_language_code(&self.source_language)
            .context("Invalid source_language in config")?;
        language_utils::validate_language_code(&self.target_language)
            .context("Invalid target_language in config")?;
        if self.target_language.trim().eq_ignore_ascii_case("auto") {
            return Err(anyhow!("target_language cannot be 'auto'"));
        }

        Ok(())
    }
}
