//! Share links and QR code metadata
//!
//! The studio renders QR codes with an external encoder. This module only
//! prepares what the encoder and the share buttons consume: the article URL,
//! encoder options, alt text and a download file name.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::tracking_id::{to_article_url, validate, TrackingIdError, TrackingIdOptions};

/// Site used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// QR error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

/// Colors for the dark modules and the background
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrColors {
    pub dark: String,
    pub light: String,
}

impl Default for QrColors {
    fn default() -> Self {
        Self {
            dark: "#000000".to_string(),
            light: "#FFFFFF".to_string(),
        }
    }
}

/// Options passed through to the QR encoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrOptions {
    /// Edge length in pixels
    pub size: u32,
    /// Quiet zone in modules
    pub margin: u32,
    pub error_correction: ErrorCorrection,
    pub color: QrColors,
}

impl Default for QrOptions {
    fn default() -> Self {
        QrPreset::Medium.options()
    }
}

/// Named encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QrPreset {
    /// List views
    Small,
    /// Inside an article
    #[default]
    Medium,
    /// Print
    Large,
    /// Brand colors
    Branded,
}

impl QrPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QrPreset::Small => "small",
            QrPreset::Medium => "medium",
            QrPreset::Large => "large",
            QrPreset::Branded => "branded",
        }
    }

    pub fn options(&self) -> QrOptions {
        let (size, margin, error_correction) = match self {
            QrPreset::Small => (120, 1, ErrorCorrection::L),
            QrPreset::Medium | QrPreset::Branded => (200, 2, ErrorCorrection::M),
            QrPreset::Large => (400, 4, ErrorCorrection::H),
        };
        let color = match self {
            QrPreset::Branded => QrColors {
                dark: "#1a365d".to_string(),
                light: "#f7fafc".to_string(),
            },
            _ => QrColors::default(),
        };

        QrOptions {
            size,
            margin,
            error_correction,
            color,
        }
    }
}

impl fmt::Display for QrPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QrPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(QrPreset::Small),
            "medium" => Ok(QrPreset::Medium),
            "large" => Ok(QrPreset::Large),
            "branded" => Ok(QrPreset::Branded),
            other => Err(format!(
                "unknown QR preset '{}', expected one of: small, medium, large, branded",
                other
            )),
        }
    }
}

/// Image format of a downloaded QR code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Svg => "svg",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(format!("unknown image format '{}', expected png, jpg or svg", other)),
        }
    }
}

/// Payload for the QR encoder and share UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QrCodeData {
    pub url: String,
    pub tracking_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl QrCodeData {
    /// Alt text for the rendered image
    pub fn alt_text(&self) -> String {
        let base = format!("QR code for article {}", self.tracking_id);
        match self.title.as_deref().filter(|t| !t.is_empty()) {
            Some(title) => format!("{} - {}", base, title),
            None => base,
        }
    }
}

fn check_id(tracking_id: &str) -> Result<(), TrackingIdError> {
    if validate(tracking_id, &TrackingIdOptions::default()) {
        Ok(())
    } else {
        Err(TrackingIdError::Validation(tracking_id.to_string()))
    }
}

/// Builds the QR payload for an article
pub fn qr_code_data(
    tracking_id: &str,
    title: Option<&str>,
    base_url: &str,
    now: DateTime<Utc>,
) -> Result<QrCodeData, TrackingIdError> {
    let url = to_article_url(tracking_id, base_url)?;
    Ok(QrCodeData {
        url,
        tracking_id: tracking_id.to_string(),
        title: title.map(str::to_string),
        generated_at: now,
    })
}

/// File name for a downloaded QR code, e.g. `qr-123456789012-2025-03-21.png`
pub fn qr_file_name(
    tracking_id: &str,
    format: ImageFormat,
    date: NaiveDate,
) -> Result<String, TrackingIdError> {
    check_id(tracking_id)?;
    Ok(format!(
        "qr-{}-{}.{}",
        tracking_id,
        date.format("%Y-%m-%d"),
        format.extension()
    ))
}
