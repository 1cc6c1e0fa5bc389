//! Tracking ID CLI commands

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Subcommand;

use super::output::Output;
use crate::domain::share::{qr_code_data, qr_file_name};
use crate::domain::tracking_id::{self, generate_time_based};
use crate::domain::{
    ImageFormat, NewsCategory, QrPreset, TrackingId, TrackingIdInfo, TrackingIdOptions,
};
use crate::storage::{load_existing_ids, Config};

#[derive(Subcommand)]
pub enum IdCommands {
    /// Generate tracking IDs
    ///
    /// Examples:
    ///   newstrack id generate                        # One regular ID
    ///   newstrack id generate --category urgent -n 5 # Five IDs starting with 9
    ///   newstrack id generate --existing taken.txt   # Skip IDs already in use
    Generate {
        /// News category (selects the ID prefix)
        #[arg(long, short)]
        category: Option<NewsCategory>,

        /// Custom prefix (overrides the category prefix)
        #[arg(long)]
        prefix: Option<String>,

        /// Custom suffix
        #[arg(long)]
        suffix: Option<String>,

        /// Total ID length including prefix and suffix
        #[arg(long)]
        length: Option<usize>,

        /// Number of distinct IDs to generate
        #[arg(long, short = 'n', default_value = "1")]
        count: usize,

        /// File with IDs already in use, one per line
        #[arg(long)]
        existing: Option<PathBuf>,

        /// Attempt budget per ID when checking --existing
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Seed the ID with the current time instead of pure random digits
        #[arg(
            long,
            conflicts_with_all = ["category", "prefix", "suffix", "length", "count", "existing"]
        )]
        time_based: bool,

        /// Print IDs in grouped form (1234-5678-9012)
        #[arg(long)]
        grouped: bool,
    },

    /// Check whether an ID is well formed
    Validate {
        /// ID to check
        id: String,

        /// Expected prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Expected suffix
        #[arg(long)]
        suffix: Option<String>,

        /// Expected total length
        #[arg(long)]
        length: Option<usize>,
    },

    /// Print an ID in groups of four
    Format {
        /// ID to format
        id: String,

        /// Group separator
        #[arg(long, short)]
        separator: Option<String>,
    },

    /// Strip group separators from an ID
    Unformat {
        /// Grouped ID
        formatted: String,

        /// Group separator
        #[arg(long, short)]
        separator: Option<String>,
    },

    /// Print the public article URL for an ID
    Url {
        /// Tracking ID
        id: String,

        /// Site origin (defaults to the configured one)
        #[arg(long, env = "NEWSTRACK_BASE_URL")]
        base_url: Option<String>,
    },

    /// Print what the QR encoder needs for an article
    Qr {
        /// Tracking ID
        id: String,

        /// Article title for the alt text
        #[arg(long)]
        title: Option<String>,

        /// Encoder preset (small, medium, large, branded)
        #[arg(long)]
        preset: Option<QrPreset>,

        /// Image format for the download file name
        #[arg(long, default_value = "png")]
        image: ImageFormat,

        /// Site origin (defaults to the configured one)
        #[arg(long, env = "NEWSTRACK_BASE_URL")]
        base_url: Option<String>,
    },
}

pub fn run(cmd: IdCommands, config: &Config, output: &Output) -> Result<()> {
    let separator = config.project.tracking.separator.as_str();

    match cmd {
        IdCommands::Generate {
            category,
            prefix,
            suffix,
            length,
            count,
            existing,
            max_attempts,
            time_based,
            grouped,
        } => {
            if time_based {
                let id = generate_time_based(Utc::now());
                output.verbose_ctx("generate", "Using time-based generation");
                return print_ids(output, &[id], &TrackingIdOptions::default(), grouped, separator);
            }

            let category = category.unwrap_or(config.project.tracking.default_category);
            let options = options_for(category.options(), prefix, suffix, length);
            output.verbose_ctx(
                "generate",
                &format!(
                    "category={}, prefix='{}', suffix='{}', length={}, count={}",
                    category, options.prefix, options.suffix, options.length, count
                ),
            );

            let ids = match existing {
                Some(path) => {
                    let max_attempts = max_attempts.unwrap_or(config.project.tracking.max_attempts);
                    let mut taken = load_existing_ids(&path, separator)?;
                    output.verbose_ctx(
                        "generate",
                        &format!("Loaded {} existing IDs from {}", taken.len(), path.display()),
                    );

                    let mut ids = Vec::with_capacity(count);
                    for _ in 0..count {
                        let id = tracking_id::generate_guaranteed_unique(
                            &taken,
                            max_attempts,
                            &options,
                        )?;
                        taken.insert(id.to_string());
                        ids.push(id);
                    }
                    ids
                }
                None if count == 1 => vec![tracking_id::generate(&options)?],
                None => {
                    let mut ids: Vec<_> = tracking_id::generate_many(count, &options)?
                        .into_iter()
                        .collect();
                    ids.sort();
                    ids
                }
            };

            print_ids(output, &ids, &options, grouped, separator)?;
        }

        IdCommands::Validate {
            id,
            prefix,
            suffix,
            length,
        } => {
            let id = id.trim();
            let options = options_for(TrackingIdOptions::default(), prefix, suffix, length);
            let valid = tracking_id::validate(id, &options);

            if output.is_json() {
                output.data(&serde_json::json!({
                    "id": id,
                    "valid": valid,
                }));
            } else if valid {
                println!("{} is a valid tracking ID", id);
            }

            if !valid {
                bail!("'{}' is not a valid tracking ID", id);
            }
        }

        IdCommands::Format { id, separator: sep } => {
            let formatted = tracking_id::format(&id, sep.as_deref().unwrap_or(separator));
            emit_value(output, "formatted", &formatted);
        }

        IdCommands::Unformat {
            formatted,
            separator: sep,
        } => {
            let id = tracking_id::unformat(&formatted, sep.as_deref().unwrap_or(separator));
            emit_value(output, "id", &id);
        }

        IdCommands::Url { id, base_url } => {
            let base = config.base_url(base_url.as_deref());
            output.verbose_ctx("url", &format!("Base URL: {}", base));
            let url = tracking_id::to_article_url(id.trim(), &base)?;
            emit_value(output, "url", &url);
        }

        IdCommands::Qr {
            id,
            title,
            preset,
            image,
            base_url,
        } => {
            let base = config.base_url(base_url.as_deref());
            let preset = preset.unwrap_or(config.project.qr.preset);
            let now = Utc::now();

            let id = id.trim();
            let data = qr_code_data(id, title.as_deref(), &base, now)?;
            let file_name = qr_file_name(id, image, now.date_naive())?;
            let options = preset.options();

            if output.is_json() {
                output.data(&serde_json::json!({
                    "url": data.url,
                    "tracking_id": data.tracking_id,
                    "title": data.title,
                    "alt_text": data.alt_text(),
                    "file_name": file_name,
                    "preset": preset.as_str(),
                    "options": options,
                    "generated_at": data.generated_at,
                }));
            } else {
                output.field("URL", &data.url);
                output.field("Alt text", &data.alt_text());
                output.field("File name", &file_name);
                output.field("Preset", preset.as_str());
                output.field("Size", &format!("{}px, margin {}", options.size, options.margin));
                output.field("Error correction", &format!("{:?}", options.error_correction));
                output.field(
                    "Colors",
                    &format!("{} on {}", options.color.dark, options.color.light),
                );
            }
        }
    }

    Ok(())
}

/// Applies explicit overrides on top of base options
fn options_for(
    base: TrackingIdOptions,
    prefix: Option<String>,
    suffix: Option<String>,
    length: Option<usize>,
) -> TrackingIdOptions {
    TrackingIdOptions {
        prefix: prefix.unwrap_or(base.prefix),
        suffix: suffix.unwrap_or(base.suffix),
        length: length.unwrap_or(base.length),
    }
}

fn print_ids(
    output: &Output,
    ids: &[TrackingId],
    options: &TrackingIdOptions,
    grouped: bool,
    separator: &str,
) -> Result<()> {
    if output.is_json() {
        let now = Utc::now();
        let infos: Vec<_> = ids
            .iter()
            .map(|id| TrackingIdInfo::new(id.clone(), options, now))
            .collect();
        output.data(&infos);
    } else {
        for id in ids {
            if grouped {
                println!("{}", tracking_id::format(id.as_str(), separator));
            } else {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

/// Prints a single value, bare in text mode or as `{key: value}` in JSON mode
fn emit_value(output: &Output, key: &str, value: &str) {
    if output.is_json() {
        output.data(&serde_json::json!({ key: value }));
    } else {
        output.success(value);
    }
}
