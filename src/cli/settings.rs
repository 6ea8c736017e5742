//! Resolution of CLI flags and the config file into one immutable value.

use std::path::PathBuf;

use super::args::Arguments;
use crate::codecs::Format;
use crate::config::{Config, SearcherKind};
use crate::core::{AuditOptions, SearchScope};
use crate::error::{AuditError, Result};
use crate::translate::PipelineOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Audit,
    Translate { source: String, target: String },
    Convert,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub output_format: Format,
    pub mode: Mode,
    pub scope: SearchScope,
    pub audit: AuditOptions,
    pub searcher: SearcherKind,
    pub api_url: String,
    pub api_key: Option<String>,
    pub chunk_size: i64,
    pub chunk_delay: i64,
}

impl Settings {
    /// Merge `args` over `config`. Flags win, except `--exclude` which adds to
    /// the configured exclusions.
    pub fn resolve(args: Arguments, config: Config) -> Result<Self> {
        let input_format = Format::from_path(&args.input)?;
        let output_format = Format::from(args.to);

        let mode = match (args.audit, args.translate.as_deref()) {
            (true, Some(_)) => {
                return Err(AuditError::Configuration(
                    "You cannot use --translate and --audit options together".to_string(),
                ));
            }
            (false, Some(pair)) => {
                let (source, target) = parse_language_pair(pair)?;
                Mode::Translate { source, target }
            }
            (true, None) => Mode::Audit,
            (false, None) => Mode::Convert,
        };

        if input_format == output_format && !matches!(mode, Mode::Translate { .. }) {
            return Err(AuditError::Configuration(format!(
                "Input and output format are both {}, which is only allowed with --translate",
                output_format.as_str()
            )));
        }

        let roots = if args.src.is_empty() {
            config.src.iter().map(PathBuf::from).collect()
        } else {
            args.src
        };
        // The translation file itself is never a usage site, whatever
        // glob metacharacters its path holds.
        let mut exclusions = vec![glob::Pattern::escape(&args.input.to_string_lossy())];
        exclusions.extend(config.excludes);
        exclusions.extend(args.exclude);

        if mode == Mode::Audit {
            for pattern in &exclusions {
                glob::Pattern::new(pattern).map_err(|e| {
                    AuditError::Configuration(format!(
                        "Invalid exclude pattern \"{}\": {}",
                        pattern, e
                    ))
                })?;
            }
        }

        Ok(Self {
            input: args.input,
            output: args.output,
            output_format,
            mode,
            scope: SearchScope { roots, exclusions },
            audit: AuditOptions {
                include_source: !args.no_source,
                loose_search: args.loose || config.loose,
                suppress_attention: args.no_attention,
            },
            searcher: args.searcher.unwrap_or(config.searcher),
            api_url: args.api_url.unwrap_or(config.api_url),
            api_key: args.api_key,
            chunk_size: args.chunk_size.unwrap_or(config.chunk_size),
            chunk_delay: args.chunk_delay.unwrap_or(config.chunk_delay),
        })
    }

    pub fn pipeline_options(&self, source: &str, target: &str) -> PipelineOptions {
        PipelineOptions::new(source, target, self.chunk_size, self.chunk_delay)
            .with_api_key(self.api_key.clone())
    }
}

fn parse_language_pair(pair: &str) -> Result<(String, String)> {
    match pair.split_once('-') {
        Some((source, target)) if !source.is_empty() && !target.is_empty() => {
            Ok((source.to_string(), target.to_string()))
        }
        _ => Err(AuditError::Configuration(
            "Translate option must be in format source-target e.g. en-tr".to_string(),
        )),
    }
}
