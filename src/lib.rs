//! i18n-audit - translation file auditing and bulk translation
//!
//! Reconciles a translation tree (nested key → text data) with how its keys
//! are referenced in a codebase, and drives chunked machine translation of
//! every value through a LibreTranslate-compatible service.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (flags, settings, orchestration)
//! - `codecs`: JSON, CSV and HTML input/output
//! - `config`: Configuration file loading and parsing
//! - `core`: Audit engine (tree flattening, key extraction, classification)
//! - `error`: Error taxonomy shared by every component
//! - `translate`: Translation backends and the batching pipeline

pub mod cli;
pub mod codecs;
pub mod config;
pub mod core;
pub mod error;
pub mod translate;
