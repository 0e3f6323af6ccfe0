//! Build, decode and derive Package URLs.
//!
//! A [Package URL] ("purl") identifies a software package across
//! ecosystems:
//!
//! ```text
//! pkg:npm/%40babel/core@7.24.0
//! pkg:pypi/requests@2.31.0
//! pkg:nuget/Newtonsoft.Json@13.0.3
//! ```
//!
//! This crate provides:
//!
//! - [`PackageUrl`], a validated Package URL with a parser and canonical
//!   serializer
//! - [`translate_registry_url`], which derives a Package URL from an npm,
//!   NuGet or PyPI package page URL, and [`registry_url`] for the reverse
//! - [`ManualBuilder`], which assembles a Package URL from fields edited one
//!   at a time
//! - [`decode`], which splits an arbitrary string into labelled components
//!
//! # Quick Start
//!
//! ```
//! use purl_kit::{decode, translate_registry_url};
//!
//! let translation = translate_registry_url("https://pypi.org/project/requests/2.31.0");
//! let purl = translation.purl.unwrap();
//! assert_eq!(purl.to_string(), "pkg:pypi/requests@2.31.0");
//!
//! for (label, value) in decode(&purl.to_string()).components() {
//!     println!("{}: {}", label, value);
//! }
//! ```
//!
//! # Configuration
//!
//! The `purl` binary reads `key = value` settings from `.purlrc` files (see
//! [`PurlConfig`]):
//!
//! ```ini
//! default-type = npm
//! registry-links = true
//! log = purl_kit=debug
//! ```
//!
//! [Package URL]: https://github.com/package-url/purl-spec

mod builder;
mod config;
mod decoder;
mod encoding;
mod error;
mod parser;
mod paths;
mod purl;
mod qualifiers;
pub mod cli;
pub mod logging;
pub mod registry;

// Re-export main types
pub use builder::ManualBuilder;
pub use config::{ConfigData, LoadOptions, PurlConfig};
pub use decoder::{decode, Decoded};
pub use error::{Error, Result, KEY_REQUIRED, VALUE_REQUIRED};
pub use parser::{expand_env_vars, parse_bool};
pub use paths::{expand_tilde, find_project_config, user_config_path};
pub use purl::PackageUrl;
pub use qualifiers::Qualifiers;
pub use registry::{registry_url, translate_registry_url, Translation};
