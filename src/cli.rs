//! Command-line front end for the `purl` binary.

use crate::builder::ManualBuilder;
use crate::config::{LoadOptions, PurlConfig};
use crate::decoder::{decode, Decoded};
use crate::logging::init_logging;
use crate::paths::expand_tilde;
use crate::purl::PackageUrl;
use crate::registry::{registry_url, translate_registry_url};
use clap::{Parser, Subcommand};
use std::io::Write;

/// Inline message for an unrecognized registry URL.
pub const UNSUPPORTED_REGISTRY_URL: &str = "Given URL is either invalid or not supported.";
/// Inline message for a string that is not a Package URL.
pub const INVALID_PACKAGE_URL: &str = "Invalid Package URL";

const TYPE_REQUIRED: &str = "A type is required";
const NAME_REQUIRED: &str = "A name is required";

#[derive(Parser, Debug)]
#[command(name = "purl", version, about = "Create and decode Package URLs")]
pub struct Cli {
    /// Read configuration from this file only
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Also print the registry page URL of the result
    #[arg(long, global = true)]
    pub links: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a Package URL from a registry page URL
    /// (e.g. https://www.npmjs.com/package/lodash/v/4.17.21)
    FromRegistry {
        /// npm, NuGet or PyPI package page URL
        url: String,
    },

    /// Assemble a Package URL from its components
    Build {
        /// Package type, e.g. "npm", "nuget", "pypi"
        #[arg(short = 't', long = "type")]
        ty: Option<String>,

        /// Namespace, e.g. an npm scope
        #[arg(short, long, default_value = "")]
        namespace: String,

        /// Package name
        #[arg(short = 'N', long, default_value = "")]
        name: String,

        /// Package version
        #[arg(short = 'V', long = "pkg-version", default_value = "")]
        version: String,

        /// Path inside the package
        #[arg(short, long, default_value = "")]
        subpath: String,

        /// Qualifier as key=value (repeatable)
        #[arg(short, long = "qualifier")]
        qualifiers: Vec<String>,
    },

    /// Decompose a Package URL into its components
    Decode {
        /// Package URL, e.g. pkg:npm/lodash@4.17.21
        purl: String,
    },

    /// Print the registry page URL of a Package URL
    RegistryUrl {
        /// Package URL of an npm, NuGet or PyPI package
        purl: String,
    },
}

impl Cli {
    /// Load configuration, set up logging and run the selected command.
    ///
    /// Returns the process exit code: 0 on success, 1 on invalid input.
    pub fn run(&self) -> anyhow::Result<i32> {
        let opts = LoadOptions {
            config_file: self.config.as_deref().map(expand_tilde),
            ..LoadOptions::default()
        };
        let config = PurlConfig::load_with_options(opts)?;
        init_logging(config.log_filter());
        tracing::debug!(sources = ?config.sources(), "configuration loaded");

        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let code = self.execute(&config, &mut stdout.lock(), &mut stderr.lock())?;
        Ok(code)
    }

    /// Run the command, writing results to `out` and validation messages
    /// to `err`.
    pub fn execute(
        &self,
        config: &PurlConfig,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> std::io::Result<i32> {
        let links = self.links || config.registry_links();

        match &self.command {
            Command::FromRegistry { url } => match translate_registry_url(url).purl {
                Some(purl) => {
                    print_purl(out, &purl, links)?;
                    Ok(0)
                }
                None => {
                    writeln!(err, "{}", UNSUPPORTED_REGISTRY_URL)?;
                    Ok(1)
                }
            },

            Command::Build {
                ty,
                namespace,
                name,
                version,
                subpath,
                qualifiers,
            } => {
                let ty = ty.as_deref().or(config.default_type()).unwrap_or_default();
                let mut builder = ManualBuilder::new();
                builder
                    .set_type(ty)
                    .set_namespace(namespace.as_str())
                    .set_name(name.as_str())
                    .set_version(version.as_str())
                    .set_subpath(subpath.as_str());

                for pair in qualifiers {
                    let (key, value) = pair.split_once('=').unwrap_or((pair.as_str(), ""));
                    builder.set_qualifier_key(key).set_qualifier_value(value);
                    if let Err(e) = builder.add_qualifier() {
                        let (key_msg, value_msg) = e.qualifier_messages();
                        for msg in key_msg.into_iter().chain(value_msg) {
                            writeln!(err, "qualifier '{}': {}", pair, msg)?;
                        }
                        return Ok(1);
                    }
                }

                match builder.build() {
                    Ok(Some(purl)) => {
                        print_purl(out, &purl, links)?;
                        Ok(0)
                    }
                    Ok(None) => {
                        if ty.is_empty() {
                            writeln!(err, "{}", TYPE_REQUIRED)?;
                        }
                        if name.is_empty() {
                            writeln!(err, "{}", NAME_REQUIRED)?;
                        }
                        Ok(1)
                    }
                    Err(e) => {
                        writeln!(err, "{}", e)?;
                        Ok(1)
                    }
                }
            }

            Command::Decode { purl } => match decode(purl) {
                decoded @ Decoded::Valid(_) => {
                    for (label, value) in decoded.components() {
                        writeln!(out, "{}: {}", label, value)?;
                    }
                    if let Some(url) = decoded.purl().filter(|_| links).and_then(registry_url) {
                        writeln!(out, "Registry: {}", url)?;
                    }
                    Ok(0)
                }
                Decoded::Invalid(e) => {
                    writeln!(err, "{}: {}", INVALID_PACKAGE_URL, e)?;
                    Ok(1)
                }
                Decoded::Empty => Ok(0),
            },

            Command::RegistryUrl { purl } => {
                let parsed = match PackageUrl::parse(purl) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        writeln!(err, "{}: {}", INVALID_PACKAGE_URL, e)?;
                        return Ok(1);
                    }
                };
                match registry_url(&parsed) {
                    Some(url) => {
                        writeln!(out, "{}", url)?;
                        Ok(0)
                    }
                    None => {
                        writeln!(err, "no registry page known for type '{}'", parsed.ty())?;
                        Ok(1)
                    }
                }
            }
        }
    }
}

fn print_purl(out: &mut impl Write, purl: &PackageUrl, links: bool) -> std::io::Result<()> {
    writeln!(out, "{}", purl)?;
    if links {
        if let Some(url) = registry_url(purl) {
            writeln!(out, "Registry: {}", url)?;
        }
    }
    Ok(())
}
