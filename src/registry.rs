//! Package URLs from registry web page URLs, and back.
//!
//! Supported registries:
//!
//! | Registry | Page URL                                            | Type    |
//! |----------|-----------------------------------------------------|---------|
//! | npm      | `https://www.npmjs.com/package/[@scope/]name[/v/version]` | `npm`   |
//! | NuGet    | `https://www.nuget.org/packages/name[/version]`     | `nuget` |
//! | PyPI     | `https://pypi.org/project/name[/version]`           | `pypi`  |

use crate::error::{Error, Result};
use crate::purl::PackageUrl;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Prefix of npm package pages.
pub const NPM_PACKAGE_PREFIX: &str = "https://www.npmjs.com/package/";

/// Base of NuGet package pages.
pub const NUGET_PACKAGES_BASE: &str = "https://www.nuget.org/packages/";

/// Base of PyPI project pages.
pub const PYPI_PROJECT_BASE: &str = "https://pypi.org/project/";

/// `https://www.nuget.org/packages/<name>[/<version>]`, with an optional
/// trailing slash when no version is given.
static NUGET_PAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://www\.nuget\.org/packages/(?P<name>[^/]+)(?:/(?P<version>[^/]+)?)?$")
        .unwrap()
});

/// `https://pypi.org/project/<name>[/<version>][/]`. The `#history` anchor
/// of the release history tab is accepted but never captured as a version.
static PYPI_PAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https://pypi\.org/project/(?P<name>[^/#]+)(?:/(?:(?P<version>[^/#]+)/?)?)?(?:#history)?$",
    )
    .unwrap()
});

/// A registry-specific page URL matcher.
type Matcher = fn(&str) -> Option<PackageUrl>;

/// Matchers in evaluation order. Every matcher runs; a later successful
/// match replaces an earlier one.
const MATCHERS: [(&str, Matcher); 3] = [
    ("npm", match_npm),
    ("nuget", match_nuget),
    ("pypi", match_pypi),
];

/// Outcome of translating a registry page URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    /// The derived Package URL, if any matcher succeeded.
    pub purl: Option<PackageUrl>,
    /// True when the input was non-empty but nothing matched.
    pub invalid: bool,
}

impl Translation {
    /// Convert into a `Result`, mapping an invalid translation to
    /// [`Error::UnsupportedRegistryUrl`]. Empty input yields `Ok(None)`.
    pub fn into_result(self, input: &str) -> Result<Option<PackageUrl>> {
        if self.invalid {
            Err(Error::UnsupportedRegistryUrl(input.to_string()))
        } else {
            Ok(self.purl)
        }
    }
}

/// Derive a Package URL from a registry web page URL.
///
/// # Examples
///
/// ```
/// use purl_kit::translate_registry_url;
///
/// let t = translate_registry_url("https://www.npmjs.com/package/lodash/v/4.17.21");
/// assert_eq!(t.purl.unwrap().to_string(), "pkg:npm/lodash@4.17.21");
///
/// let t = translate_registry_url("https://example.com/lodash");
/// assert!(t.invalid);
/// ```
pub fn translate_registry_url(input: &str) -> Translation {
    if input.is_empty() {
        return Translation::default();
    }

    let mut purl = None;
    for (registry, matcher) in MATCHERS {
        if let Some(found) = matcher(input) {
            tracing::debug!(registry, purl = %found, "registry URL matched");
            purl = Some(found);
        }
    }

    if purl.is_none() {
        tracing::debug!(input, "no registry mapping matched");
    }

    Translation {
        invalid: purl.is_none(),
        purl,
    }
}

fn match_npm(input: &str) -> Option<PackageUrl> {
    let rest = input.strip_prefix(NPM_PACKAGE_PREFIX)?;
    let mut segments: Vec<&str> = rest.split('/').collect();

    let mut version = None;
    if segments.len() >= 2 && segments[segments.len() - 2] == "v" {
        version = segments.pop();
        segments.pop();
    }

    let (namespace, name) = match segments.as_slice() {
        [namespace, name, ..] => (Some(*namespace), *name),
        [name] => (None, *name),
        [] => (None, ""),
    };

    construct("npm", namespace, name, version)
}

fn match_nuget(input: &str) -> Option<PackageUrl> {
    let caps = NUGET_PAGE.captures(input)?;
    let name = caps.name("name").map_or("", |m| m.as_str());
    let version = caps.name("version").map(|m| m.as_str());
    construct("nuget", None, name, version)
}

fn match_pypi(input: &str) -> Option<PackageUrl> {
    let caps = PYPI_PAGE.captures(input)?;
    let name = caps.name("name").map_or("", |m| m.as_str());
    let version = caps.name("version").map(|m| m.as_str());
    construct("pypi", None, name, version)
}

/// Build the Package URL for a matched page, swallowing construction errors.
fn construct(
    ty: &str,
    namespace: Option<&str>,
    name: &str,
    version: Option<&str>,
) -> Option<PackageUrl> {
    match PackageUrl::new(ty, namespace, name, version, None, None) {
        Ok(purl) => Some(purl),
        Err(e) => {
            tracing::debug!(ty, error = %e, "registry URL matched but construction failed");
            None
        }
    }
}

/// Render the registry web page for a Package URL.
///
/// Returns `None` for types without a known registry page.
///
/// # Examples
///
/// ```
/// use purl_kit::{registry_url, PackageUrl};
///
/// let purl = PackageUrl::parse("pkg:npm/%40babel/core@7.24.0").unwrap();
/// let url = registry_url(&purl).unwrap();
/// assert_eq!(url.as_str(), "https://www.npmjs.com/package/@babel/core/v/7.24.0");
/// ```
pub fn registry_url(purl: &PackageUrl) -> Option<Url> {
    let (base, version_marker) = match purl.ty() {
        "npm" => (NPM_PACKAGE_PREFIX, Some("v")),
        "nuget" => (NUGET_PACKAGES_BASE, None),
        "pypi" => (PYPI_PROJECT_BASE, None),
        _ => return None,
    };

    let mut url = Url::parse(base).ok()?;
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments.pop_if_empty();
        if purl.ty() == "npm" {
            if let Some(namespace) = purl.namespace() {
                segments.extend(namespace.split('/'));
            }
        }
        segments.push(purl.name());
        if let Some(version) = purl.version() {
            segments.extend(version_marker);
            segments.push(version);
        }
    }
    Some(url)
}
