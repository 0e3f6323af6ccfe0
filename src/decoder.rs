//! Decompose a Package URL string into labelled components.

use crate::error::Error;
use crate::purl::PackageUrl;

/// Result of decoding user input.
#[derive(Debug)]
pub enum Decoded {
    /// Nothing entered yet.
    Empty,
    /// The input is not a valid Package URL.
    Invalid(Error),
    /// The input parsed successfully.
    Valid(PackageUrl),
}

impl Decoded {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Decoded::Invalid(_))
    }

    pub fn purl(&self) -> Option<&PackageUrl> {
        match self {
            Decoded::Valid(purl) => Some(purl),
            _ => None,
        }
    }

    /// Labelled rows for display.
    ///
    /// Type, Namespace and Name are always listed for a valid Package URL
    /// (an absent namespace shows as an empty string); Version, Subpath and
    /// one `Qualifier <key>` row per qualifier appear only when present.
    pub fn components(&self) -> Vec<(String, String)> {
        let Decoded::Valid(purl) = self else {
            return Vec::new();
        };

        let mut rows = vec![
            ("Type".to_string(), purl.ty().to_string()),
            (
                "Namespace".to_string(),
                purl.namespace().unwrap_or_default().to_string(),
            ),
            ("Name".to_string(), purl.name().to_string()),
        ];
        if let Some(version) = purl.version() {
            rows.push(("Version".to_string(), version.to_string()));
        }
        if let Some(subpath) = purl.subpath() {
            rows.push(("Subpath".to_string(), subpath.to_string()));
        }
        if let Some(qualifiers) = purl.qualifiers() {
            for (key, value) in qualifiers {
                rows.push((format!("Qualifier {}", key), value.clone()));
            }
        }
        rows
    }
}

/// Decode a candidate Package URL.
///
/// Empty input is neither valid nor invalid.
///
/// # Examples
///
/// ```
/// use purl_kit::{decode, Decoded};
///
/// assert!(matches!(decode(""), Decoded::Empty));
/// assert!(decode("not a purl").is_invalid());
/// assert_eq!(decode("pkg:npm/lodash@4.17.21").purl().unwrap().name(), "lodash");
/// ```
pub fn decode(input: &str) -> Decoded {
    if input.is_empty() {
        return Decoded::Empty;
    }

    match PackageUrl::parse(input) {
        Ok(purl) => Decoded::Valid(purl),
        Err(e) => {
            tracing::debug!(error = %e, "failed to decode Package URL");
            Decoded::Invalid(e)
        }
    }
}
