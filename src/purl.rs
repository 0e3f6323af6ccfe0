//! The Package URL value type, its parser and its canonical serializer.
//!
//! A Package URL has the shape
//!
//! ```text
//! pkg:type/namespace/name@version?qualifiers#subpath
//! ```
//!
//! where only `type` and `name` are required.

use crate::encoding::{decode, encode_qualifier_value, encode_segment};
use crate::error::{Error, Result};
use crate::qualifiers::{validate_key, Qualifiers};
use std::fmt;
use std::str::FromStr;

/// The only scheme a Package URL may use.
pub const SCHEME: &str = "pkg";

/// An immutable, validated Package URL.
///
/// # Examples
///
/// ```
/// use purl_kit::PackageUrl;
///
/// let purl = PackageUrl::new("npm", Some("@babel"), "core", Some("7.24.0"), None, None)?;
/// assert_eq!(purl.to_string(), "pkg:npm/%40babel/core@7.24.0");
///
/// let parsed: PackageUrl = "pkg:pypi/requests@2.31.0".parse()?;
/// assert_eq!(parsed.name(), "requests");
/// # Ok::<(), purl_kit::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUrl {
    ty: String,
    namespace: Option<String>,
    name: String,
    version: Option<String>,
    qualifiers: Option<Qualifiers>,
    subpath: Option<String>,
}

impl PackageUrl {
    /// Construct a Package URL from its components.
    ///
    /// Empty optional strings and an empty qualifier map are treated as
    /// absent. Fails with [`Error::Construction`] when `type` or `name` is
    /// missing, the type contains invalid characters, or a qualifier key is
    /// malformed.
    pub fn new(
        ty: &str,
        namespace: Option<&str>,
        name: &str,
        version: Option<&str>,
        qualifiers: Option<Qualifiers>,
        subpath: Option<&str>,
    ) -> Result<Self> {
        let ty = normalize_type(ty)?;
        if name.is_empty() {
            return Err(Error::construction("name", "a name is required"));
        }

        let mut namespace = namespace.and_then(|ns| join_segments(ns.split('/')));
        let mut name = name.to_string();
        let version = version.filter(|v| !v.is_empty()).map(str::to_string);
        let qualifiers = match qualifiers {
            Some(q) => Some(q.normalized()?).filter(|q| !q.is_empty()),
            None => None,
        };
        let subpath = subpath.and_then(normalize_subpath);

        match ty.as_str() {
            "pypi" => {
                name = name.to_lowercase().replace('_', "-");
            }
            "github" | "bitbucket" | "gitlab" => {
                name = name.to_lowercase();
                namespace = namespace.map(|ns| ns.to_lowercase());
            }
            _ => {}
        }

        Ok(PackageUrl {
            ty,
            namespace,
            name,
            version,
            qualifiers,
            subpath,
        })
    }

    /// Parse a canonical Package URL string.
    ///
    /// Any failure, including component rules violated by an otherwise
    /// well-formed string, is reported as [`Error::Parse`].
    pub fn parse(input: &str) -> Result<Self> {
        let (rest, subpath) = match input.rsplit_once('#') {
            Some((rest, subpath)) => (rest, Some(decode_path(input, subpath)?)),
            None => (input, None),
        };

        let (rest, qualifiers) = match rest.rsplit_once('?') {
            Some((rest, query)) => (rest, parse_qualifiers(input, query)?),
            None => (rest, None),
        };

        let (scheme, rest) = rest
            .split_once(':')
            .ok_or_else(|| Error::parse(input, "missing 'pkg:' scheme"))?;
        if !scheme.eq_ignore_ascii_case(SCHEME) {
            return Err(Error::parse(
                input,
                format!("scheme must be '{}', found '{}'", SCHEME, scheme),
            ));
        }

        let rest = rest.trim_start_matches('/');
        let (ty, rest) = rest
            .split_once('/')
            .ok_or_else(|| Error::parse(input, "missing name"))?;

        let rest = rest.trim_end_matches('/');
        // A raw '@' before the last '/' belongs to the namespace (npm scopes
        // are often written unencoded), not to the version.
        let (rest, version) = match rest.rsplit_once('@') {
            Some((head, version)) if !version.contains('/') && !head.is_empty() => {
                (head, Some(decode_component(input, "version", version)?))
            }
            _ => (rest, None),
        };

        let (namespace, name) = match rest.rsplit_once('/') {
            Some((namespace, name)) => (Some(decode_path(input, namespace)?), name),
            None => (None, rest),
        };
        let name = decode_component(input, "name", name)?;
        if name.is_empty() {
            return Err(Error::parse(input, "missing name"));
        }

        PackageUrl::new(
            ty,
            namespace.as_deref(),
            &name,
            version.as_deref(),
            qualifiers,
            subpath.as_deref(),
        )
        .map_err(|e| Error::parse(input, e.to_string()))
    }

    /// The package type, e.g. `npm`, `nuget` or `pypi`. Always lowercase.
    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Qualifiers, or `None` when there are none.
    pub fn qualifiers(&self) -> Option<&Qualifiers> {
        self.qualifiers.as_ref()
    }

    pub fn subpath(&self) -> Option<&str> {
        self.subpath.as_deref()
    }
}

impl fmt::Display for PackageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/", SCHEME, self.ty)?;

        if let Some(namespace) = &self.namespace {
            for segment in namespace.split('/') {
                write!(f, "{}/", encode_segment(segment))?;
            }
        }

        f.write_str(&encode_segment(&self.name))?;

        if let Some(version) = &self.version {
            write!(f, "@{}", encode_segment(version))?;
        }

        if let Some(qualifiers) = &self.qualifiers {
            let mut sep = '?';
            for (key, value) in qualifiers {
                write!(f, "{}{}={}", sep, key, encode_qualifier_value(value))?;
                sep = '&';
            }
        }

        if let Some(subpath) = &self.subpath {
            let encoded: Vec<String> = subpath.split('/').map(encode_segment).collect();
            write!(f, "#{}", encoded.join("/"))?;
        }

        Ok(())
    }
}

impl FromStr for PackageUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PackageUrl::parse(s)
    }
}

/// Lowercase and validate a package type.
fn normalize_type(ty: &str) -> Result<String> {
    let Some(first) = ty.chars().next() else {
        return Err(Error::construction("type", "a type is required"));
    };
    if !first.is_ascii_alphabetic() {
        return Err(Error::construction(
            "type",
            format!("'{}' must start with a letter", ty),
        ));
    }
    if let Some(bad) = ty
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-')))
    {
        return Err(Error::construction(
            "type",
            format!("'{}' contains invalid character '{}'", ty, bad),
        ));
    }
    Ok(ty.to_ascii_lowercase())
}

/// Join non-empty segments with `/`, or `None` if nothing remains.
fn join_segments<'a>(segments: impl Iterator<Item = &'a str>) -> Option<String> {
    let kept: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join("/"))
    }
}

fn normalize_subpath(subpath: &str) -> Option<String> {
    join_segments(subpath.split('/').filter(|s| *s != "." && *s != ".."))
}

fn decode_component(input: &str, field: &str, raw: &str) -> Result<String> {
    decode(raw).ok_or_else(|| Error::parse(input, format!("malformed percent-encoding in {}", field)))
}

/// Decode each `/`-separated segment of a namespace or subpath.
fn decode_path(input: &str, raw: &str) -> Result<String> {
    let segments = raw
        .split('/')
        .map(|s| decode_component(input, "path segment", s))
        .collect::<Result<Vec<_>>>()?;
    Ok(segments.join("/"))
}

fn parse_qualifiers(input: &str, query: &str) -> Result<Option<Qualifiers>> {
    let mut qualifiers = Qualifiers::new();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::parse(input, format!("qualifier '{}' has no value", pair)))?;
        let key = key.to_ascii_lowercase();
        validate_key(&key).map_err(|e| Error::parse(input, e.to_string()))?;
        let value = decode_component(input, "qualifier value", value)?;
        if value.is_empty() {
            continue;
        }
        if qualifiers.insert(key.clone(), value).is_some() {
            return Err(Error::parse(
                input,
                format!("duplicate qualifier key '{}'", key),
            ));
        }
    }

    Ok(Some(qualifiers).filter(|q| !q.is_empty()))
}
