//! Parsing for `.purlrc` files.
//!
//! The format is a flat `key = value` list: no `[section]` headers, `#` and
//! `;` start comment lines, and values may reference environment variables.

use crate::error::Result;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

/// `${NAME}` or `${NAME?}`, with any run of backslashes in front of it.
static ENV_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<escapes>\\*)\$\{(?P<name>[^${}?]+)(?P<optional>\?)?\}").unwrap()
});

/// Parse `.purlrc` content into key-value pairs.
///
/// Later assignments to the same key win. Lines without `=` and lines with
/// an empty key are ignored.
pub fn parse_rc(content: &str, path: &Path) -> Result<HashMap<String, String>> {
    let mut result = HashMap::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            tracing::trace!(path = %path.display(), line = lineno + 1, "ignoring line without '='");
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        result.insert(key.to_string(), expand_env_vars(value.trim()));
    }

    Ok(result)
}

/// Expand environment variable references in a config value.
///
/// `${NAME}` is replaced by the variable's value and left untouched when the
/// variable is unset; `${NAME?}` becomes empty when unset. Backslashes in
/// front of a reference pair up: each pair yields one literal backslash, and
/// a leftover single backslash suppresses expansion.
pub fn expand_env_vars(value: &str) -> String {
    ENV_REF
        .replace_all(value, |caps: &Captures| {
            let escapes = caps.name("escapes").map_or("", |m| m.as_str());
            let name = &caps["name"];
            let optional = caps.name("optional").is_some();

            let mut out = "\\".repeat(escapes.len() / 2);
            if escapes.len() % 2 == 1 {
                out.push_str(&format!("${{{}{}}}", name, if optional { "?" } else { "" }));
                return out;
            }

            match std::env::var(name) {
                Ok(v) => out.push_str(&v),
                Err(_) if optional => {}
                Err(_) => out.push_str(&format!("${{{}}}", name)),
            }
            out
        })
        .into_owned()
}

/// Parse a config boolean.
///
/// Accepts `true`/`false`, `yes`/`no`, `on`/`off` and `1`/`0`, ignoring
/// case. Anything else is `None`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_rc() {
        let content = r#"
default-type = npm
registry-links=true
"#;
        let result = parse_rc(content, Path::new("test")).unwrap();
        assert_eq!(result.get("default-type"), Some(&"npm".to_string()));
        assert_eq!(result.get("registry-links"), Some(&"true".to_string()));
    }

    #[test]
    fn test_parse_comments_and_junk() {
        let content = r#"
# comment
; another comment
not a pair
 = orphan value
log = debug
"#;
        let result = parse_rc(content, Path::new("test")).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("log"), Some(&"debug".to_string()));
    }

    #[test]
    fn test_parse_value_with_equals() {
        let content = "log = purl_kit=trace,warn";
        let result = parse_rc(content, Path::new("test")).unwrap();
        assert_eq!(result.get("log"), Some(&"purl_kit=trace,warn".to_string()));
    }

    #[test]
    fn test_parse_last_assignment_wins() {
        let content = "default-type = npm\ndefault-type = pypi";
        let result = parse_rc(content, Path::new("test")).unwrap();
        assert_eq!(result.get("default-type"), Some(&"pypi".to_string()));
    }

    #[test]
    fn test_rc_value_from_environment() {
        std::env::set_var("PURLRC_UNIT_DEFAULT_TYPE", "nuget");

        let content = "default-type = ${PURLRC_UNIT_DEFAULT_TYPE}";
        let result = parse_rc(content, Path::new("test")).unwrap();
        assert_eq!(result.get("default-type"), Some(&"nuget".to_string()));

        std::env::remove_var("PURLRC_UNIT_DEFAULT_TYPE");
    }

    #[test]
    fn test_log_filter_built_from_parts() {
        std::env::set_var("PURLRC_UNIT_LEVEL", "trace");

        assert_eq!(
            expand_env_vars("purl_kit=${PURLRC_UNIT_LEVEL},warn"),
            "purl_kit=trace,warn"
        );

        std::env::remove_var("PURLRC_UNIT_LEVEL");
    }

    #[test]
    fn test_unset_reference_in_rc_value() {
        std::env::remove_var("PURLRC_UNIT_UNSET");

        let content = "default-type = ${PURLRC_UNIT_UNSET}\nlog = ${PURLRC_UNIT_UNSET?}";
        let result = parse_rc(content, Path::new("test")).unwrap();
        assert_eq!(
            result.get("default-type"),
            Some(&"${PURLRC_UNIT_UNSET}".to_string())
        );
        assert_eq!(result.get("log"), Some(&String::new()));
    }

    #[test]
    fn test_backslashes_before_reference() {
        std::env::set_var("PURLRC_UNIT_ESCAPED", "debug");

        assert_eq!(
            expand_env_vars(r"\${PURLRC_UNIT_ESCAPED?}"),
            "${PURLRC_UNIT_ESCAPED?}"
        );
        assert_eq!(expand_env_vars(r"\\${PURLRC_UNIT_ESCAPED}"), r"\debug");
        assert_eq!(expand_env_vars(r"\\\${PURLRC_UNIT_ESCAPED}"), r"\${PURLRC_UNIT_ESCAPED}");

        std::env::remove_var("PURLRC_UNIT_ESCAPED");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("On"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool(" no "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }
}
