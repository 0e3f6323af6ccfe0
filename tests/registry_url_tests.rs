//! Registry page URL to Package URL translation tests.

use purl_kit::{registry_url, translate_registry_url, PackageUrl};

/// Assert that `input` translates to the canonical Package URL `expected`.
fn assert_translates(input: &str, expected: &str) {
    let translation = translate_registry_url(input);
    assert!(!translation.invalid, "{} should be supported", input);
    assert_eq!(
        translation.purl.map(|p| p.to_string()).as_deref(),
        Some(expected),
        "translate({}) should be {}",
        input,
        expected
    );
}

fn assert_unsupported(input: &str) {
    let translation = translate_registry_url(input);
    assert!(translation.invalid, "{} should be unsupported", input);
    assert_eq!(translation.purl, None);
}

// =============================================================================
// npm
// =============================================================================

#[test]
fn test_npm_name_only() {
    let purl = translate_registry_url("https://www.npmjs.com/package/express")
        .purl
        .unwrap();
    assert_eq!(purl.ty(), "npm");
    assert_eq!(purl.namespace(), None);
    assert_eq!(purl.name(), "express");
    assert_eq!(purl.version(), None);
}

#[test]
fn test_npm_scoped() {
    let purl = translate_registry_url("https://www.npmjs.com/package/@angular/core")
        .purl
        .unwrap();
    assert_eq!(purl.namespace(), Some("@angular"));
    assert_eq!(purl.name(), "core");
    assert_eq!(purl.version(), None);
}

#[test]
fn test_npm_scoped_with_version() {
    assert_translates(
        "https://www.npmjs.com/package/@angular/core/v/17.3.0",
        "pkg:npm/%40angular/core@17.3.0",
    );
}

#[test]
fn test_npm_unscoped_with_version() {
    assert_translates(
        "https://www.npmjs.com/package/lodash/v/4.17.21",
        "pkg:npm/lodash@4.17.21",
    );
}

#[test]
fn test_npm_package_named_v() {
    // Only the second-to-last segment is the version marker.
    assert_translates("https://www.npmjs.com/package/v", "pkg:npm/v");
    assert_translates("https://www.npmjs.com/package/v/v/1.0.0", "pkg:npm/v@1.0.0");
}

#[test]
fn test_npm_extra_segments_are_ignored() {
    assert_translates(
        "https://www.npmjs.com/package/@scope/pkg/extra",
        "pkg:npm/%40scope/pkg",
    );
}

#[test]
fn test_npm_prefix_only_is_unsupported() {
    assert_unsupported("https://www.npmjs.com/package/");
}

#[test]
fn test_npm_requires_exact_prefix() {
    assert_unsupported("http://www.npmjs.com/package/lodash");
    assert_unsupported("https://npmjs.com/package/lodash");
}

// =============================================================================
// NuGet
// =============================================================================

#[test]
fn test_nuget_with_version() {
    let purl = translate_registry_url("https://www.nuget.org/packages/lodash/4.17.21")
        .purl
        .unwrap();
    assert_eq!(purl.ty(), "nuget");
    assert_eq!(purl.namespace(), None);
    assert_eq!(purl.name(), "lodash");
    assert_eq!(purl.version(), Some("4.17.21"));
}

#[test]
fn test_nuget_without_version() {
    assert_translates(
        "https://www.nuget.org/packages/Newtonsoft.Json",
        "pkg:nuget/Newtonsoft.Json",
    );
    assert_translates(
        "https://www.nuget.org/packages/Newtonsoft.Json/",
        "pkg:nuget/Newtonsoft.Json",
    );
}

#[test]
fn test_nuget_anchored_at_end() {
    assert_unsupported("https://www.nuget.org/packages/Serilog/3.1.1/extra");
    assert_unsupported("https://www.nuget.org/packages/");
}

// =============================================================================
// PyPI
// =============================================================================

#[test]
fn test_pypi_with_version() {
    let purl = translate_registry_url("https://pypi.org/project/requests/2.31.0")
        .purl
        .unwrap();
    assert_eq!(purl.ty(), "pypi");
    assert_eq!(purl.name(), "requests");
    assert_eq!(purl.version(), Some("2.31.0"));
}

#[test]
fn test_pypi_with_version_and_trailing_slash() {
    assert_translates(
        "https://pypi.org/project/requests/2.31.0/",
        "pkg:pypi/requests@2.31.0",
    );
}

#[test]
fn test_pypi_history_anchor_is_not_a_version() {
    assert_translates(
        "https://pypi.org/project/requests/#history",
        "pkg:pypi/requests",
    );
}

#[test]
fn test_pypi_without_version() {
    assert_translates("https://pypi.org/project/requests", "pkg:pypi/requests");
    assert_translates("https://pypi.org/project/requests/", "pkg:pypi/requests");
}

#[test]
fn test_pypi_anchored_at_end() {
    assert_unsupported("https://pypi.org/project/requests/2.31.0/files");
}

// =============================================================================
// Unsupported and empty input
// =============================================================================

#[test]
fn test_unrecognized_urls() {
    for input in [
        "lodash",
        "https://crates.io/crates/serde",
        "https://rubygems.org/gems/rails",
        "https://github.com/lodash/lodash",
        " https://www.npmjs.com/package/lodash",
    ] {
        assert_unsupported(input);
    }
}

#[test]
fn test_empty_input_is_neither_valid_nor_invalid() {
    let translation = translate_registry_url("");
    assert_eq!(translation.purl, None);
    assert!(!translation.invalid);
}

// =============================================================================
// Reverse mapping
// =============================================================================

#[test]
fn test_registry_url_reverses_translation() {
    for input in [
        "https://www.npmjs.com/package/@angular/core/v/17.3.0",
        "https://www.npmjs.com/package/lodash",
        "https://www.nuget.org/packages/Serilog/3.1.1",
        "https://pypi.org/project/requests/2.31.0",
    ] {
        let purl = translate_registry_url(input).purl.unwrap();
        let url = registry_url(&purl).unwrap();
        assert_eq!(url.as_str(), input);
    }
}

#[test]
fn test_registry_url_unsupported_type() {
    let purl = PackageUrl::parse("pkg:maven/org.apache/commons-io@2.15.0").unwrap();
    assert!(registry_url(&purl).is_none());
}
