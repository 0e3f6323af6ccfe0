//! Assemble a Package URL from individually edited fields.

use crate::error::{Error, Result};
use crate::purl::PackageUrl;
use crate::qualifiers::Qualifiers;

/// Field-by-field Package URL builder.
///
/// Every field may be edited independently and in any order; the Package
/// URL is recomputed from scratch by [`ManualBuilder::build`]. Qualifiers
/// are added through a small key/value form (`set_qualifier_key`,
/// `set_qualifier_value`, then [`ManualBuilder::add_qualifier`]).
///
/// # Examples
///
/// ```
/// use purl_kit::ManualBuilder;
///
/// let mut builder = ManualBuilder::new();
/// builder.set_type("npm").set_name("lodash").set_version("4.17.21");
/// builder.set_qualifier_key("arch").set_qualifier_value("x64");
/// builder.add_qualifier()?;
///
/// let purl = builder.build()?.unwrap();
/// assert_eq!(purl.to_string(), "pkg:npm/lodash@4.17.21?arch=x64");
/// # Ok::<(), purl_kit::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualBuilder {
    ty: String,
    namespace: String,
    name: String,
    version: String,
    subpath: String,
    qualifiers: Qualifiers,
    qualifier_key: String,
    qualifier_value: String,
}

impl ManualBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_type(&mut self, value: impl Into<String>) -> &mut Self {
        self.ty = value.into();
        self
    }

    pub fn set_namespace(&mut self, value: impl Into<String>) -> &mut Self {
        self.namespace = value.into();
        self
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.name = value.into();
        self
    }

    pub fn set_version(&mut self, value: impl Into<String>) -> &mut Self {
        self.version = value.into();
        self
    }

    pub fn set_subpath(&mut self, value: impl Into<String>) -> &mut Self {
        self.subpath = value.into();
        self
    }

    /// Set the key input of the add-qualifier form.
    pub fn set_qualifier_key(&mut self, value: impl Into<String>) -> &mut Self {
        self.qualifier_key = value.into();
        self
    }

    /// Set the value input of the add-qualifier form.
    pub fn set_qualifier_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.qualifier_value = value.into();
        self
    }

    pub fn qualifier_key(&self) -> &str {
        &self.qualifier_key
    }

    pub fn qualifier_value(&self) -> &str {
        &self.qualifier_value
    }

    pub fn qualifiers(&self) -> &Qualifiers {
        &self.qualifiers
    }

    /// Commit the add-qualifier form.
    ///
    /// Both inputs must be non-empty; otherwise nothing changes and
    /// [`Error::IncompleteQualifier`] names the missing input(s). On success
    /// the pair is inserted (overwriting an existing key) and both inputs
    /// are cleared.
    pub fn add_qualifier(&mut self) -> Result<()> {
        let key_missing = self.qualifier_key.is_empty();
        let value_missing = self.qualifier_value.is_empty();
        if key_missing || value_missing {
            return Err(Error::IncompleteQualifier {
                key_missing,
                value_missing,
            });
        }

        let key = std::mem::take(&mut self.qualifier_key);
        let value = std::mem::take(&mut self.qualifier_value);
        self.qualifiers = self.qualifiers.with(key, value);
        Ok(())
    }

    /// Remove a qualifier; unknown keys are ignored.
    pub fn remove_qualifier(&mut self, key: &str) {
        if self.qualifiers.contains_key(key) {
            self.qualifiers = self.qualifiers.without(key);
        }
    }

    /// True when exactly one of type and name has been filled in.
    pub fn missing_required_fields(&self) -> bool {
        self.ty.is_empty() != self.name.is_empty()
    }

    /// Build the Package URL.
    ///
    /// Returns `Ok(None)` until both type and name are filled in, and
    /// [`Error::Construction`] when a filled-in field is malformed.
    pub fn build(&self) -> Result<Option<PackageUrl>> {
        if self.ty.is_empty() || self.name.is_empty() {
            return Ok(None);
        }

        PackageUrl::new(
            &self.ty,
            Some(self.namespace.as_str()),
            &self.name,
            Some(self.version.as_str()),
            Some(self.qualifiers.clone()),
            Some(self.subpath.as_str()),
        )
        .map(Some)
    }

    /// The current Package URL, or `None` if the fields are incomplete or
    /// invalid.
    pub fn purl(&self) -> Option<PackageUrl> {
        self.build().ok().flatten()
    }
}
