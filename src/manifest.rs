// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Dependency manifest storage
//!
//! The manifest is a JSON object keyed by platform. Only the section of the
//! platform being uplifted is decoded into typed records; everything else is
//! carried through untouched, in its original key order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ManifestError, Result, UpliftError};

/// Manifest keys of the dependencies managed by the uplift
pub const MANAGED_DEPENDENCIES: [&str; 5] = ["compute_runtime", "igc", "igc_dev", "cm", "level_zero"];

/// A managed string field: absent (`None`), explicit `null` (`Some(None)`)
/// or set (`Some(Some(_))`)
pub type Field = Option<Option<String>>;

/// Distinguish an explicit `null` from a missing key
fn present<'de, D>(deserializer: D) -> std::result::Result<Field, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// One dependency entry of a platform section
///
/// Fields not managed here (such as `root`) are kept in `extra`. Managed
/// fields are written back exactly as they were read unless they are set.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Dependency {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub github_tag: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub version: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub updated_at: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub url: Field,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dependency {
    #[must_use]
    pub fn github_tag(&self) -> Option<&str> {
        self.github_tag.as_ref()?.as_deref()
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_ref()?.as_deref()
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_ref()?.as_deref()
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_ref()?.as_deref()
    }

    pub fn set_github_tag(&mut self, tag: impl Into<String>) {
        self.github_tag = Some(Some(tag.into()));
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = Some(Some(version.into()));
    }

    pub fn set_updated_at(&mut self, updated_at: impl Into<String>) {
        self.updated_at = Some(Some(updated_at.into()));
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(Some(url.into()));
    }
}

/// Typed view of one platform section
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlatformDeps {
    pub compute_runtime: Dependency,
    pub igc: Dependency,
    pub igc_dev: Dependency,
    pub cm: Dependency,
    pub level_zero: Dependency,
    /// Other dependencies of the platform (tbb, oclcpu, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The whole manifest document
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    platforms: Map<String, Value>,
}

impl Manifest {
    /// Parse a manifest from JSON text
    ///
    /// # Errors
    /// Returns error if the text is not JSON or its top level is not an object
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        let document: Value = serde_json::from_str(text)?;
        match document {
            Value::Object(platforms) => Ok(Self { platforms }),
            _ => Err(ManifestError::NotAnObject),
        }
    }

    /// Read and parse the manifest at `path`
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not a valid manifest
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| UpliftError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&text)?)
    }

    /// Platform identifiers present in the manifest, in file order
    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.platforms.keys().map(String::as_str)
    }

    /// Decode the section of `platform`
    ///
    /// # Errors
    /// Returns error if the platform is absent, lacks one of the managed
    /// dependencies, or any of them is not an object of string fields
    pub fn platform(&self, platform: &str) -> Result<PlatformDeps, ManifestError> {
        let section = self
            .platforms
            .get(platform)
            .ok_or_else(|| ManifestError::MissingPlatform(platform.to_string()))?;

        if let Value::Object(entries) = section
            && let Some(dependency) = MANAGED_DEPENDENCIES
                .into_iter()
                .find(|key| !entries.contains_key(*key))
        {
            return Err(ManifestError::MissingDependency {
                platform: platform.to_string(),
                dependency,
            });
        }

        PlatformDeps::deserialize(section).map_err(|source| ManifestError::MalformedPlatform {
            platform: platform.to_string(),
            source,
        })
    }

    /// Replace the section of `platform`, keeping its position in the file
    ///
    /// # Errors
    /// Returns error if the platform is absent
    pub fn set_platform(&mut self, platform: &str, deps: &PlatformDeps) -> Result<(), ManifestError> {
        let section = self
            .platforms
            .get_mut(platform)
            .ok_or_else(|| ManifestError::MissingPlatform(platform.to_string()))?;
        *section = serde_json::to_value(deps)?;
        Ok(())
    }

    /// Render the manifest with two-space indentation and a trailing newline
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String, ManifestError> {
        let mut text = serde_json::to_string_pretty(&self.platforms)?;
        text.push('\n');
        Ok(text)
    }

    /// Overwrite the file at `path` with the rendered manifest
    ///
    /// # Errors
    /// Returns error if serialization or the write fails
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.to_json()?;
        fs::write(path, text).map_err(|source| UpliftError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
