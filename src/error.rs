// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Error types for the uplift procedure

use std::path::PathBuf;

use thiserror::Error;

/// Problems with the shape of the dependency manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest is not valid JSON: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("manifest top level must be a JSON object")]
    NotAnObject,

    #[error("platform '{0}' not found in manifest")]
    MissingPlatform(String),

    #[error("platform '{platform}' has no '{dependency}' entry")]
    MissingDependency {
        platform: String,
        dependency: &'static str,
    },

    #[error("platform '{platform}' is malformed: {source}")]
    MalformedPlatform {
        platform: String,
        source: serde_json::Error,
    },
}

/// Everything that can abort an uplift run
#[derive(Debug, Error)]
pub enum UpliftError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] attohttpc::Error),

    #[error("unexpected API response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no {what} returned by {url}")]
    EmptyList { what: &'static str, url: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("no intel-igc-core version found in compute-runtime {tag} checksums")]
    IgcVersionNotFound { tag: String },
}

pub type Result<T, E = UpliftError> = std::result::Result<T, E>;
