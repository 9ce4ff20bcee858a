// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Intel GPU driver dependency uplift library
//!
//! This library refreshes the driver components recorded in a JSON dependency
//! manifest (compute runtime, IGC, IGC dev builds, CM compiler and the Level
//! Zero loader) from their GitHub releases and CI builds.

pub mod error;
pub mod github;
pub mod manifest;
pub mod uplift;
pub mod upstream;
pub mod version;

// Re-export commonly used items at the crate root for convenience
pub use error::{ManifestError, Result, UpliftError};
pub use github::{GithubClient, HttpTransport, Transport};
pub use manifest::{Dependency, Manifest, PlatformDeps};
pub use uplift::{ChecksumPolicy, UpliftConfig, run, uplift_platform};
pub use upstream::Upstream;
