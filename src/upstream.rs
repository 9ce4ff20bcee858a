// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Upstream projects tracked in the dependency manifest
//!
//! Each upstream is a GitHub repository whose releases (or CI builds) feed
//! one or more manifest entries. This module knows their repository slugs
//! and how their release page URLs are built.

/// Default GitHub REST API endpoint
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Base URL for GitHub web pages (release tags live below it)
pub const GITHUB_WEB_BASE: &str = "https://github.com";

/// Workflow in intel-graphics-compiler producing the nightly IGC builds
pub const IGC_DEV_WORKFLOW: &str = "build-IGC";

/// Name prefix of the Ubuntu build artifact uploaded by [`IGC_DEV_WORKFLOW`]
pub const IGC_DEV_ARTIFACT_PREFIX: &str = "IGC_Ubuntu22.04_llvm14_clang-";

/// Suffix of the compute-runtime release asset listing package checksums
pub const CHECKSUM_ASSET_SUFFIX: &str = ".sum";

/// A GitHub-hosted upstream project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upstream {
    /// Repository in "owner/repo" form
    pub repo: &'static str,
}

impl Upstream {
    /// Intel compute runtime (NEO)
    pub const COMPUTE_RUNTIME: Upstream = Upstream {
        repo: "intel/compute-runtime",
    };

    /// Intel Graphics Compiler, used for both release and dev entries
    pub const IGC: Upstream = Upstream {
        repo: "intel/intel-graphics-compiler",
    };

    /// C for Metal compiler
    pub const CM_COMPILER: Upstream = Upstream {
        repo: "intel/cm-compiler",
    };

    /// oneAPI Level Zero loader
    pub const LEVEL_ZERO: Upstream = Upstream {
        repo: "oneapi-src/level-zero",
    };

    /// Build the web URL of the release page for `tag`
    ///
    /// # Examples
    /// ```
    /// use igfx_uplift::Upstream;
    /// assert_eq!(
    ///     Upstream::CM_COMPILER.release_url("cmclang-1.0.144"),
    ///     "https://github.com/intel/cm-compiler/releases/tag/cmclang-1.0.144"
    /// );
    /// ```
    #[must_use]
    pub fn release_url(&self, tag: &str) -> String {
        format!("{GITHUB_WEB_BASE}/{}/releases/tag/{tag}", self.repo)
    }

    /// API URL listing the repository's releases, newest first
    #[must_use]
    pub fn releases_api_url(&self, api_base: &str) -> String {
        format!("{}/repos/{}/releases", api_base.trim_end_matches('/'), self.repo)
    }

    /// API URL listing successful runs of `workflow` (the `.yml` file stem)
    #[must_use]
    pub fn successful_runs_api_url(&self, api_base: &str, workflow: &str) -> String {
        format!(
            "{}/repos/{}/actions/workflows/{workflow}.yml/runs?status=success",
            api_base.trim_end_matches('/'),
            self.repo
        )
    }

    /// API URL listing build artifacts called `name`
    #[must_use]
    pub fn artifacts_api_url(&self, api_base: &str, name: &str) -> String {
        format!(
            "{}/repos/{}/actions/artifacts?name={name}",
            api_base.trim_end_matches('/'),
            self.repo
        )
    }
}
