// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Minimal read-only GitHub REST API client
//!
//! Only the handful of endpoints the uplift needs are covered: release
//! listings, successful workflow runs, artifact lookup by name and plain
//! asset downloads. Every call is a single blocking GET.

use attohttpc::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, UpliftError};
use crate::upstream::Upstream;

/// GitHub release metadata
#[derive(Deserialize, Debug, Clone)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// GitHub release asset
#[derive(Deserialize, Debug, Clone)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

/// One execution of a GitHub Actions workflow
#[derive(Deserialize, Debug, Clone)]
pub struct WorkflowRun {
    pub head_sha: String,
    /// Kept verbatim as returned by the API
    pub updated_at: String,
}

/// Build artifact uploaded by a workflow run
#[derive(Deserialize, Debug, Clone)]
pub struct Artifact {
    pub name: String,
    pub archive_download_url: String,
}

#[derive(Deserialize)]
struct WorkflowRuns {
    workflow_runs: Vec<WorkflowRun>,
}

#[derive(Deserialize)]
struct Artifacts {
    artifacts: Vec<Artifact>,
}

/// Source of HTTP response bodies
///
/// Implemented by [`HttpTransport`] for real requests; tests substitute a
/// canned implementation.
pub trait Transport {
    /// GET `url` and return the body as text, failing on non-2xx status
    ///
    /// # Errors
    /// Returns error if the request fails or the server answers with an error status
    fn get(&self, url: &str) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<String> {
        (**self).get(url)
    }
}

/// Blocking HTTP transport backed by attohttpc
#[derive(Debug, Clone)]
pub struct HttpTransport {
    user_agent: String,
}

impl HttpTransport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            user_agent: format!("igfx-uplift/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String> {
        debug!("GET {url}");
        let body = attohttpc::get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, "application/vnd.github+json")
            .send()?
            .error_for_status()?
            .text()?;
        Ok(body)
    }
}

/// GitHub API client generic over its transport
pub struct GithubClient<T = HttpTransport> {
    transport: T,
    api_base: String,
}

impl<T: Transport> GithubClient<T> {
    /// Client using `transport` against the API rooted at `api_base`
    pub fn with_transport(transport: T, api_base: impl Into<String>) -> Self {
        Self {
            transport,
            api_base: api_base.into(),
        }
    }

    fn get_json<D: DeserializeOwned>(&self, url: &str) -> Result<D> {
        let body = self.transport.get(url)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Latest release of `upstream`
    ///
    /// The API lists releases newest first; the first entry is taken as is.
    ///
    /// # Errors
    /// Returns error if the request fails, the body is not a release list, or the list is empty
    pub fn latest_release(&self, upstream: Upstream) -> Result<Release> {
        let url = upstream.releases_api_url(&self.api_base);
        let releases: Vec<Release> = self.get_json(&url)?;
        releases
            .into_iter()
            .next()
            .ok_or(UpliftError::EmptyList {
                what: "releases",
                url,
            })
    }

    /// Most recent successful run of `workflow` in `upstream`
    ///
    /// # Errors
    /// Returns error if the request fails, the body is malformed, or no run succeeded
    pub fn latest_successful_run(&self, upstream: Upstream, workflow: &str) -> Result<WorkflowRun> {
        let url = upstream.successful_runs_api_url(&self.api_base, workflow);
        let runs: WorkflowRuns = self.get_json(&url)?;
        runs.workflow_runs
            .into_iter()
            .next()
            .ok_or(UpliftError::EmptyList {
                what: "successful workflow runs",
                url,
            })
    }

    /// Archive download URL of the first artifact called `name`
    ///
    /// The API filters by name already; entries with another name are skipped.
    ///
    /// # Errors
    /// Returns error if the request fails, the body is malformed, or no artifact matches
    pub fn artifact_download_url(&self, upstream: Upstream, name: &str) -> Result<String> {
        let url = upstream.artifacts_api_url(&self.api_base, name);
        let artifacts: Artifacts = self.get_json(&url)?;
        artifacts
            .artifacts
            .into_iter()
            .find(|artifact| artifact.name == name)
            .map(|artifact| artifact.archive_download_url)
            .ok_or(UpliftError::EmptyList {
                what: "artifacts",
                url,
            })
    }

    /// Download a release asset as text
    ///
    /// # Errors
    /// Returns error if the download fails
    pub fn download_text(&self, url: &str) -> Result<String> {
        self.transport.get(url)
    }
}
