// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! The driver uplift procedure
//!
//! Loads the manifest, refreshes the five managed dependencies of one
//! platform from GitHub, and writes the manifest back. Requests are issued
//! one after another; the file is only rewritten once every step succeeded.

use std::path::PathBuf;

use chrono::DateTime;
use tracing::{debug, info, warn};

use crate::error::{Result, UpliftError};
use crate::github::{GithubClient, Release, Transport};
use crate::manifest::{Dependency, Manifest, PlatformDeps};
use crate::upstream::{CHECKSUM_ASSET_SUFFIX, IGC_DEV_WORKFLOW, Upstream};
use crate::version::{
    cm_version, extract_igc_core_version, igc_dev_artifact_name, igc_dev_tag, igc_tag, short_sha,
};

/// What to do when no IGC version can be found in the compute-runtime checksums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumPolicy {
    /// Leave the `igc` entry untouched and carry on
    #[default]
    Lenient,
    /// Abort the run
    Strict,
}

/// Inputs of one uplift run
#[derive(Debug, Clone)]
pub struct UpliftConfig {
    /// Manifest file to rewrite
    pub manifest_path: PathBuf,
    /// Platform section to update
    pub platform: String,
    pub policy: ChecksumPolicy,
}

/// Run the whole uplift and return the new compute-runtime version
///
/// The platform section is validated before any request is made. On error
/// the manifest file is left as it was.
///
/// # Errors
/// Returns error if the manifest cannot be read, decoded or written, or any
/// GitHub request fails
pub fn run<T: Transport>(config: &UpliftConfig, client: &GithubClient<T>) -> Result<String> {
    debug!("Loading manifest {}", config.manifest_path.display());
    let mut manifest = Manifest::load(&config.manifest_path)?;
    let mut deps = manifest.platform(&config.platform)?;

    uplift_platform(client, &mut deps, config.policy)?;

    manifest.set_platform(&config.platform, &deps)?;
    manifest.save(&config.manifest_path)?;
    info!("Updated {}", config.manifest_path.display());

    Ok(deps.compute_runtime.version().unwrap_or_default().to_string())
}

/// Refresh every managed dependency of a platform section in place
///
/// # Errors
/// Returns error on the first failed request; earlier updates remain applied
/// to `deps`
pub fn uplift_platform<T: Transport>(
    client: &GithubClient<T>,
    deps: &mut PlatformDeps,
    policy: ChecksumPolicy,
) -> Result<()> {
    let compute_runtime = client.latest_release(Upstream::COMPUTE_RUNTIME)?;
    apply_compute_runtime(&mut deps.compute_runtime, &compute_runtime.tag_name);
    info!("compute-runtime: {}", compute_runtime.tag_name);

    uplift_igc(client, &compute_runtime, &mut deps.igc, policy)?;
    uplift_igc_dev(client, &mut deps.igc_dev)?;

    let cm = client.latest_release(Upstream::CM_COMPILER)?;
    apply_cm(&mut deps.cm, &cm.tag_name);
    info!("cm-compiler: {}", cm.tag_name);

    let level_zero = client.latest_release(Upstream::LEVEL_ZERO)?;
    apply_level_zero(&mut deps.level_zero, &level_zero.tag_name);
    info!("level-zero: {}", level_zero.tag_name);

    Ok(())
}

/// Set the `igc` entry from the checksum listing of a compute-runtime release
///
/// Checksum assets are tried in release order until one names an
/// `intel-igc-core` package.
///
/// # Errors
/// Returns error if a download fails, or under [`ChecksumPolicy::Strict`]
/// when no listing names the package
pub fn uplift_igc<T: Transport>(
    client: &GithubClient<T>,
    compute_runtime: &Release,
    igc: &mut Dependency,
    policy: ChecksumPolicy,
) -> Result<()> {
    let sums = compute_runtime
        .assets
        .iter()
        .filter(|asset| asset.name.ends_with(CHECKSUM_ASSET_SUFFIX));

    for asset in sums {
        debug!("Scanning {} for the IGC version", asset.name);
        let listing = client.download_text(&asset.browser_download_url)?;
        if let Some(version) = extract_igc_core_version(&listing) {
            apply_igc(igc, version);
            info!("igc: {version}");
            return Ok(());
        }
    }

    match policy {
        ChecksumPolicy::Lenient => {
            warn!(
                "No IGC version found in compute-runtime {} checksums, igc left unchanged",
                compute_runtime.tag_name
            );
            Ok(())
        }
        ChecksumPolicy::Strict => Err(UpliftError::IgcVersionNotFound {
            tag: compute_runtime.tag_name.clone(),
        }),
    }
}

/// Set the `igc_dev` entry from the latest successful IGC build
///
/// # Errors
/// Returns error if the run or its artifact cannot be looked up
pub fn uplift_igc_dev<T: Transport>(client: &GithubClient<T>, igc_dev: &mut Dependency) -> Result<()> {
    let run = client.latest_successful_run(Upstream::IGC, IGC_DEV_WORKFLOW)?;
    let short = short_sha(&run.head_sha);

    if DateTime::parse_from_rfc3339(&run.updated_at).is_err() {
        warn!("IGC run {short} has an unexpected timestamp: {}", run.updated_at);
    }

    igc_dev.set_github_tag(igc_dev_tag(short));
    igc_dev.set_version(short);
    igc_dev.set_updated_at(run.updated_at.as_str());
    igc_dev.set_url(client.artifact_download_url(Upstream::IGC, &igc_dev_artifact_name(short))?);
    info!("igc-dev: {short}");

    Ok(())
}

fn apply_compute_runtime(dep: &mut Dependency, tag: &str) {
    dep.set_github_tag(tag);
    dep.set_version(tag);
    dep.set_url(Upstream::COMPUTE_RUNTIME.release_url(tag));
}

fn apply_igc(dep: &mut Dependency, version: &str) {
    let tag = igc_tag(version);
    dep.set_url(Upstream::IGC.release_url(&tag));
    dep.set_github_tag(tag);
    dep.set_version(version);
}

fn apply_cm(dep: &mut Dependency, tag: &str) {
    dep.set_github_tag(tag);
    dep.set_version(cm_version(tag));
    dep.set_url(Upstream::CM_COMPILER.release_url(tag));
}

fn apply_level_zero(dep: &mut Dependency, tag: &str) {
    dep.set_github_tag(tag);
    dep.set_version(tag);
    dep.set_url(Upstream::LEVEL_ZERO.release_url(tag));
}
