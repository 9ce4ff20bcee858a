// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Version strings and tag naming rules for the tracked upstreams
//!
//! Every manifest field written by the uplift is derived from a tag, a
//! commit hash or a checksum listing using the helpers below.

use std::sync::LazyLock;

use regex::Regex;

/// Length of the abbreviated commit hash used in IGC dev tags
pub const SHORT_SHA_LEN: usize = 7;

/// Tag prefix of IGC releases
pub const IGC_TAG_PREFIX: &str = "igc-";

/// Tag prefix of IGC dev builds
pub const IGC_DEV_TAG_PREFIX: &str = "igc-dev-";

/// Tag prefix of CM compiler releases
pub const CM_TAG_PREFIX: &str = "cmclang-";

static IGC_CORE_PACKAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"intel-igc-core_([0-9.]*)_amd64").expect("static regex must compile")
});

/// Find the IGC version pinned by a compute-runtime checksum listing
///
/// The listing names the Debian packages shipped with the release; the first
/// `intel-igc-core_<version>_amd64` entry carries the IGC version.
///
/// # Examples
/// ```
/// use igfx_uplift::version::extract_igc_core_version;
/// let sums = "0a1b  intel-igc-core_1.0.17193.4_amd64.deb\n";
/// assert_eq!(extract_igc_core_version(sums), Some("1.0.17193.4"));
/// assert_eq!(extract_igc_core_version("nothing here"), None);
/// ```
#[must_use]
pub fn extract_igc_core_version(listing: &str) -> Option<&str> {
    IGC_CORE_PACKAGE
        .captures(listing)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Abbreviate a commit hash to its first seven characters
///
/// Hashes shorter than that are returned whole.
///
/// # Examples
/// ```
/// use igfx_uplift::version::short_sha;
/// assert_eq!(short_sha("abcdef1234567"), "abcdef1");
/// assert_eq!(short_sha("abc"), "abc");
/// ```
#[must_use]
pub fn short_sha(sha: &str) -> &str {
    match sha.char_indices().nth(SHORT_SHA_LEN) {
        Some((idx, _)) => &sha[..idx],
        None => sha,
    }
}

/// CM compiler version: the tag with every `cmclang-` removed
#[must_use]
pub fn cm_version(tag: &str) -> String {
    tag.replace(CM_TAG_PREFIX, "")
}

/// Release tag for an IGC version
#[must_use]
pub fn igc_tag(version: &str) -> String {
    format!("{IGC_TAG_PREFIX}{version}")
}

/// Tag recorded for an IGC dev build at `short_sha`
#[must_use]
pub fn igc_dev_tag(short_sha: &str) -> String {
    format!("{IGC_DEV_TAG_PREFIX}{short_sha}")
}

/// Name of the Ubuntu artifact built from `short_sha`
#[must_use]
pub fn igc_dev_artifact_name(short_sha: &str) -> String {
    format!("{}{short_sha}", crate::upstream::IGC_DEV_ARTIFACT_PREFIX)
}
