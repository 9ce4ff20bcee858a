// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
// CLI argument definitions for igfx-uplift
//
// Separated from main.rs so that build.rs can include this file
// to generate the man page via clap_mangen.

use std::path::PathBuf;

use clap::Parser;

/// Platform key used when none is given on the command line
pub const DEFAULT_PLATFORM: &str = "ERROR_PLATFORM";

/// Environment variable overriding the GitHub API base URL
pub const API_URL_ENV: &str = "IGFX_UPLIFT_API_URL";

/// CLI argument parser
#[derive(Parser, Debug)]
#[command(
    name = "igfx-uplift",
    version,
    about = "Uplift Intel GPU driver versions in the dependency manifest",
    disable_version_flag = true
)]
#[command(arg(clap::Arg::new("version").long("version").action(clap::ArgAction::Version).help("Print version")))]
pub struct Cli {
    /// Platform section of the manifest to update (e.g. linux)
    #[arg(value_name = "PLATFORM", default_value = DEFAULT_PLATFORM)]
    pub platform: String,

    /// Manifest to rewrite [default: ../dependencies.json next to the executable]
    #[arg(short = 'm', long = "manifest", value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// GitHub API base URL [default: $IGFX_UPLIFT_API_URL or https://api.github.com]
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Fail when the IGC version cannot be found in the compute-runtime checksums
    #[arg(long = "strict")]
    pub strict: bool,

    /// Make the operation more talkative
    #[arg(short, long)]
    pub verbose: bool,
}
