// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! igfx-uplift - Main Application
//!
//! Refreshes the Intel GPU driver entries of one platform in the dependency
//! manifest and prints the new compute-runtime version.

use std::error::Error;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use igfx_uplift::upstream::GITHUB_API_BASE;
use igfx_uplift::{ChecksumPolicy, GithubClient, HttpTransport, UpliftConfig};

mod cli;

use cli::{API_URL_ENV, Cli};

/// Manifest location relative to the directory holding the executable
const DEFAULT_MANIFEST: &str = "../dependencies.json";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Only the version goes to stdout so callers can capture it
    match cmd_uplift(cli) {
        Ok(version) => println!("{version}"),
        Err(e) => {
            eprintln!("error: {e}");
            exit(1);
        }
    }
}

/// Send log output to stderr, honouring RUST_LOG when set
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn cmd_uplift(cli: Cli) -> Result<String, Box<dyn Error>> {
    let manifest_path = match cli.manifest {
        Some(path) => path,
        None => default_manifest_path()?,
    };
    let api_url = cli
        .api_url
        .or_else(|| std::env::var(API_URL_ENV).ok())
        .unwrap_or_else(|| GITHUB_API_BASE.to_string());

    let config = UpliftConfig {
        manifest_path,
        platform: cli.platform,
        policy: if cli.strict {
            ChecksumPolicy::Strict
        } else {
            ChecksumPolicy::Lenient
        },
    };
    let client = GithubClient::with_transport(HttpTransport::new(), api_url);

    Ok(igfx_uplift::run(&config, &client)?)
}

/// Resolve the manifest next to the real location of the executable
fn default_manifest_path() -> Result<PathBuf, Box<dyn Error>> {
    let exe = std::env::current_exe()
        .and_then(|path| path.canonicalize())
        .map_err(|e| format!("Failed to locate the running executable: {e}"))?;
    let exe_dir = exe
        .parent()
        .ok_or("Executable path has no parent directory")?;
    Ok(exe_dir.join(DEFAULT_MANIFEST))
}
