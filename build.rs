// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)

use std::fs;
use std::io;
use std::path::Path;

use clap::CommandFactory;

include!("src/cli.rs");

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let cmd = Cli::command();
    let page = format!("{}.1", cmd.get_name());

    let mut rendered: Vec<u8> = Vec::new();
    clap_mangen::Man::new(cmd)
        .render(&mut rendered)
        .expect("man page renders from the clap definition");

    // Read-only checkouts keep whatever page is already committed
    let _ = write_man_page(&page, &rendered);
}

/// Write `contents` to man/<page> in the source tree
fn write_man_page(page: &str, contents: &[u8]) -> io::Result<()> {
    let man_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("man");
    fs::create_dir_all(&man_dir)?;
    fs::write(man_dir.join(page), contents)
}
