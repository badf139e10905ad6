//! Prospectus CLI entry point
//!
//! # Usage
//!
//! ```bash
//! prospectus check [--all] [--json] [DIRS]...
//! ```

use clap::Parser;
use prospectus_cli::{init_tracing, run_cli, ProspectusCli};

fn main() {
    let cli = ProspectusCli::parse();
    init_tracing(cli.verbose);

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
