//! ifaces-wizard - Configure a network interface interactively
//!
//! This is the main entry point for the Rust CLI binary.

use console::{Term, style};

fn main() {
    let code = match ifaces_wizard::run() {
        Ok(code) => code,
        Err(e) => {
            let _ = Term::stderr().show_cursor();
            eprintln!("{} {e:#}", style("Error:").red().bold());
            1
        }
    };
    std::process::exit(code);
}
