//! edfaudit CLI entry point.

#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = edfaudit::run() {
        eprintln!("error: {}", edfaudit::error::display_chain(&e));
        std::process::exit(1);
    }
}
