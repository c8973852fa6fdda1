//! `codetint` binary entry point.

fn main() {
    let exit_code = codetint::cli::run_and_report(codetint::cli::run);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
