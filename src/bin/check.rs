//! `example-check` entry point

fn main() {
    example_runner::cli::init_tracing();
    example_runner::cli::run_check();
}
