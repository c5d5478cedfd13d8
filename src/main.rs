//! `example-runner` entry point

fn main() {
    example_runner::cli::init_tracing();
    example_runner::cli::run_runner();
}
