//! Property-based tests for manifest handling and command construction

use std::collections::BTreeSet;
use std::path::Path;

use example_runner::{
    Action, ConsistencyReport, Invocation, Manifest, RunnerConfig, ToolCommand, should_process_line,
};
use proptest::prelude::*;

fn config() -> RunnerConfig {
    RunnerConfig::default()
        .with_root("examples")
        .with_compiler(ToolCommand::new("go", ["build"]))
        .with_interpreter(ToolCommand::new("go", ["run"]))
}

fn source_path() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(/[a-z]{1,8}){0,2}".prop_map(|p| format!("{p}.go"))
}

fn argument() -> impl Strategy<Value = String> {
    "-{0,2}[a-z0-9=]{1,8}"
}

// =============================================================================
// Line filtering
// =============================================================================

proptest! {
    #[test]
    fn whitespace_only_lines_are_skipped(ws in "[ \t]{0,10}") {
        prop_assert!(!should_process_line(&ws));
    }

    #[test]
    fn comment_lines_are_skipped(ws in "[ \t]{0,4}", rest in "[ -~]{0,20}") {
        let line = format!("{ws}#{rest}");
        prop_assert!(!should_process_line(&line));
    }

    #[test]
    fn other_lines_are_processed(ws in "[ \t]{0,4}", first in "[!-\"$-~]", rest in "[ -~]{0,20}") {
        let line = format!("{ws}{first}{rest}");
        prop_assert!(should_process_line(&line));
    }
}

// =============================================================================
// Command construction
// =============================================================================

proptest! {
    #[test]
    fn build_of_source_only_line_is_compiler_plus_sources(
        sources in prop::collection::vec(source_path(), 1..5),
    ) {
        let manifest = Manifest::parse(&sources.join(" "), ".go");
        let inv = Invocation::for_line(Action::Build, &manifest.lines[0], &config());
        let mut expected = vec!["build".to_string()];
        expected.extend(sources.iter().cloned());
        prop_assert_eq!(inv.program, "go");
        prop_assert_eq!(inv.args, expected);
    }

    #[test]
    fn build_drops_arguments_and_run_keeps_them(
        sources in prop::collection::vec(source_path(), 1..4),
        args in prop::collection::vec(argument(), 1..4),
    ) {
        let text = format!("{} {}", sources.join(" "), args.join(" "));
        let manifest = Manifest::parse(&text, ".go");
        let line = &manifest.lines[0];

        let build = Invocation::for_line(Action::Build, line, &config());
        prop_assert_eq!(&build.args[1..], &sources[..]);

        let run = Invocation::for_line(Action::Run, line, &config());
        let mut expected = sources.clone();
        expected.extend(args.iter().cloned());
        prop_assert_eq!(&run.args[1..], &expected[..]);
    }
}

// =============================================================================
// Lookup and consistency
// =============================================================================

proptest! {
    #[test]
    fn commented_lines_never_match(path in source_path()) {
        let manifest = Manifest::parse(&format!("# {path}\n  #{path}\n"), ".go");
        let file = format!("examples/{path}");
        prop_assert!(manifest.find_line_for(&file, Path::new("examples")).is_none());
    }

    #[test]
    fn registered_file_is_found_with_or_without_root(path in source_path(), arg in argument()) {
        let manifest = Manifest::parse(&format!("{path} {arg}\n"), ".go");
        let root = Path::new("examples");
        let prefixed = format!("examples/{path}");
        prop_assert!(manifest.find_line_for(&prefixed, root).is_some());
        prop_assert!(manifest.find_line_for(&path, root).is_some());
    }

    #[test]
    fn consistency_is_order_independent(
        disk in prop::collection::vec(source_path(), 0..8),
        listed in prop::collection::vec(source_path(), 0..8),
    ) {
        let on_disk: BTreeSet<String> = disk.iter().cloned().collect();
        let forward = ConsistencyReport::compare(&on_disk, listed.iter().map(String::as_str));
        let backward = ConsistencyReport::compare(&on_disk, listed.iter().rev().map(String::as_str));
        prop_assert_eq!(&forward, &backward);

        let listed_set: BTreeSet<String> = listed.iter().cloned().collect();
        prop_assert!(forward.unregistered.iter().all(|p| !listed_set.contains(p)));
        prop_assert!(forward.dangling.iter().all(|p| !on_disk.contains(p)));
    }
}
