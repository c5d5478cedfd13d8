//! Runner configuration
//!
//! Defaults describe a Go example tree: sources under `examples/`, the manifest
//! in `files_to_test.txt`, `go build` for compile checks, `go run` for
//! execution, and `go mod tidy` as the dependency sync pre-step.

use std::env;
use std::fmt;
use std::path::PathBuf;

/// Environment variable overriding [`RunnerConfig::root`].
pub const ROOT_ENV: &str = "EXAMPLE_RUNNER_ROOT";
/// Environment variable overriding [`RunnerConfig::manifest`].
pub const MANIFEST_ENV: &str = "EXAMPLE_RUNNER_MANIFEST";

/// An external program plus the fixed arguments that precede per-unit tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Example root; every manifest path is relative to it and children run in it
    pub root: PathBuf,
    /// Path of the manifest file
    pub manifest: PathBuf,
    /// Source file extension, including the leading dot
    pub extension: String,
    /// Stem suffix marking test files (`foo_test.go`), excluded from discovery
    pub test_suffix: String,
    /// Compiler used by `build`
    pub compiler: ToolCommand,
    /// Interpreter used by `run`
    pub interpreter: ToolCommand,
    /// Dependency sync pre-step, `None` to skip it
    pub sync: Option<ToolCommand>,
}

fn null_device() -> &'static str {
    if cfg!(windows) { "NUL" } else { "/dev/null" }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("examples"),
            manifest: PathBuf::from("files_to_test.txt"),
            extension: ".go".to_string(),
            test_suffix: "_test".to_string(),
            compiler: ToolCommand::new("go", ["build", "-o", null_device()]),
            interpreter: ToolCommand::new("go", ["run"]),
            sync: Some(ToolCommand::new("go", ["mod", "tidy"])),
        }
    }
}

impl RunnerConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `EXAMPLE_RUNNER_ROOT` / `EXAMPLE_RUNNER_MANIFEST`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(root) = env::var(ROOT_ENV) {
            tracing::debug!("{} overrides example root: {}", ROOT_ENV, root);
            config.root = PathBuf::from(root);
        }
        if let Ok(manifest) = env::var(MANIFEST_ENV) {
            tracing::debug!("{} overrides manifest: {}", MANIFEST_ENV, manifest);
            config.manifest = PathBuf::from(manifest);
        }
        config
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_manifest(mut self, manifest: impl Into<PathBuf>) -> Self {
        self.manifest = manifest.into();
        self
    }

    /// Set the source extension (a missing leading dot is added)
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };
        self
    }

    pub fn with_test_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.test_suffix = suffix.into();
        self
    }

    pub fn with_compiler(mut self, compiler: ToolCommand) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn with_interpreter(mut self, interpreter: ToolCommand) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn with_sync(mut self, sync: Option<ToolCommand>) -> Self {
        self.sync = sync;
        self
    }

    /// Whether `name` (a bare file name) follows the test naming convention.
    pub fn is_test_file(&self, name: &str) -> bool {
        name.strip_suffix(self.extension.as_str())
            .is_some_and(|stem| !self.test_suffix.is_empty() && stem.ends_with(self.test_suffix.as_str()))
    }
}
