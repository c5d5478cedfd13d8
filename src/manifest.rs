//! Manifest parsing and lookup
//!
//! The manifest (`files_to_test.txt` by default) is a hand-edited text file:
//!
//! ```text
//! # comment
//! hello/hello.go
//! flags/main.go flags/usage.go --name gopher
//! ```
//!
//! Each non-comment, non-blank line is one compilation unit. Tokens ending in
//! the source extension are file paths relative to the example root; all other
//! tokens are runtime arguments forwarded only by `run`.
//!
//! ## Known limitation
//!
//! Classification is purely by suffix: a runtime argument that happens to end
//! in the source extension is indistinguishable from a source path.

use std::fs;
use std::path::{self, Component, Path, PathBuf};

use crate::errors::{RunnerError, RunnerResult};

/// A classified manifest token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Source file path, relative to the example root
    SourcePath(String),
    /// Free-form runtime argument
    Argument(String),
}

impl Token {
    pub fn as_str(&self) -> &str {
        match self {
            Token::SourcePath(s) | Token::Argument(s) => s,
        }
    }

    pub fn is_source_path(&self) -> bool {
        matches!(self, Token::SourcePath(_))
    }
}

/// Classify a token: a source path iff it ends with `extension`.
pub fn classify_token(token: &str, extension: &str) -> Token {
    if token.ends_with(extension) {
        Token::SourcePath(token.to_string())
    } else {
        Token::Argument(token.to_string())
    }
}

/// Whether a raw manifest line describes a unit.
///
/// Empty lines, whitespace-only lines, and lines whose first non-whitespace
/// character is `#` are skipped.
pub fn should_process_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// One unit of the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLine {
    /// 1-based line number in the manifest file
    pub number: usize,
    /// Line text with surrounding whitespace removed
    pub text: String,
    pub tokens: Vec<Token>,
}

impl ManifestLine {
    fn parse(number: usize, raw: &str, extension: &str) -> Self {
        Self {
            number,
            text: raw.trim().to_string(),
            tokens: raw.split_whitespace().map(|t| classify_token(t, extension)).collect(),
        }
    }

    /// Source paths in original order, as written
    pub fn source_paths(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter(|t| t.is_source_path()).map(Token::as_str)
    }

    /// Source paths in comparison form: `/` separators, no leading `./`
    pub fn normalized_source_paths(&self) -> impl Iterator<Item = String> {
        self.source_paths().map(normalize_path)
    }

    /// Runtime arguments in original order
    #[cfg(test)]
    fn arguments(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter(|t| !t.is_source_path()).map(Token::as_str)
    }

    /// Whether the line registers `relative` as one of its source files
    pub fn registers(&self, relative: &str) -> bool {
        self.normalized_source_paths().any(|p| p == relative)
    }
}

/// A parsed manifest: only the lines that describe units, in file order
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    pub lines: Vec<ManifestLine>,
}

impl Manifest {
    pub fn parse(text: &str, extension: &str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .filter(|(_, raw)| should_process_line(raw))
            .map(|(idx, raw)| ManifestLine::parse(idx + 1, raw, extension))
            .collect();
        Self { lines }
    }

    pub fn load(path: &Path, extension: &str) -> RunnerResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| RunnerError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::parse(&text, extension);
        tracing::debug!("loaded {} unit(s) from {}", manifest.lines.len(), path.display());
        Ok(manifest)
    }

    /// Every registered source path in comparison form, multi-file lines
    /// contributing each file.
    pub fn registered_paths(&self) -> impl Iterator<Item = String> {
        self.lines.iter().flat_map(ManifestLine::normalized_source_paths)
    }

    /// Find the first line registering `file`, after stripping `root` from it.
    pub fn find_line_for(&self, file: &str, root: &Path) -> Option<&ManifestLine> {
        let relative = relative_to_root(file, root);
        self.lines.iter().find(|line| line.registers(&relative))
    }
}

fn trim_dot_slash(mut s: &str) -> &str {
    while let Some(rest) = s.strip_prefix("./") {
        s = rest;
    }
    s
}

/// Comparison form of a root-relative path: `/` separators, no leading `./`.
pub fn normalize_path(path: &str) -> String {
    let slashed = path.replace('\\', "/");
    trim_dot_slash(&slashed).to_string()
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components().filter(|c| !matches!(c, Component::CurDir)).collect()
}

/// `file` below `root`, component-wise, joined with `/`.
fn strip_root(file: &Path, root: &Path) -> Option<String> {
    let root = without_cur_dir(root);
    if root.as_os_str().is_empty() {
        return None;
    }
    let file = without_cur_dir(file);
    let rest = file.strip_prefix(&root).ok()?;
    let parts: Vec<String> = rest
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() { None } else { Some(parts.join("/")) }
}

/// Express `file` relative to `root` in comparison form.
///
/// The root is stripped as given first, then with both sides made absolute
/// against the working directory, so `examples/hello/hello.go`,
/// `/abs/examples/hello/hello.go` and `hello/hello.go` all map to
/// `hello/hello.go` whether the root is `examples` or `/abs/examples`.
pub fn relative_to_root(file: &str, root: &Path) -> String {
    let file_path = Path::new(file);
    if let Some(relative) = strip_root(file_path, root) {
        return relative;
    }
    if let (Ok(abs_file), Ok(abs_root)) = (path::absolute(file_path), path::absolute(root)) {
        if let Some(relative) = strip_root(&abs_file, &abs_root) {
            return relative;
        }
    }
    normalize_path(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "\
# greeting examples
hello/hello.go

   # indented comment
flags/main.go flags/usage.go --name gopher
#skipped/skipped.go
args/args.go a b c
";

    #[test]
    fn test_should_process_line() {
        assert!(!should_process_line(""));
        assert!(!should_process_line("   \t"));
        assert!(!should_process_line("# comment"));
        assert!(!should_process_line("   # indented comment"));
        assert!(should_process_line("hello/hello.go"));
        assert!(should_process_line("  hello/hello.go # trailing"));
    }

    #[test]
    fn test_classify_token() {
        assert_eq!(classify_token("a/b.go", ".go"), Token::SourcePath("a/b.go".to_string()));
        assert_eq!(classify_token("--name", ".go"), Token::Argument("--name".to_string()));
        assert_eq!(classify_token("go", ".go"), Token::Argument("go".to_string()));
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let manifest = Manifest::parse(MANIFEST, ".go");
        let numbers: Vec<usize> = manifest.lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![2, 5, 7]);
    }

    #[test]
    fn test_multi_file_line_splits_sources_and_arguments() {
        let manifest = Manifest::parse(MANIFEST, ".go");
        let line = &manifest.lines[1];
        assert_eq!(line.source_paths().collect::<Vec<_>>(), vec!["flags/main.go", "flags/usage.go"]);
        assert_eq!(line.arguments().collect::<Vec<_>>(), vec!["--name", "gopher"]);
    }

    #[test]
    fn test_registered_paths() {
        let manifest = Manifest::parse(MANIFEST, ".go");
        let paths: Vec<String> = manifest.registered_paths().collect();
        assert_eq!(paths, vec!["hello/hello.go", "flags/main.go", "flags/usage.go", "args/args.go"]);
    }

    #[test]
    fn test_find_line_strips_root_prefix() {
        let manifest = Manifest::parse(MANIFEST, ".go");
        let root = Path::new("examples");

        let found = manifest.find_line_for("examples/flags/usage.go", root);
        assert_eq!(found.map(|l| l.number), Some(5));

        let found = manifest.find_line_for("./examples/hello/hello.go", root);
        assert_eq!(found.map(|l| l.number), Some(2));

        let found = manifest.find_line_for("args/args.go", root);
        assert_eq!(found.map(|l| l.number), Some(7));
    }

    #[test]
    fn test_find_line_ignores_commented_lines() {
        let manifest = Manifest::parse(MANIFEST, ".go");
        assert!(manifest.find_line_for("examples/skipped/skipped.go", Path::new("examples")).is_none());
    }

    #[test]
    fn test_find_line_does_not_match_partial_paths() {
        let manifest = Manifest::parse(MANIFEST, ".go");
        assert!(manifest.find_line_for("lo/hello.go", Path::new("examples")).is_none());
        assert!(manifest.find_line_for("examplesx/hello/hello.go", Path::new("examples")).is_none());
    }

    #[test]
    fn test_relative_to_root_absolute_path() {
        let root = Path::new("examples");
        let absolute = path::absolute(root).unwrap().join("hello").join("hello.go");
        assert_eq!(relative_to_root(&absolute.to_string_lossy(), root), "hello/hello.go");
    }

    #[test]
    fn test_find_line_with_absolute_root_and_relative_file() {
        let manifest = Manifest::parse("pkg/a.go\n", ".go");
        let root = path::absolute("examples").unwrap();
        let found = manifest.find_line_for("examples/pkg/a.go", &root);
        assert_eq!(found.map(|l| l.number), Some(1));
    }

    #[test]
    fn test_dot_slash_tokens_compare_normalized() {
        let manifest = Manifest::parse("./pkg/a.go ./flag.go\n", ".go");
        let paths: Vec<String> = manifest.registered_paths().collect();
        assert_eq!(paths, vec!["pkg/a.go", "flag.go"]);
        let found = manifest.find_line_for("examples/pkg/a.go", Path::new("examples"));
        assert_eq!(found.map(|l| l.number), Some(1));
        // Commands still see the token as written
        assert_eq!(manifest.lines[0].source_paths().next(), Some("./pkg/a.go"));
    }

    #[test]
    fn test_relative_to_root_with_dot_root() {
        assert_eq!(relative_to_root("./pkg/a.go", Path::new(".")), "pkg/a.go");
    }

    #[test]
    fn test_load_missing_manifest() {
        let err = Manifest::load(Path::new("definitely/not/here.txt"), ".go").unwrap_err();
        assert!(matches!(err, RunnerError::ManifestRead { .. }));
    }
}
