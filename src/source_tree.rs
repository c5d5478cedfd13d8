//! Source file discovery

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::config::RunnerConfig;
use crate::errors::{RunnerError, RunnerResult};

/// Discover every eligible source file under `config.root`.
///
/// Returns root-relative paths with `/` separators. Test files
/// (`*<test_suffix><extension>`) and hidden directories are skipped.
pub fn discover_source_files(config: &RunnerConfig) -> RunnerResult<BTreeSet<String>> {
    let mut files = BTreeSet::new();
    walk(&config.root, "", config, &mut files)?;
    tracing::debug!("discovered {} source file(s) under {}", files.len(), config.root.display());
    Ok(files)
}

fn walk(dir: &Path, prefix: &str, config: &RunnerConfig, files: &mut BTreeSet<String>) -> RunnerResult<()> {
    let walk_err = |source: std::io::Error| RunnerError::SourceWalk {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(walk_err)? {
        let entry = entry.map_err(walk_err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::warn!("skipping non UTF-8 path under {}", dir.display());
            continue;
        };
        let relative = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        };

        let file_type = entry.file_type().map_err(walk_err)?;
        if file_type.is_dir() {
            if !name.starts_with('.') {
                walk(&entry.path(), &relative, config, files)?;
            }
        } else if name.ends_with(config.extension.as_str()) && !config.is_test_file(name) {
            files.insert(relative);
        }
    }

    Ok(())
}
