//! Source file discovery.

use crate::core::errors::Result;
use ignore::WalkBuilder;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct FileWalker {
    paths: Vec<PathBuf>,
    extensions: Vec<String>,
    include_pattern: Option<Regex>,
}

impl FileWalker {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            extensions: vec!["cs".to_string()],
            include_pattern: None,
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
        self
    }

    pub fn with_include_pattern(mut self, pattern: Option<Regex>) -> Self {
        self.include_pattern = pattern;
        self
    }

    /// Collect candidate files under the requested paths. Inputs that are
    /// neither file nor directory are logged and skipped; the result is
    /// sorted so downstream indices are reproducible.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for path in &self.paths {
            if path.is_file() {
                if self.should_process(path) {
                    files.push(path.clone());
                }
            } else if path.is_dir() {
                let walker = WalkBuilder::new(path).hidden(false).git_ignore(true).build();
                for entry in walker {
                    let entry = entry.map_err(|e| {
                        crate::core::errors::Error::file_system(e.to_string(), path.clone())
                    })?;
                    let entry_path = entry.path();
                    if entry_path.is_file() && self.should_process(entry_path) {
                        files.push(entry_path.to_path_buf());
                    }
                }
            } else {
                warn!(path = %path.display(), "input is neither file nor directory, skipping");
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        if !self.extensions.iter().any(|e| e == extension) {
            return false;
        }
        match &self.include_pattern {
            Some(pattern) => pattern.is_match(&path.to_string_lossy()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, "class C {}").unwrap();
        path
    }

    #[test]
    fn walks_directories_filtering_by_extension() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.cs");
        touch(&dir, "b.cs");
        touch(&dir, "ignored.txt");

        let files = FileWalker::new(vec![dir.path().to_path_buf()]).walk().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "cs"));
    }

    #[test]
    fn accepts_explicit_files() {
        let dir = TempDir::new().unwrap();
        let file = touch(&dir, "single.cs");
        let files = FileWalker::new(vec![file.clone()]).walk().unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn missing_paths_are_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let existing = touch(&dir, "real.cs");
        let files = FileWalker::new(vec![
            PathBuf::from("/definitely/not/here"),
            existing.clone(),
        ])
        .walk()
        .unwrap();
        assert_eq!(files, vec![existing]);
    }

    #[test]
    fn include_pattern_narrows_results() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "service_a.cs");
        touch(&dir, "other.cs");

        let files = FileWalker::new(vec![dir.path().to_path_buf()])
            .with_include_pattern(Some(Regex::new("service_").unwrap()))
            .walk()
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].to_string_lossy().contains("service_a"));
    }

    #[test]
    fn custom_extensions_respect_leading_dot() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.csx");
        touch(&dir, "b.cs");
        let files = FileWalker::new(vec![dir.path().to_path_buf()])
            .with_extensions(vec![".csx".to_string()])
            .walk()
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].to_string_lossy().ends_with("a.csx"));
    }

    #[test]
    fn output_is_sorted() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "zeta.cs");
        touch(&dir, "alpha.cs");
        let files = FileWalker::new(vec![dir.path().to_path_buf()]).walk().unwrap();
        assert!(files.windows(2).all(|w| w[0] <= w[1]));
    }
}
