#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// Small mixed-type dataset used across the CLI tests: a categorical column,
/// a numeric column with one gap, and a date column.
pub fn people_csv() -> String {
    [
        "name,age,joined",
        "alice,34,2024-01-15",
        "bob,,2023-11-02",
        "cara,29,2024-03-08",
        "dan,41,2022-07-19",
    ]
    .join("\n")
        + "\n"
}

/// Splits a rendered table line on runs of two or more spaces.
pub fn parse_table_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut space_run = 0usize;
    for ch in line.chars() {
        if ch == ' ' {
            space_run += 1;
            continue;
        }
        if space_run >= 2 && !current.is_empty() {
            cells.push(current.trim().to_string());
            current.clear();
        } else if space_run == 1 && !current.is_empty() {
            current.push(' ');
        }
        space_run = 0;
        current.push(ch);
    }
    if !current.trim().is_empty() {
        cells.push(current.trim().to_string());
    }
    cells
}
