//! Textual duplicate report.
//!
//! One block per group: a header with the total impact, the representative
//! line, one line per duplicate with its similarity and impact, and an
//! optional code slice. A summary line closes the report.

use crate::core::{DuplicateGroup, MethodInfo};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Print the representative's code slice per group.
    pub print_code: bool,
    /// Print code slices for every member of every group.
    pub print_all: bool,
    /// Colorize headers; disabled when writing to a file.
    pub use_color: bool,
}

pub struct ReportWriter<W: Write> {
    out: W,
    options: ReportOptions,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, options: ReportOptions) -> Self {
        Self { out, options }
    }

    pub fn write_report(&mut self, groups: &[DuplicateGroup<'_>]) -> std::io::Result<()> {
        for (index, group) in groups.iter().enumerate() {
            self.write_group(index + 1, group)?;
        }
        self.write_summary(groups)
    }

    fn write_group(&mut self, number: usize, group: &DuplicateGroup<'_>) -> std::io::Result<()> {
        let header = format!(
            "Duplicate group #{number} (impact {:.1})",
            group.total_impact()
        );
        if self.options.use_color {
            writeln!(self.out, "{}", header.bold().yellow())?;
        } else {
            writeln!(self.out, "{header}")?;
        }

        writeln!(self.out, "  {}", method_line(group.representative))?;
        if self.options.print_code || self.options.print_all {
            self.write_slice(group.representative)?;
        }
        for entry in &group.entries {
            writeln!(
                self.out,
                "  {:>5.1}% impact {:>6.1}  {}",
                entry.similarity * 100.0,
                entry.impact,
                method_line(entry.method),
            )?;
            if self.options.print_all {
                self.write_slice(entry.method)?;
            }
        }
        writeln!(self.out)
    }

    fn write_slice(&mut self, method: &MethodInfo) -> std::io::Result<()> {
        let content = match std::fs::read_to_string(method.file()) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    file = %method.file().display(),
                    error = %e,
                    "cannot read source for code slice"
                );
                return Ok(());
            }
        };
        let start = method.start_line().saturating_sub(1);
        for line in content
            .lines()
            .skip(start)
            .take(method.line_count())
        {
            writeln!(self.out, "    | {line}")?;
        }
        Ok(())
    }

    fn write_summary(&mut self, groups: &[DuplicateGroup<'_>]) -> std::io::Result<()> {
        let methods: usize = groups.iter().map(DuplicateGroup::method_count).sum();
        let total_lines: usize = groups.iter().map(DuplicateGroup::total_lines).sum();
        writeln!(
            self.out,
            "{} groups, {} methods, {} total lines",
            groups.len(),
            methods,
            total_lines
        )
    }
}

#[derive(Serialize)]
struct MethodRecord<'a> {
    file: &'a Path,
    start_line: usize,
    end_line: usize,
    full_name: &'a str,
}

#[derive(Serialize)]
struct EntryRecord<'a> {
    #[serde(flatten)]
    method: MethodRecord<'a>,
    similarity: f64,
    impact: f64,
}

#[derive(Serialize)]
struct GroupRecord<'a> {
    total_impact: f64,
    representative: MethodRecord<'a>,
    duplicates: Vec<EntryRecord<'a>>,
}

fn method_record(method: &MethodInfo) -> MethodRecord<'_> {
    MethodRecord {
        file: method.file(),
        start_line: method.start_line(),
        end_line: method.end_line(),
        full_name: method.full_name(),
    }
}

/// Machine-readable variant of the report.
pub fn write_json_report<W: Write>(
    mut out: W,
    groups: &[DuplicateGroup<'_>],
) -> anyhow::Result<()> {
    let records: Vec<GroupRecord<'_>> = groups
        .iter()
        .map(|group| GroupRecord {
            total_impact: group.total_impact(),
            representative: method_record(group.representative),
            duplicates: group
                .entries
                .iter()
                .map(|entry| EntryRecord {
                    method: method_record(entry.method),
                    similarity: entry.similarity,
                    impact: entry.impact,
                })
                .collect(),
        })
        .collect();
    serde_json::to_writer_pretty(&mut out, &records)?;
    writeln!(out)?;
    Ok(())
}

fn method_line(method: &MethodInfo) -> String {
    format!(
        "{}:{} | L{}-{} {}",
        method.file().display(),
        method.start_line(),
        method.start_line(),
        method.end_line(),
        method.full_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kinds::SyntaxKind;
    use crate::core::tree::TreeNode;
    use crate::core::DuplicateEntry;

    fn method(name: &str, path: &str, start: usize, end: usize) -> MethodInfo {
        let tree = TreeNode::new(
            SyntaxKind::Block,
            "",
            vec![TreeNode::leaf_with_value(SyntaxKind::Identifier, name)],
        );
        MethodInfo::new(name, Some("Owner".to_string()), path, start, end, tree)
    }

    fn render(groups: &[DuplicateGroup<'_>], options: ReportOptions) -> String {
        let mut buffer = Vec::new();
        ReportWriter::new(&mut buffer, options)
            .write_report(groups)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn report_contains_header_entries_and_summary() {
        let rep = method("First", "a.cs", 10, 25);
        let dup = method("Second", "b.cs", 40, 55);
        let groups = vec![DuplicateGroup {
            representative: &rep,
            entries: vec![DuplicateEntry {
                method: &dup,
                similarity: 0.982,
                impact: 61.7,
            }],
        }];
        let text = render(&groups, ReportOptions::default());
        assert!(text.contains("Duplicate group #1"));
        assert!(text.contains("a.cs:10 | L10-25 Owner.First"));
        assert!(text.contains("98.2%"));
        assert!(text.contains("b.cs:40 | L40-55 Owner.Second"));
        assert!(text.contains("1 groups, 2 methods, 32 total lines"));
    }

    #[test]
    fn empty_report_is_just_the_summary() {
        let text = render(&[], ReportOptions::default());
        assert_eq!(text.trim_end(), "0 groups, 0 methods, 0 total lines");
    }

    #[test]
    fn missing_source_files_do_not_fail_slices() {
        let rep = method("Gone", "/no/such/file.cs", 1, 5);
        let groups = vec![DuplicateGroup {
            representative: &rep,
            entries: vec![],
        }];
        // Group with no entries is unusual but must not panic the writer.
        let options = ReportOptions {
            print_code: true,
            ..ReportOptions::default()
        };
        let text = render(&groups, options);
        assert!(text.contains("Duplicate group #1"));
    }

    #[test]
    fn json_report_round_trips() {
        let rep = method("First", "a.cs", 10, 25);
        let dup = method("Second", "b.cs", 40, 55);
        let groups = vec![DuplicateGroup {
            representative: &rep,
            entries: vec![DuplicateEntry {
                method: &dup,
                similarity: 0.9,
                impact: 28.8,
            }],
        }];
        let mut buffer = Vec::new();
        write_json_report(&mut buffer, &groups).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value[0]["representative"]["full_name"], "Owner.First");
        assert_eq!(value[0]["duplicates"][0]["similarity"], 0.9);
        assert_eq!(value[0]["duplicates"][0]["full_name"], "Owner.Second");
    }

    #[test]
    fn print_all_includes_duplicate_slices() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("src.cs");
        std::fs::write(&path, "line one\nline two\nline three\n").unwrap();
        let rep = method("A", path.to_str().unwrap(), 1, 2);
        let dup = method("B", path.to_str().unwrap(), 2, 3);
        let groups = vec![DuplicateGroup {
            representative: &rep,
            entries: vec![DuplicateEntry {
                method: &dup,
                similarity: 0.9,
                impact: 3.6,
            }],
        }];
        let options = ReportOptions {
            print_all: true,
            ..ReportOptions::default()
        };
        let text = render(&groups, options);
        assert!(text.contains("| line one"));
        assert!(text.contains("| line three"));
    }
}
