//! Extractor integration coverage: real files on disk, through the trait's
//! file-reading path.

use dupmap::extract::{CSharpExtractor, MethodExtractor};
use dupmap::{Error, MethodInfo};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn extract_file(path: &Path) -> Vec<MethodInfo> {
    let mut extractor = CSharpExtractor::new().unwrap();
    extractor.extract_file(path).unwrap().methods
}

#[test]
fn extracts_from_a_file_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "calculator.cs",
        r#"
class Calculator {
    int Add(int a, int b) {
        var sum = a + b;
        Log(sum);
        return sum;
    }
}
"#,
    );
    let methods = extract_file(&path);
    assert_eq!(methods.len(), 1);
    let method = &methods[0];
    assert_eq!(method.full_name(), "Calculator.Add");
    assert_eq!(method.file(), path);
    assert_eq!(method.parameters(), ["a", "b"]);
    assert!(method.token_count() > 0);
}

#[test]
fn missing_file_is_a_file_system_error() {
    let mut extractor = CSharpExtractor::new().unwrap();
    let err = extractor
        .extract_file(Path::new("/no/such/dir/missing.cs"))
        .unwrap_err();
    assert!(matches!(err, Error::FileSystem { .. }), "got {err}");
}

#[test]
fn one_file_with_several_types_keeps_contexts_apart() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "mixed.cs",
        r#"
namespace Billing {
    class Invoice {
        decimal Total(decimal[] lines) {
            var total = 0m;
            foreach (var line in lines) {
                total += line;
            }
            return total;
        }
    }

    struct Money {
        long Cents() {
            return units * 100;
        }
    }
}
"#,
    );
    let methods = extract_file(&path);
    let full_names: Vec<&str> = methods.iter().map(|m| m.full_name()).collect();
    assert!(full_names.contains(&"Invoice.Total"), "got {full_names:?}");
    assert!(full_names.contains(&"Money.Cents"), "got {full_names:?}");
}

#[test]
fn every_callable_shape_is_discovered() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "shapes.cs",
        r#"
class Widget {
    int size;

    Widget(int initial) {
        size = initial;
    }

    void Resize(int next) {
        int Clamped(int value) {
            if (value < 0) return 0;
            return value;
        }
        size = Clamped(next);
    }

    public int Size {
        get { return size; }
        set { size = value; }
    }
}
"#,
    );
    let methods = extract_file(&path);
    let names: Vec<&str> = methods.iter().map(|m| m.name()).collect();
    for expected in ["Widget", "Resize", "Clamped", "get_Size", "set_Size"] {
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }
    // The local function belongs to the enclosing class, not the method.
    let clamped = methods.iter().find(|m| m.name() == "Clamped").unwrap();
    assert_eq!(clamped.class_context(), Some("Widget"));
}

#[test]
fn line_bounds_match_the_file_contents() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "lines.cs",
        "class C {\n    void M() {\n        First();\n        Second();\n    }\n}\n",
    );
    let methods = extract_file(&path);
    let method = &methods[0];
    assert_eq!(method.start_line(), 2);
    assert_eq!(method.end_line(), 5);
    assert_eq!(method.line_count(), 4);

    // The recorded bounds select exactly the method's text.
    let content = fs::read_to_string(&path).unwrap();
    let slice: Vec<&str> = content
        .lines()
        .skip(method.start_line() - 1)
        .take(method.line_count())
        .collect();
    assert!(slice.first().unwrap().contains("void M()"));
    assert!(slice.last().unwrap().trim_end().ends_with('}'));
}

#[test]
fn unparseable_content_yields_an_empty_file_not_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.cs", "%%% this is not c# %%%");
    let mut extractor = CSharpExtractor::new().unwrap();
    let parsed = extractor.extract_file(&path).unwrap();
    assert!(parsed.methods.is_empty());
}

#[test]
fn extraction_of_the_same_file_is_stable() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "stable.cs",
        r#"
class Repeat {
    int Twice(int x) {
        var doubled = x * 2;
        Log(doubled);
        return doubled;
    }
}
"#,
    );
    let first = extract_file(&path);
    let second = extract_file(&path);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.full_name(), b.full_name());
        assert_eq!(a.token_count(), b.token_count());
        assert_eq!(a.start_line(), b.start_line());
        assert_eq!(a.end_line(), b.end_line());
    }
}
