// crates/extract_drop/tests/cli.rs

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use std::fs;

const FIBONACCI_DROP: &str = "## Requirements:
- Generate a sequence
## Design:
- Iterative
## Implementation:
```
def f(n): ...
```
## Testing:
`assert f(5) == ...`
";

fn extract_drop() -> Command {
    let mut cmd = Command::cargo_bin("extract_drop").unwrap();
    cmd.env_remove("EXTRACT_DROP_MARKERS").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_writes_one_file_per_section() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("fibonacci.md");
    drop.write_str(FIBONACCI_DROP).unwrap();
    let out = temp.child("out");

    extract_drop()
        .arg(drop.path())
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted 4 sections from"))
        .stdout(predicate::str::contains("  - implementation: "));

    out.child("fibonacci_requirements.md").assert(predicate::path::is_file());
    out.child("fibonacci_design.md").assert(predicate::path::is_file());
    out.child("fibonacci_testing.txt").assert(predicate::path::is_file());

    let implementation = fs::read_to_string(out.child("fibonacci_implementation.py").path()).unwrap();
    assert!(implementation.starts_with("\"\"\"\nFibonacci - Implementation\n"));
    assert!(implementation.contains("Generated from drop: fibonacci.md"));
    assert!(implementation.ends_with("def f(n): ..."));
}

#[test]
fn test_name_overrides_file_prefix() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("drop.md");
    drop.write_str(FIBONACCI_DROP).unwrap();

    extract_drop()
        .arg(drop.path())
        .args(["-o", temp.path().to_str().unwrap(), "-n", "fib"])
        .assert()
        .success();

    temp.child("fib_design.md").assert(predicate::path::is_file());
    temp.child("drop_design.md").assert(predicate::path::missing());
}

#[test]
fn test_section_flag_prints_unfenced_code_and_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("fibonacci.md");
    drop.write_str(FIBONACCI_DROP).unwrap();
    let out = temp.child("out");

    extract_drop()
        .arg(drop.path())
        .arg("-o")
        .arg(out.path())
        .args(["-s", "implementation"])
        .assert()
        .success()
        .stdout("def f(n): ...\n");

    out.assert(predicate::path::missing());
}

#[test]
fn test_section_flag_prints_testing_without_inline_backticks() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("fibonacci.md");
    drop.write_str(FIBONACCI_DROP).unwrap();

    extract_drop()
        .arg(drop.path())
        .args(["-o", temp.path().to_str().unwrap(), "-s", "testing"])
        .assert()
        .success()
        .stdout("assert f(5) == ...\n");
}

#[test]
fn test_section_flag_reports_absent_section() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("fibonacci.md");
    drop.write_str(FIBONACCI_DROP).unwrap();

    extract_drop()
        .arg(drop.path())
        .args(["-o", temp.path().to_str().unwrap(), "-s", "documentation"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Section 'documentation' not found in"));
}

#[test]
fn test_section_flag_rejects_unknown_kind() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("fibonacci.md");
    drop.write_str(FIBONACCI_DROP).unwrap();

    extract_drop()
        .arg(drop.path())
        .args(["-o", temp.path().to_str().unwrap(), "-s", "changelog"])
        .assert()
        .failure();
}

#[test]
fn test_missing_input_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.child("nope.md");

    extract_drop()
        .arg(missing.path())
        .arg("-o")
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Drop file not found"));
}

#[test]
fn test_drop_without_markers_fails() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("plain.md");
    drop.write_str("Just some notes.\nNothing to see.\n").unwrap();
    let out = temp.child("out");

    extract_drop()
        .arg(drop.path())
        .arg("-o")
        .arg(out.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No drop sections found in the content"));
}

#[test]
fn test_missing_required_sections_are_warned_about() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("partial.md");
    drop.write_str("## Requirements:\nSum numbers\n## Implementation:\ndef s(xs): return sum(xs)\n")
        .unwrap();

    extract_drop()
        .arg(drop.path())
        .arg("-o")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Missing sections in drop: design"))
        .stdout(predicate::str::contains("Extracted 2 sections from"));
}

#[test]
fn test_subdirs_layout() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("fibonacci.md");
    drop.write_str(FIBONACCI_DROP).unwrap();
    let out = temp.child("out");

    extract_drop()
        .arg(drop.path())
        .arg("-o")
        .arg(out.path())
        .arg("--subdirs")
        .assert()
        .success();

    out.child("implementation/fibonacci_implementation.py")
        .assert(predicate::path::is_file());
    out.child("requirements/fibonacci_requirements.md")
        .assert(predicate::path::is_file());
    out.child("documentation").assert(predicate::path::is_dir());
}

#[test]
fn test_markup_drop_is_detected_from_extension() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("sum.html");
    drop.write_str(
        r#"<html><body>
<div class="section" id="requirements"><h2>Requirements</h2><p>Sum numbers</p></div>
<div class="section" id="design"><h2>Design</h2><p>Loop once</p></div>
<div class="section" id="implementation"><h2>Implementation</h2><pre><code>def s(xs): return sum(xs)</code></pre></div>
</body></html>"#,
    )
    .unwrap();

    extract_drop()
        .arg(drop.path())
        .args(["-o", temp.path().to_str().unwrap(), "--debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Strategy: markup"))
        .stdout(predicate::str::contains("--- design ---\nLoop once"));

    let implementation = fs::read_to_string(temp.child("sum_implementation.py").path()).unwrap();
    assert!(implementation.ends_with("def s(xs): return sum(xs)"));
}

#[test]
fn test_html_flag_falls_back_without_section_containers() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("broken.txt");
    drop.write_str("<div>\n## Requirements:\nSum numbers\n## Design:\nLoop\n</span>\n")
        .unwrap();

    extract_drop()
        .arg(drop.path())
        .args(["-o", temp.path().to_str().unwrap(), "--html", "--debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("markup fallback"))
        .stderr(predicate::str::contains("falling back to marker scan"));

    temp.child("broken_requirements.md").assert(predicate::str::ends_with("Sum numbers"));
}

#[test]
fn test_custom_marker_from_command_line() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("custom.md");
    drop.write_str("## Requirements:\nSum\n## Design:\nLoop\n## Implementation:\ncode\n-- checks --\nassert ok\n")
        .unwrap();

    extract_drop()
        .arg(drop.path())
        .args(["-o", temp.path().to_str().unwrap(), "--marker", "testing=^-- checks --$"])
        .args(["-s", "testing"])
        .assert()
        .success()
        .stdout("assert ok\n");
}

#[test]
fn test_custom_marker_from_environment() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("custom.md");
    drop.write_str("## Requirements:\nSum\n== plan ==\nLoop\n").unwrap();

    extract_drop()
        .env("EXTRACT_DROP_MARKERS", "design=^== plan ==$")
        .arg(drop.path())
        .args(["-o", temp.path().to_str().unwrap(), "-s", "design"])
        .assert()
        .success()
        .stdout("Loop\n");
}

#[test]
fn test_invalid_marker_is_rejected() {
    let temp = TempDir::new().unwrap();
    let drop = temp.child("fibonacci.md");
    drop.write_str(FIBONACCI_DROP).unwrap();

    extract_drop()
        .arg(drop.path())
        .args(["-o", temp.path().to_str().unwrap(), "--marker", "design=["])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --marker"));
}
