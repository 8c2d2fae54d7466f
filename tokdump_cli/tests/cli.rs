use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::{tempdir, TempDir};

fn tokdump(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tokdump"))
        .args(args)
        .env_remove("TOKDUMP_CONFIG")
        .env_remove("TOKDUMP_MAX_LINE_LENGTH")
        .env_remove("TOKDUMP_LOG_STRUCTURED")
        .env_remove("TOKDUMP_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tokdump")
}

fn fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_default_mode_labels_whitespace() {
    let dir = tempdir().unwrap();
    let file = fixture(&dir, "a.py", "x = 42\n");

    let output = tokdump(&[arg(&file)]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "x\n(SPACE)\n=\n(SPACE)\n42\n(NEWLINE)\n"
    );
}

#[test]
fn test_group_spaces_short_flag() {
    let dir = tempdir().unwrap();
    let file = fixture(&dir, "a.txt", "a   b c");

    let output = tokdump(&["-gs", arg(&file)]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "a\n(SPACEx3)\nb\n(SPACE)\nc\n");
}

#[test]
fn test_suppress_blank_short_flag() {
    let dir = tempdir().unwrap();
    let file = fixture(&dir, "code.rst", "a\tb\n\n");

    let output = tokdump(&["-sb", arg(&file)]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "a\nb\n");
}

#[test]
fn test_raw_mode_prints_whitespace_bytes() {
    let dir = tempdir().unwrap();
    let file = fixture(&dir, "a.txt", "a b\n");

    let output = tokdump(&["--raw", arg(&file)]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "a\n \nb\n\n\n");
}

#[test]
fn test_files_are_printed_in_argument_order() {
    let dir = tempdir().unwrap();
    let second = fixture(&dir, "b.txt", "second");
    let first = fixture(&dir, "a.txt", "first");

    let output = tokdump(&["-sb", arg(&second), arg(&first)]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "second\nfirst\n");
}

#[test]
fn test_incompatible_flags_abort_without_output() {
    let dir = tempdir().unwrap();
    let file = fixture(&dir, "a.txt", "a b\n");

    let output = tokdump(&["-r", "-gs", arg(&file)]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("tokdump: error: flag --group-spaces is not compatible with"));
}

#[test]
fn test_missing_path_aborts_before_any_output() {
    let dir = tempdir().unwrap();
    let good = fixture(&dir, "good.txt", "hello\n");
    let missing = dir.path().join("missing.txt");

    let output = tokdump(&[arg(&good), arg(&missing)]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("missing.txt"));
}

#[test]
fn test_directory_is_rejected() {
    let dir = tempdir().unwrap();

    let output = tokdump(&[arg(dir.path())]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("is not a regular file or block device"));
}

#[test]
fn test_no_files_is_an_error() {
    let output = tokdump(&["-r"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("no input files given"));
}

#[test]
fn test_unknown_flag_is_an_error() {
    let dir = tempdir().unwrap();
    let file = fixture(&dir, "a.txt", "a\n");

    let output = tokdump(&["-x", arg(&file)]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("unknown flag passed: -x"));
}

#[test]
fn test_help_exits_successfully() {
    let output = tokdump(&["--help"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("--suppress-blank"));
    assert!(stdout(&output).contains("tokdump ./myfile.py ./myfile.c"));
}

#[test]
fn test_too_many_files() {
    let dir = tempdir().unwrap();
    let file = fixture(&dir, "a.txt", "a\n");
    let args: Vec<&str> = std::iter::repeat(arg(&file)).take(257).collect();

    let output = tokdump(&args);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("too many files were given (257), max supported is 256"));
}

#[test]
fn test_config_file_bounds_line_length() {
    let dir = tempdir().unwrap();
    let file = fixture(&dir, "long.txt", "abcdefgh\n");
    let config = fixture(&dir, "tokdump.toml", "[file_processor]\nmax_line_length = 4\n");

    let output = Command::new(env!("CARGO_BIN_EXE_tokdump"))
        .arg(arg(&file))
        .env("TOKDUMP_CONFIG", arg(&config))
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "abcd\nefgh\n(NEWLINE)\n");
}

#[test]
fn test_malformed_config_is_fatal() {
    let dir = tempdir().unwrap();
    let file = fixture(&dir, "a.txt", "a\n");
    let config = fixture(&dir, "bad.toml", "[file_processor\n");

    let output = Command::new(env!("CARGO_BIN_EXE_tokdump"))
        .arg(arg(&file))
        .env("TOKDUMP_CONFIG", arg(&config))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("bad.toml"));
}

#[test]
fn test_version_flags_are_unknown() {
    let dir = tempdir().unwrap();
    let file = fixture(&dir, "a.txt", "a\n");

    for flag in ["-V", "--version"] {
        let output = tokdump(&[flag, arg(&file)]);

        assert!(!output.status.success());
        assert!(output.stdout.is_empty());
        assert!(stderr(&output).contains(&format!("unknown flag passed: {}", flag)));
    }
}

#[test]
fn test_repeated_flags_are_accepted() {
    let dir = tempdir().unwrap();
    let file = fixture(&dir, "a.txt", "a b\n");

    let output = tokdump(&["-r", "--raw", arg(&file)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "a\n \nb\n\n\n");

    let output = tokdump(&["-sb", "--suppress-blank", arg(&file)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "a\nb\n");
}

#[test]
fn test_lone_dash_is_an_unknown_flag() {
    let output = tokdump(&["-"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("unknown flag passed: -"));
    assert!(!stderr(&output).contains("does not exist"));
}

#[test]
fn test_logged_errors_carry_a_single_level() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    let output = Command::new(env!("CARGO_BIN_EXE_tokdump"))
        .arg(arg(&missing))
        .env_remove("TOKDUMP_CONFIG")
        .env_remove("TOKDUMP_LOG_STRUCTURED")
        .env("RUST_LOG", "error")
        .output()
        .unwrap();

    let stderr = stderr(&output);
    assert!(!output.status.success());
    assert!(stderr.contains("E005 - "));
    assert!(!stderr.contains("[ERROR] E005"));
}

#[test]
fn test_config_file_accepts_warn_level() {
    let dir = tempdir().unwrap();
    let file = fixture(&dir, "a.txt", "a\n");
    let config = fixture(&dir, "tokdump.toml", "[logging]\nmin_log_level = \"warn\"\n");

    let output = Command::new(env!("CARGO_BIN_EXE_tokdump"))
        .arg(arg(&file))
        .env("TOKDUMP_CONFIG", arg(&config))
        .env_remove("TOKDUMP_LOG_LEVEL")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "a\n(NEWLINE)\n");
}
