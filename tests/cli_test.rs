use anyhow::Result;
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn run_binary(dir: &TempDir, args: &[&str], stdin: &str) -> Result<std::process::Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_delivery-filter"))
        .args(args)
        .current_dir(dir.path())
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut input) = child.stdin.take() {
        input.write_all(stdin.as_bytes())?;
    }
    Ok(child.wait_with_output()?)
}

#[test]
fn test_interactive_run_with_fixed_file_names() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(
        temp_dir.path().join("inputFile.txt"),
        "A1,5.5,district1,2024-01-01 10:00:00\nA2,bad,district1,2024-01-01 10:00:00\n",
    )?;

    let output = run_binary(
        &temp_dir,
        &[],
        "y\nnorth\ndistrict1\ny\n2024-01-01 09:45:00\n",
    )?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Change district? default: district1 (y/n)"));
    assert!(stdout.contains("District has invalid format."));
    assert!(stdout.contains("Filtering finished. Check the output file: outputFile.txt"));

    let written = fs::read_to_string(temp_dir.path().join("outputFile.txt"))?;
    assert_eq!(written, "A1,5.5,district1,2024-01-01 10:00:00\n");
    let log = fs::read_to_string(temp_dir.path().join("loggs.txt"))?;
    assert!(log.contains("weight has invalid format: 'bad'"));
    Ok(())
}

#[test]
fn test_closed_stdin_still_reaches_status_message() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let output = run_binary(&temp_dir, &[], "")?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Filtering finished."));
    assert!(temp_dir.path().join("loggs.txt").exists());
    Ok(())
}

#[test]
fn test_non_interactive_flags() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(
        temp_dir.path().join("orders.csv"),
        "A1,5.5,District4,2024-01-01 10:00:00\nA2,1,district4,2024-01-01 11:00:00\n",
    )?;

    let output = run_binary(
        &temp_dir,
        &[
            "--input",
            "orders.csv",
            "--output",
            "selected.csv",
            "--district",
            "district4",
            "--start",
            "2024-01-01 10:00:00",
            "--non-interactive",
        ],
        "",
    )?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(!stdout.contains("(y/n)"));
    let written = fs::read_to_string(temp_dir.path().join("selected.csv"))?;
    assert_eq!(written, "A1,5.5,District4,2024-01-01 10:00:00\n");
    Ok(())
}

#[test]
fn test_invalid_override_exits_with_error() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let output = run_binary(&temp_dir, &["--district", "uptown", "--non-interactive"], "")?;

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("loggs.txt").exists());
    Ok(())
}
