use crate::common::COMMIT_DATE;
use crate::common::file::write_file;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_bitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// A repository whose master branch tracks `f.txt` ("wug") and `g.txt` ("not wug")
#[fixture]
pub fn two_files_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    write_file(dir, "f.txt", "wug");
    write_file(dir, "g.txt", "not wug");

    bitlet_add(dir, "f.txt");
    bitlet_add(dir, "g.txt");
    bitlet_commit(dir, "Two files").assert().success();

    init_repository_dir
}

pub fn run_bitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bitlet").expect("Failed to find bitlet binary");
    cmd.current_dir(dir)
        .env_remove("BITLET_DIR")
        .env_remove("BITLET_LOG")
        .env("BITLET_COMMIT_DATE", COMMIT_DATE);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn bitlet_commit(dir: &Path, message: &str) -> Command {
    run_bitlet_command(dir, &["commit", message])
}

/// Stage a file and insist the command printed nothing
pub fn bitlet_add(dir: &Path, file_name: &str) {
    run_bitlet_command(dir, &["add", file_name])
        .assert()
        .success()
        .stdout("");
}

pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = run_bitlet_command(dir, args)
        .output()
        .expect("Failed to run bitlet");
    assert!(output.status.success(), "bitlet {args:?} failed: {output:?}");

    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}

/// Id of the commit a branch points to, read straight from the ref file
pub fn branch_head(dir: &Path, branch: &str) -> String {
    std::fs::read_to_string(dir.join(".bitlet").join("branches").join(branch))
        .unwrap_or_else(|e| panic!("Failed to read branch {branch}: {e}"))
        .trim()
        .to_string()
}

/// `commit <id>` lines of a `log` or `global-log` listing, in order
pub fn logged_commit_ids(log: &str) -> Vec<String> {
    log.lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}
