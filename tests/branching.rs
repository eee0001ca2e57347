use crate::common::command::{
    bitlet_add, bitlet_commit, branch_head, init_repository_dir, run_bitlet_command, stdout_of,
    two_files_repository_dir,
};
use crate::common::file::{read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

/// `two_files_repository_dir` plus a branch `other` whose head edits `f.txt`,
/// drops `g.txt` and adds `h.txt`; master is checked out again afterwards
fn with_other_branch(dir: &std::path::Path) {
    run_bitlet_command(dir, &["branch", "other"])
        .assert()
        .success()
        .stdout("");
    run_bitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("");

    write_file(dir, "f.txt", "wug on other");
    bitlet_add(dir, "f.txt");
    run_bitlet_command(dir, &["rm", "g.txt"])
        .assert()
        .success();
    write_file(dir, "h.txt", "only on other");
    bitlet_add(dir, "h.txt");
    bitlet_commit(dir, "Other work").assert().success();

    run_bitlet_command(dir, &["checkout", "master"])
        .assert()
        .success()
        .stdout("");
}

#[rstest]
fn branch_points_at_head_without_switching(two_files_repository_dir: TempDir) {
    let dir = two_files_repository_dir.path();

    run_bitlet_command(dir, &["branch", "feature"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(branch_head(dir, "feature"), branch_head(dir, "master"));
    two_files_repository_dir
        .child(".bitlet/head")
        .assert("master");
}

#[rstest]
fn duplicate_branch_is_refused(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["branch", "master"])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");
}

#[rstest]
#[case("a/b")]
#[case("..")]
#[case("topic.lock")]
fn branch_names_unusable_as_ref_files_are_refused(
    init_repository_dir: TempDir,
    #[case] name: &str,
) {
    run_bitlet_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .success()
        .stdout(format!("Invalid branch name: {name}\n"));
}

#[rstest]
fn rm_branch_deletes_only_the_pointer(two_files_repository_dir: TempDir) {
    let dir = two_files_repository_dir.path();
    with_other_branch(dir);
    let other_head = branch_head(dir, "other");

    run_bitlet_command(dir, &["rm-branch", "other"])
        .assert()
        .success()
        .stdout("");

    two_files_repository_dir
        .child(".bitlet/branches/other")
        .assert(predicate::path::missing());
    assert_eq!(
        stdout_of(dir, &["find", "Other work"]),
        format!("{other_head}\n")
    );
}

#[rstest]
#[case::missing_branch("ghost", "A branch with that name does not exist.\n")]
#[case::current_branch("master", "Cannot remove the current branch.\n")]
fn rm_branch_refusals(
    init_repository_dir: TempDir,
    #[case] name: &str,
    #[case] expected: &str,
) {
    run_bitlet_command(init_repository_dir.path(), &["rm-branch", name])
        .assert()
        .success()
        .stdout(expected.to_string());
}

#[rstest]
fn checkout_branch_rewrites_the_working_tree(two_files_repository_dir: TempDir) {
    let dir = two_files_repository_dir.path();
    with_other_branch(dir);

    run_bitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(dir, "f.txt"), "wug on other");
    assert_eq!(read_file(dir, "h.txt"), "only on other");
    two_files_repository_dir
        .child("g.txt")
        .assert(predicate::path::missing());
    two_files_repository_dir
        .child(".bitlet/head")
        .assert("other");

    run_bitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    assert_eq!(read_file(dir, "f.txt"), "wug");
    assert_eq!(read_file(dir, "g.txt"), "not wug");
    two_files_repository_dir
        .child("h.txt")
        .assert(predicate::path::missing());
}

#[rstest]
#[case::missing_branch("ghost", "No such branch exists.\n")]
#[case::current_branch("master", "No need to checkout the current branch.\n")]
fn checkout_branch_refusals(
    init_repository_dir: TempDir,
    #[case] name: &str,
    #[case] expected: &str,
) {
    run_bitlet_command(init_repository_dir.path(), &["checkout", name])
        .assert()
        .success()
        .stdout(expected.to_string());
}

#[rstest]
fn checkout_refuses_to_clobber_untracked_files(two_files_repository_dir: TempDir) {
    let dir = two_files_repository_dir.path();
    with_other_branch(dir);
    write_file(dir, "h.txt", "precious untracked work");

    run_bitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it or add it first.\n");

    assert_eq!(read_file(dir, "h.txt"), "precious untracked work");
    assert_eq!(read_file(dir, "f.txt"), "wug");
    two_files_repository_dir
        .child(".bitlet/head")
        .assert("master");
}

#[rstest]
fn checkout_file_restores_the_head_version(two_files_repository_dir: TempDir) {
    let dir = two_files_repository_dir.path();
    write_file(dir, "f.txt", "scribbles");
    write_file(dir, "g.txt", "more scribbles");

    run_bitlet_command(dir, &["checkout", "--", "f.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(dir, "f.txt"), "wug");
    assert_eq!(read_file(dir, "g.txt"), "more scribbles");
}

#[rstest]
fn checkout_file_from_an_abbreviated_commit(two_files_repository_dir: TempDir) {
    let dir = two_files_repository_dir.path();
    let two_files = branch_head(dir, "master");
    write_file(dir, "f.txt", "newer wug");
    bitlet_add(dir, "f.txt");
    bitlet_commit(dir, "Newer wug").assert().success();

    run_bitlet_command(dir, &["checkout", &two_files[..8], "--", "f.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(dir, "f.txt"), "wug");
}

#[rstest]
#[case::unknown_commit("0000000", "g.txt", "No commit with that id exists.\n")]
#[case::untracked_name("", "nope.txt", "File does not exist in that commit.\n")]
fn checkout_file_refusals(
    two_files_repository_dir: TempDir,
    #[case] prefix: &str,
    #[case] file_name: &str,
    #[case] expected: &str,
) {
    let dir = two_files_repository_dir.path();
    let prefix = if prefix.is_empty() {
        branch_head(dir, "master")
    } else {
        prefix.to_string()
    };

    run_bitlet_command(dir, &["checkout", &prefix, "--", file_name])
        .assert()
        .success()
        .stdout(expected.to_string());
}

#[rstest]
fn reset_moves_the_current_branch_and_the_tree(two_files_repository_dir: TempDir) {
    let dir = two_files_repository_dir.path();
    let two_files = branch_head(dir, "master");
    write_file(dir, "f.txt", "changed");
    bitlet_add(dir, "f.txt");
    write_file(dir, "h.txt", "added");
    bitlet_add(dir, "h.txt");
    bitlet_commit(dir, "Changes").assert().success();

    run_bitlet_command(dir, &["reset", &two_files[..10]])
        .assert()
        .success()
        .stdout("");

    assert_eq!(branch_head(dir, "master"), two_files);
    assert_eq!(read_file(dir, "f.txt"), "wug");
    two_files_repository_dir
        .child("h.txt")
        .assert(predicate::path::missing());
}

#[rstest]
fn reset_clears_staging(two_files_repository_dir: TempDir) {
    let dir = two_files_repository_dir.path();
    let head = branch_head(dir, "master");
    write_file(dir, "f.txt", "staged edit");
    bitlet_add(dir, "f.txt");

    run_bitlet_command(dir, &["reset", &head])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(dir, "f.txt"), "wug");
    bitlet_commit(dir, "nothing")
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
}

#[rstest]
fn reset_to_an_unknown_commit_is_refused(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["reset", "zzzz"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
}
