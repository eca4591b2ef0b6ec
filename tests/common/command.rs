use crate::common::file::{FileSpec, write_file};
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
    run_loose_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository holding `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn nested_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let root = init_repository_dir.path();
    write_file(FileSpec::new(root.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(root.join("a").join("2.txt"), "two".to_string()));
    write_file(FileSpec::new(
        root.join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    init_repository_dir
}

pub fn run_loose_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("loose").expect("Failed to find loose binary");
    cmd.env_remove("LOOSE_DIR");
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn loose_commit_tree(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = run_loose_command(dir, &["commit-tree"]);
    cmd.args(args);
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", "fake_user"),
        ("GIT_AUTHOR_EMAIL", "fake_email@email.com"),
        ("GIT_AUTHOR_DATE", "2023-01-01 12:00:00 +0000"), // %Y-%m-%d %H:%M:%S %z
    ]);
    cmd
}
