use crate::common::command::{init_repository_dir, nested_repository_dir, run_loose_command};
use crate::common::stdout_of;
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild, PathCreateDir};
use bytes::Bytes;
use loose::areas::database::Database;
use loose::artifacts::objects::object::Object;
use loose::artifacts::objects::object_type::ObjectType;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

const ROOT_TREE_OID: &str = "88484bd9e7919fa9b7dfeb008fb8f6c85743d171";
const A_TREE_OID: &str = "202bc192d34beb85d0301ec8c8940cd0252cc48a";
const EMPTY_TREE_OID: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

#[rstest]
fn write_tree_for_nested_project(
    nested_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_loose_command(nested_repository_dir.path(), &["write-tree"])
        .assert()
        .success()
        .stdout(format!("{ROOT_TREE_OID}\n"));

    Ok(())
}

#[rstest]
fn ls_tree_lists_entries_in_stored_order(
    nested_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_loose_command(nested_repository_dir.path(), &["write-tree"])
        .assert()
        .success();

    let expected_output = format!(
        "100644 blob 43dd47ea691c90a5fa7827892c70241913351963\t1.txt\n\
         040000 tree {A_TREE_OID}\ta\n"
    );
    let actual_output = run_loose_command(nested_repository_dir.path(), &["ls-tree", ROOT_TREE_OID])
        .assert()
        .success();
    let actual_output = String::from_utf8(actual_output.get_output().stdout.clone())?;

    assert_eq!(actual_output, expected_output);

    Ok(())
}

#[rstest]
fn ls_tree_name_only(nested_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_loose_command(nested_repository_dir.path(), &["write-tree"])
        .assert()
        .success();

    run_loose_command(
        nested_repository_dir.path(),
        &["ls-tree", "--name-only", A_TREE_OID],
    )
    .assert()
    .success()
    .stdout("2.txt\nb\n");

    Ok(())
}

#[rstest]
fn cat_file_pretty_prints_trees(
    nested_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_loose_command(nested_repository_dir.path(), &["write-tree"])
        .assert()
        .success();

    run_loose_command(nested_repository_dir.path(), &["cat-file", "-p", A_TREE_OID])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "100644 blob 64c5e5885a4b06010b3a0c20edb7900dd0311025\t2.txt\n",
        ))
        .stdout(predicate::str::contains(
            "040000 tree d864f7793fd2952c217c27d3780442f8943c8663\tb\n",
        ));

    Ok(())
}

#[rstest]
fn write_tree_skips_hidden_and_empty_directories(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("empty").create_dir_all()?;
    init_repository_dir.child(".hidden").write_str("secret")?;

    run_loose_command(init_repository_dir.path(), &["write-tree"])
        .assert()
        .success()
        .stdout(format!("{EMPTY_TREE_OID}\n"));

    run_loose_command(init_repository_dir.path(), &["ls-tree", EMPTY_TREE_OID])
        .assert()
        .success()
        .stdout("");

    Ok(())
}

#[rstest]
fn write_tree_is_deterministic(
    nested_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let first = stdout_of(
        run_loose_command(nested_repository_dir.path(), &["write-tree"])
            .assert()
            .success(),
    );
    let second = stdout_of(
        run_loose_command(nested_repository_dir.path(), &["write-tree"])
            .assert()
            .success(),
    );
    nested_repository_dir
        .child("a")
        .child("b")
        .child("3.txt")
        .write_str("Three")?;
    let changed = stdout_of(
        run_loose_command(nested_repository_dir.path(), &["write-tree"])
            .assert()
            .success(),
    );

    assert_eq!(first, second);
    assert_ne!(first, changed);

    Ok(())
}

#[rstest]
fn ls_tree_of_blob_fails(nested_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_loose_command(nested_repository_dir.path(), &["write-tree"])
        .assert()
        .success();

    run_loose_command(
        nested_repository_dir.path(),
        &["ls-tree", "43dd47ea691c90a5fa7827892c70241913351963"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("Not a tree object"));

    Ok(())
}

#[rstest]
fn ls_tree_lists_names_that_are_not_utf8(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let database = Database::new(
        init_repository_dir
            .path()
            .join(".git")
            .join("objects")
            .into_boxed_path(),
    );
    let blob = Object::new(ObjectType::Blob, Bytes::from_static(b"one"));
    let blob_oid = database.store(&blob, false)?;
    let mut content = b"100644 caf\xe9.txt\0".to_vec();
    content.extend_from_slice(blob_oid.as_bytes());
    let tree_oid = database
        .store(&Object::new(ObjectType::Tree, content), false)?
        .to_string();

    run_loose_command(init_repository_dir.path(), &["ls-tree", &tree_oid])
        .assert()
        .success()
        .stdout(format!("100644 blob {blob_oid}\tcaf\u{fffd}.txt\n"));
    run_loose_command(init_repository_dir.path(), &["ls-tree", "--name-only", &tree_oid])
        .assert()
        .success()
        .stdout(&b"caf\xe9.txt\n"[..]);

    Ok(())
}
