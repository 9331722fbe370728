use std::process::Command;

use indoc::indoc;

fn tree_json() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tree-json"))
}

#[test]
fn groups_numbers_per_key() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("words.txt");
    let output = dir.path().join("index.json");
    std::fs::write(&input, "two 2 1\none 1\n\ntwo 1\nempty\n")?;

    let status = tree_json().arg(&input).arg(&output).status()?;
    assert!(status.success());

    let written = std::fs::read_to_string(&output)?;
    assert_eq!(
        written,
        "{\n\t\"empty\": [\n\t],\n\t\"one\": [\n\t\t1\n\t],\n\t\"two\": [\n\t\t1,\n\t\t2\n\t]\n}\n"
    );
    Ok(())
}

#[test]
fn prints_to_stdout_without_output_path() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("words.txt");
    std::fs::write(&input, "a 3\n")?;

    let out = tree_json().arg(&input).output()?;
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout)?,
        indoc! {"
            {
            \t\"a\": [
            \t\t3
            \t]
            }
        "}
    );
    Ok(())
}

#[test]
fn exit_codes() -> anyhow::Result<()> {
    assert_eq!(tree_json().output()?.status.code(), Some(1));

    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing.txt");
    assert_eq!(tree_json().arg(&missing).output()?.status.code(), Some(2));

    let bad = dir.path().join("bad.txt");
    std::fs::write(&bad, "ok 1\nbad one\n")?;
    let out = tree_json().arg(&bad).output()?;
    assert_eq!(out.status.code(), Some(3));
    assert!(String::from_utf8(out.stderr)?.contains(":2:"));
    Ok(())
}
