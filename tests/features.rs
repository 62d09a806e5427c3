use std::process::Command;

use assert_cmd::prelude::*;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;

fn relzet() -> Command {
    Command::cargo_bin("relzet").unwrap()
}

fn path_with(temp: &TempDir, name: &str, contents: &str) -> String {
    let f = temp.child(name);
    f.write_str(contents).unwrap();
    f.path().to_str().unwrap().to_string()
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.unwrap();
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn requires_an_operation() {
    relzet().assert().failure();
}

#[test]
fn union_allows_empty_arg_list() {
    relzet().arg("union").assert().success().stdout("[]\n");
}

#[test]
fn fail_on_missing_file() {
    relzet()
        .args(["union", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Can't read file: x"));
}

#[test]
fn fail_on_a_file_not_holding_an_array() {
    let temp = TempDir::new().unwrap();
    let x = path_with(&temp, "x.json", r#"{"a": 1}"#);
    relzet()
        .args(["union", &x])
        .assert()
        .failure()
        .stderr(predicate::str::contains("holds a record, not a JSON array"));
}

#[test]
fn single_argument_just_prints_the_unique_values() {
    let temp = TempDir::new().unwrap();
    let x = path_with(&temp, "x.json", r#"["x", "X", 1, {"a": [1]}, "x", 1.0, {"a": [1]}]"#);
    let out = stdout_of(relzet().args(["intersect", &x]));
    assert_eq!(out, "[\"x\",\"X\",1,{\"a\":[1]}]\n");
}

#[test]
fn intersect_prints_values_in_the_order_they_appear_in_the_first_file() {
    let temp = TempDir::new().unwrap();
    let x = path_with(&temp, "x.json", r#"["x", "X", "Ex", "Eks", "x", "x", "X"]"#);
    let y = path_with(&temp, "y.json", r#"["Ex", "x", "y", "Y", "Eks", "y"]"#);
    assert_eq!(stdout_of(relzet().args(["intersect", &x, &y])), "[\"x\",\"Ex\",\"Eks\"]\n");
    assert_eq!(
        stdout_of(relzet().args(["intersect-all", &x, &y])),
        "[\"x\",\"x\",\"x\",\"Ex\",\"Eks\"]\n"
    );
    assert_eq!(stdout_of(relzet().args(["except", &x, &y])), "[\"X\"]\n");
}

#[test]
fn inner_join_by_key() {
    let temp = TempDir::new().unwrap();
    let people = path_with(&temp, "people.json", r#"[{"id": 1, "n": "ann"}, {"id": 2, "n": "bob"}]"#);
    let pets = path_with(&temp, "pets.json", r#"[{"id": 2, "pet": "rex"}]"#);
    let out = stdout_of(relzet().args(["inner", "--key", ".id", &people, &pets]));
    assert_eq!(out, "[{\"key\":2,\"left\":{\"id\":2,\"n\":\"bob\"},\"right\":{\"id\":2,\"pet\":\"rex\"}}]\n");
}

#[test]
fn left_join_keeps_unmatched_left_values() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.json", r#"[{"k": 1}, {"k": 2}]"#);
    let b = path_with(&temp, "b.json", r#"[{"k": 1}, {"k": 3}]"#);
    let out = stdout_of(relzet().args(["left", "-k", "k", &a, &b]));
    assert_eq!(out, "[{\"key\":1,\"left\":{\"k\":1},\"right\":{\"k\":1}},{\"key\":2,\"left\":{\"k\":2}}]\n");
}

#[test]
fn separate_keys_for_each_side() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.json", r#"[{"id": 1}, {"id": 2}]"#);
    let b = path_with(&temp, "b.json", r#"[{"owner": 2}]"#);
    let out = stdout_of(relzet().args(["semi", "--left-key", ".id", "--right-key", ".owner", &a, &b]));
    assert_eq!(out, "[{\"id\":2}]\n");
}

#[test]
fn json_lines_in_and_out() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.jsonl", "{\"k\": 1}\n{\"k\": 2}\n\n");
    let b = path_with(&temp, "b.jsonl", "{\"k\": 2}\n");
    let out = stdout_of(relzet().args(["anti", "--lines", "--key", ".k", &a, &b]));
    assert_eq!(out, "{\"k\":1}\n");
}

#[test]
fn index_all_prints_an_object() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.json", r#"[{"t": "x", "v": 1}, {"t": "y", "v": 2}, {"t": "x", "v": 3}]"#);
    let out = stdout_of(relzet().args(["index-all", "-k", ".t", &a]));
    assert_eq!(
        out,
        "{\"x\":[{\"t\":\"x\",\"v\":1},{\"t\":\"x\",\"v\":3}],\"y\":[{\"t\":\"y\",\"v\":2}]}\n"
    );
}

#[test]
fn sql_nulls_never_match() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.json", r#"[{"v": 1}]"#);
    let b = path_with(&temp, "b.json", r#"[{"v": 2}]"#);
    let safe = stdout_of(relzet().args(["inner", "-k", ".k", &a, &b]));
    assert_eq!(safe, "[{\"key\":null,\"left\":{\"v\":1},\"right\":{\"v\":2}}]\n");
    let sql = stdout_of(relzet().args(["inner", "-k", ".k", "--nulls", "sql", &a, &b]));
    assert_eq!(sql, "[]\n");
}

#[test]
fn joins_need_exactly_two_files() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.json", "[]");
    relzet()
        .args(["full", &a])
        .assert()
        .failure()
        .stderr(predicate::str::contains("full takes exactly 2 files, got 1"));
}

#[test]
fn bad_key_paths_are_rejected() {
    relzet()
        .args(["inner", "--key", "a..b", "x", "y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid key path"));
}

#[test]
fn pretty_output() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.json", "[1]");
    assert_eq!(stdout_of(relzet().args(["union", "--pretty", &a])), "[\n  1\n]\n");
}
