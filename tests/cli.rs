use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn cadl_run_draws_a_script() {
    let dir = tempdir().expect("create temp dir");
    let script = dir.path().join("miso.cadl");
    fs::write(
        &script,
        "// a happy cat\ncat Miso {\n  mood = \"happy\";\n}\ndraw Miso;\n",
    )
    .expect("write script");

    let mut cmd = Command::cargo_bin("cadl").expect("binary exists");
    cmd.arg("run").arg(&script);
    cmd.assert()
        .success()
        .stdout("   ^   ^   \n= ( ^w^ ) =\nMiso\n");
}

#[test]
fn cadl_eval_snippet() {
    let mut cmd = Command::cargo_bin("cadl").expect("binary exists");
    cmd.arg("eval").arg("cat noname; draw noname;");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("= ( o.o ) ="))
        .stdout(predicate::str::contains("noname").not());
}

#[test]
fn cadl_seed_makes_random_cats_reproducible() {
    let run = || {
        let mut cmd = Command::cargo_bin("cadl").expect("binary exists");
        cmd.args(["eval", "--seed", "42", "randomcat R; draw R; R = randomcat; draw R;"]);
        cmd.assert().success().get_output().stdout.clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn cadl_tokenize_lists_tokens() {
    let dir = tempdir().expect("create temp dir");
    let script = dir.path().join("tokens.cadl");
    fs::write(&script, "draw A; // done\n").expect("write script");

    let mut cmd = Command::cargo_bin("cadl").expect("binary exists");
    cmd.arg("tokenize").arg(&script);
    cmd.assert()
        .success()
        .stdout("DRAW draw\nID A\nSEMI ;\nEOF\n");
}

#[test]
fn cadl_reports_errors_and_fails() {
    let mut cmd = Command::cargo_bin("cadl").expect("binary exists");
    cmd.arg("eval").arg("cat A; A.mood = sad;");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("must be quoted"))
        .stderr(predicate::str::contains("example: mood = \"sad\";"));
}

#[test]
fn cadl_run_missing_file_fails() {
    let dir = tempdir().expect("create temp dir");
    let mut cmd = Command::cargo_bin("cadl").expect("binary exists");
    cmd.arg("run").arg(dir.path().join("absent.cadl"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}
