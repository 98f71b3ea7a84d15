extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn area() -> Command {
    let mut cmd = Command::cargo_bin("area").unwrap();
    cmd.args(&["-t", "1", "-i", "200"]);
    cmd
}

#[test]
fn plain_output_is_a_single_number() {
    let output = area().args(&["-n", "20000"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: f64 = stdout.trim().parse().unwrap();
    assert!((value - 1.5066).abs() < 0.15, "estimated {}", value);
}

#[test]
fn grid_detail_reports_every_field() {
    area()
        .args(&["-m", "grid", "-s", "80x80", "-f", "detail"])
        .assert()
        .success()
        .stdout(predicate::str::contains("method=grid"))
        .stdout(predicate::str::contains("samples=6400"))
        .stdout(predicate::str::contains("area="));
}

#[test]
fn monte_carlo_detail_has_an_error_bar() {
    area()
        .args(&["-n", "5000", "--seed", "3", "-f", "detail"])
        .assert()
        .success()
        .stdout(predicate::str::contains("method=montecarlo"))
        .stdout(predicate::str::contains("stderr="));
}

#[test]
fn same_seed_same_answer() {
    let run = || {
        area()
            .args(&["-n", "10000", "--seed", "11"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn negative_corners_are_accepted() {
    area()
        .args(&["-m", "grid", "-s", "10x10", "-l", "-0.1,-0.1", "-r", "0.1,0.1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.04000000"));
}

#[test]
fn inverted_region_fails() {
    area()
        .args(&["-l", "1,1", "-r", "-1,-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid region"));
}

#[test]
fn bad_method_fails() {
    area().args(&["-m", "simpson"]).assert().failure();
}

#[test]
fn zero_threads_fails() {
    Command::cargo_bin("area")
        .unwrap()
        .args(&["-t", "0"])
        .assert()
        .failure();
}

#[test]
fn image_is_written_as_pgm() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("set.pgm");
    area()
        .args(&["-m", "grid", "-s", "40x30", "--image"])
        .arg(&path)
        .assert()
        .success();
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"P5"));
    assert!(bytes.len() > 40 * 30);
}

#[test]
fn unmeasurable_region_fails_instead_of_printing_nan() {
    for method in &["grid", "montecarlo"] {
        area()
            .args(&["-m", *method, "-s", "10x10", "-n", "100"])
            .args(&["-l", "-1e308,-1", "-r", "1e308,1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid region"));
    }
}

#[test]
fn oversized_grid_is_rejected() {
    area()
        .args(&["-m", "grid", "-s", "4294967296x4294967296"])
        .assert()
        .failure();
}
