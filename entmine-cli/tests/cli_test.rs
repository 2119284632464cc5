//! End-to-end tests of the `entmine` binary.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn entmine() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_entmine"));
    cmd.env("ENTMINE_LOG", "error");
    cmd
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn write_fixture(dir: &Path) {
    fs::write(
        dir.join("entities.tsv"),
        "id\tenwiki\tinstance_of\nQ60\tNew York City\tQ515\nQ1384\tNew York (state)\tQ35657\n",
    )
    .unwrap();
    fs::write(dir.join("redirects.tsv"), "NYC\tNew York City\n").unwrap();

    let mut docs = String::new();
    for i in 0..4 {
        docs.push_str(&format!(
            "Doc {i}\tShe moved to New York in {i}\tNew York\tNYC\n"
        ));
    }
    docs.push_str("Other\tnothing relevant here\tplace\tNew York City\n");
    fs::write(dir.join("docs.tsv"), docs).unwrap();

    fs::write(dir.join("candidates.tsv"), "New York\t10\nnothing\t1\n").unwrap();
}

#[test]
fn test_mine_writes_resolved_entities() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let output = dir.path().join("out.tsv");

    let status = entmine()
        .arg("mine")
        .arg("--root")
        .arg(dir.path())
        .arg("--candidates")
        .arg(dir.path().join("candidates.tsv"))
        .arg("--index")
        .arg(dir.path().join("docs.tsv"))
        .arg("--redirects")
        .arg(dir.path().join("redirects.tsv"))
        .arg("--entities")
        .arg(dir.path().join("entities.tsv"))
        .arg("--output")
        .arg(&output)
        .arg("--minimum-mentions")
        .arg("2")
        .arg("-j")
        .arg("2")
        .output()
        .unwrap();
    assert!(status.status.success(), "{}", String::from_utf8_lossy(&status.stderr));

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 1, "{written}");
    let fields: Vec<&str> = lines[0].split('\t').collect();
    assert_eq!(fields[0], "New York");
    assert_eq!(fields[1], "4");
    assert!(fields[2].starts_with("Q60:4:4:"), "{}", fields[2]);
}

#[test]
fn test_mine_reports_stats_json() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    fs::write(
        dir.path().join("entmine.toml"),
        format!(
            "[inputs]\nindex = {:?}\nentities = {:?}\nredirects = {:?}\n\n[scoring]\nminimum_mentions = 2\n",
            dir.path().join("docs.tsv"),
            dir.path().join("entities.tsv"),
            dir.path().join("redirects.tsv"),
        ),
    )
    .unwrap();

    let mut cmd = entmine();
    cmd.arg("mine").arg("--root").arg(dir.path()).arg("--stats-json");
    let out = run_with_stdin(cmd, "New York\t10\n");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("New York\t4\t"), "{stdout}");
    let stderr = String::from_utf8(out.stderr).unwrap();
    let json = stderr
        .lines()
        .find(|l| l.starts_with('{'))
        .expect("stats line on stderr");
    let stats: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(stats["read"], 1);
    assert_eq!(stats["emitted"], 1);
}

#[test]
fn test_mine_without_index_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let out = entmine()
        .arg("mine")
        .arg("--root")
        .arg(dir.path())
        .arg("--entities")
        .arg(dir.path().join("entities.tsv"))
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("inputs.index"), "{stderr}");
}

#[test]
fn test_subset_selects_trusted_phrases() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("entities.tsv");
    fs::write(
        &input,
        "Berlin\t80\tQ64:75:70:93%\tQ821244:5:0:6%\n\
         Paris\t80\tQ90:50:40:62%\tQ167646:30:20:37%\n\
         UK\t90\tQ145:88:80:97%\n",
    )
    .unwrap();

    let out = entmine()
        .arg("subset")
        .arg("--root")
        .arg(dir.path())
        .arg("--input")
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "Berlin\tQ64\n");
}

#[test]
fn test_decode_rewrites_stdin() {
    let mut cmd = entmine();
    cmd.arg("decode");
    let out = run_with_stdin(cmd, "Caf&eacute; &#8220;Noir&#8221;\nAT&amp;T\n");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Café "), "{stdout}");
    assert_eq!(lines[1], "AT&T");
}
