use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("selpg").unwrap();
    cmd.env_remove("SELPG_PRINT_COMMAND").env_remove("RUST_LOG");
    cmd
}

/// 100 numbered lines; lines 50 and 100 also carry a form feed.
fn sample_input() -> Vec<u8> {
    let mut data = Vec::new();
    for i in 1..=100 {
        if i % 50 == 0 {
            write!(data, "{}\x0C\n", i).unwrap();
        } else {
            writeln!(data, "{}", i).unwrap();
        }
    }
    data
}

fn sample_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&sample_input()).unwrap();
    file.flush().unwrap();
    file
}

fn numbered(range: std::ops::RangeInclusive<u32>) -> String {
    range.map(|i| format!("{}\n", i)).collect()
}

#[test]
fn line_count_pages_from_file() {
    let file = sample_file();
    cmd()
        .args(["-q", "-s2", "-e3", "-l10"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(numbered(11..=30));
}

#[test]
fn form_feed_first_page() {
    let file = sample_file();
    let mut expected = numbered(1..=49);
    expected.push_str("50\x0C");
    cmd()
        .args(["-q", "-s1", "-e1", "-f"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn reads_stdin_when_no_input_file() {
    cmd()
        .args(["-q", "-s2", "-e3", "-l10"])
        .write_stdin(sample_input())
        .assert()
        .success()
        .stdout(numbered(11..=30));
}

#[test]
fn start_page_beyond_input() {
    let file = sample_file();
    for mode in ["-l10", "-f"] {
        cmd()
            .args(["-q", "-s200", "-e210", mode])
            .arg(file.path())
            .assert()
            .code(10)
            .stdout("")
            .stderr(predicate::str::contains(
                "start_page (200) greater than total pages",
            ));
    }
}

#[test]
fn end_page_beyond_input_writes_tail() {
    let file = sample_file();
    cmd()
        .args(["-q", "-s10", "-e12", "-l10"])
        .arg(file.path())
        .assert()
        .code(10)
        .stdout(numbered(91..=99) + "100\x0C\n")
        .stderr(predicate::str::contains("less output than expected"));
}

#[test]
fn empty_input_is_start_beyond_input() {
    cmd()
        .args(["-q", "-s1", "-e1"])
        .write_stdin("")
        .assert()
        .code(10)
        .stdout("")
        .stderr(predicate::str::contains("start_page (1) greater than total pages (0)"));
}

#[test]
fn missing_end_page_is_not_enough_arguments() {
    cmd()
        .arg("-s1")
        .write_stdin("never read\n")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("not enough arguments"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn no_arguments_is_not_enough_arguments() {
    cmd().assert().code(1);
}

#[test]
fn validation_statuses() {
    let cases: &[(&[&str], i32, &str)] = &[
        (&["-s0", "-e1"], 2, "invalid start page 0"),
        (&["-sabc", "-e1"], 2, "invalid start page abc"),
        (&["-s", "-4", "-e1"], 2, "invalid start page -4"),
        (&["-s3", "-e2"], 3, "invalid end page 2"),
        (&["-s1", "-e1", "-l0"], 4, "invalid page length 0"),
        (&["-s1", "-e1", "-l10", "-f"], 5, "mutually exclusive"),
        (&["-s1", "-e1", "/nonexistent/selpg-input"], 6, "does not exist"),
    ];

    for (args, code, message) in cases {
        cmd()
            .args(*args)
            .assert()
            .code(*code)
            .stdout("")
            .stderr(predicate::str::contains(*message));
    }
}

#[test]
fn directory_input_cannot_be_opened() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["-q", "-s1", "-e1"])
        .arg(dir.path())
        .assert()
        .code(7)
        .stdout("")
        .stderr(predicate::str::contains("could not open input file"));
}

#[test]
fn unknown_flag_is_usage_error() {
    cmd()
        .args(["-s1", "-e1", "--bogus"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn help_exits_successfully() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--start-page"))
        .stdout(predicate::str::contains("--form-feed"));
}

#[test]
fn summary_goes_to_stderr() {
    cmd()
        .args(["-s1", "-e1", "-l5"])
        .write_stdin(numbered(1..=5))
        .assert()
        .success()
        .stdout(numbered(1..=5))
        .stderr(predicate::str::contains("start_page: 1"))
        .stderr(predicate::str::contains("page_length: 5"));
}

#[test]
fn json_summary() {
    let output = cmd()
        .args(["--json", "-s1", "-e2", "-f", "-dlp0", "--print-command", "sh -c cat"])
        .write_stdin("a\x0Cb")
        .assert()
        .success()
        .stdout("a\x0Cb")
        .get_output()
        .clone();

    let stderr = String::from_utf8(output.stderr).unwrap();
    let summary: serde_json::Value = serde_json::from_str(stderr.lines().next().unwrap()).unwrap();
    assert_eq!(summary["start"], 1);
    assert_eq!(summary["end"], 2);
    assert_eq!(summary["page_type"], "form_feed");
    assert_eq!(summary["input"], "-");
    assert_eq!(summary["print_destination"]["name"], "lp0");
}

#[cfg(unix)]
#[test]
fn print_destination_pipes_through_command() {
    // The print command inherits stdout, so `cat` output lands on ours.
    cmd()
        .args(["-q", "-s2", "-e3", "-l10", "-dlp0", "--print-command", "sh -c cat"])
        .write_stdin(sample_input())
        .assert()
        .success()
        .stdout(numbered(11..=30));
}

#[cfg(unix)]
#[test]
fn print_command_from_environment() {
    Command::cargo_bin("selpg")
        .unwrap()
        .env("SELPG_PRINT_COMMAND", "sh -c cat")
        .args(["-q", "-s1", "-e1", "-dlp0"])
        .write_stdin("only page\n")
        .assert()
        .success()
        .stdout("only page\n");
}

#[cfg(unix)]
#[test]
fn destination_is_passed_as_dash_d() {
    // Empty input keeps the pipe unwritten, so `echo` exiting early is harmless.
    cmd()
        .args(["-q", "-s1", "-e1", "-dlaser", "--print-command", "echo"])
        .write_stdin("")
        .assert()
        .code(10)
        .stdout("-dlaser\n");
}

#[test]
fn missing_print_command_fails_before_output() {
    cmd()
        .args([
            "-q",
            "-s1",
            "-e1",
            "-dlp0",
            "--print-command",
            "selpg-no-such-print-command",
        ])
        .write_stdin("x\n")
        .assert()
        .code(8)
        .stdout("")
        .stderr(predicate::str::contains("could not start print command"));
}

#[cfg(unix)]
#[test]
fn failing_print_command_is_reported() {
    cmd()
        .args(["-q", "-s1", "-e1", "-dlp0", "--print-command", "false"])
        .write_stdin("")
        .assert()
        .code(9)
        .stderr(predicate::str::contains("print command `false -dlp0` exited with"));
}

#[test]
fn running_twice_gives_identical_output() {
    let file = sample_file();
    let run = || {
        cmd()
            .args(["-q", "-s3", "-e7", "-l9"])
            .arg(file.path())
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());
}
