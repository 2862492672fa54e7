mod help;
mod plugin;

use chrono::{TimeZone, Utc};
use expect_test::{expect, Expect};
use flagval::{timestamp::layout, Command, Timestamp, TimestampConfig, TimestampFlag};

fn date(year: i32, month: u32, day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap().into()
}

fn report() -> Command {
    Command::new("report")
        .add_flag(
            TimestampFlag::new("start").alias("s").config(TimestampConfig::new(layout::DATE)),
        )
        .unwrap()
}

fn check(mut cmd: Command, args: &str, expect: Expect) {
    let args = args.split_ascii_whitespace().collect::<Vec<_>>();
    match cmd.parse(args) {
        Ok(()) => {
            let start = cmd.timestamp("start").map(|it| it.to_string());
            expect.assert_debug_eq(&start);
        }
        Err(err) => {
            expect.assert_eq(&err.to_string());
        }
    }
}

#[test]
fn smoke() {
    check(
        report(),
        "--start=2023-06-15",
        expect![[r#"
            Some(
                "2023-06-15 00:00:00 +00:00",
            )
        "#]],
    );
    check(
        report(),
        "--start 2023-06-15",
        expect![[r#"
            Some(
                "2023-06-15 00:00:00 +00:00",
            )
        "#]],
    );
    check(
        report(),
        "-s 2023-06-15 -s=2024-01-31",
        expect![[r#"
            Some(
                "2024-01-31 00:00:00 +00:00",
            )
        "#]],
    );

    check(
        report(),
        "--start=not-a-date",
        expect!["Can't parse `--start`, input contains invalid characters"],
    );
    check(report(), "--start", expect!["expected a value for `--start`"]);
    check(
        report(),
        "--stop 2023-06-15",
        expect!["Unknown flag: `--stop`. Use `--help` for more information"],
    );
    check(
        report(),
        "--start 2023-06-15T10:00",
        expect!["Can't parse `--start`, trailing input"],
    );
}

#[test]
fn end_to_end() {
    use chrono::Datelike;

    let mut cmd = report();
    cmd.parse(["--start=2023-06-15"]).unwrap();
    let start = cmd.timestamp("start").unwrap();
    assert_eq!((start.year(), start.month(), start.day()), (2023, 6, 15));
    assert!(cmd.is_set("start"));

    let mut cmd = report();
    cmd.parse(["--start=not-a-date"]).unwrap_err();
    assert!(cmd.timestamp("start").unwrap().is_zero());
    assert!(!cmd.is_set("start"));
}

#[test]
fn positional_args() {
    let mut cmd = report();
    cmd.parse(["a", "--start", "2023-06-15", "--", "--start"]).unwrap();
    assert_eq!(cmd.args(), ["a", "--start"]);
    assert_eq!(cmd.timestamp("start"), Some(date(2023, 6, 15)));
}

#[test]
fn parsing_again_starts_clean() {
    let mut cmd = report().add_subcommand(Command::new("daily"));
    cmd.parse(["daily", "x"]).unwrap();
    assert_eq!(cmd.subcommand().map(Command::name), Some("daily"));
    assert_eq!(cmd.subcommand().unwrap().args(), ["x"]);

    cmd.parse(["--start", "2023-06-15", "a"]).unwrap();
    assert!(cmd.subcommand().is_none());
    assert_eq!(cmd.args(), ["a"]);

    cmd.parse(["b"]).unwrap();
    assert_eq!(cmd.args(), ["b"]);
    assert_eq!(cmd.timestamp("start"), Some(date(2023, 6, 15)));
}
