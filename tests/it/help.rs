use expect_test::expect;
use flagval::{timestamp::layout, Command, TimestampConfig, TimestampFlag};

use crate::date;

fn report() -> Command {
    let date_config = || TimestampConfig::new(layout::DATE);
    Command::new("report")
        .set_about("Prints a report.")
        .add_flag(
            TimestampFlag::new("start")
                .alias("s")
                .usage("Start of the window.")
                .value(date(2023, 1, 1))
                .config(date_config())
                .env("FLAGVAL_HELP_START"),
        )
        .unwrap()
        .add_flag(TimestampFlag::new("until").config(date_config()).required(true))
        .unwrap()
        .add_flag(TimestampFlag::new("debug-at").config(date_config()).hidden(true))
        .unwrap()
        .add_subcommand(
            Command::new("daily")
                .set_about("Daily totals.")
                .add_flag(TimestampFlag::new("day").config(date_config()))
                .unwrap(),
        )
}

#[test]
fn help() {
    expect![[r#"
        report
          Prints a report.

        OPTIONS:
            -s, --start <value>
              Start of the window.
              default: 2023-01-01 00:00:00 +00:00
              env: $FLAGVAL_HELP_START

            --until <value> (required)

            -h, --help
              Prints help information.

        SUBCOMMANDS:

        report daily
          Daily totals.

          OPTIONS:
            --day <value>

            -h, --help
              Prints help information.
    "#]]
    .assert_eq(&report().help());
}

#[test]
fn help_flag() {
    for flag in ["-h", "--help"] {
        let err = report().parse([flag]).unwrap_err();
        assert!(err.is_help());
        assert_eq!(err.to_string(), report().help());
    }

    let err = report().parse(["daily", "--help"]).unwrap_err();
    assert!(err.is_help());
    expect![[r#"
        report daily
          Daily totals.

        OPTIONS:
            --day <value>

            -h, --help
              Prints help information.
    "#]]
    .assert_eq(&err.to_string());
}

#[test]
fn default_text_override() {
    let cmd = Command::new("app")
        .add_flag(TimestampFlag::new("at").default_text("now"))
        .unwrap();
    assert!(cmd.help().contains("    --at <value>\n      default: now\n"));
}
