//! cargo run --example timestamp -- --since 2023-06-15 export --until "2023-07-01 18:00"
//!
//! Set `RUST_LOG=flagval=trace` to see how lookups resolve.

use flagval::{timestamp::layout, Command, Location, TimestampConfig, TimestampFlag};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut cmd = app().unwrap_or_else(|err| err.exit());
    cmd.parse_from_env().unwrap_or_else(|err| err.exit());

    for name in ["since", "until"] {
        match cmd.timestamp(name) {
            Some(ts) if !ts.is_zero() => println!("{name}: {ts}"),
            _ => println!("{name}: -"),
        }
    }
}

fn app() -> flagval::Result<Command> {
    let export = Command::new("export").set_about("Exports a time window.").add_flag(
        TimestampFlag::new("until")
            .usage("End of the window, in local time.")
            .config(TimestampConfig::new("%Y-%m-%d %H:%M").timezone(Location::Local))
            .required(true),
    )?;

    let cmd = Command::new("timestamp")
        .set_about("Demonstrates timestamp flags.")
        .add_flag(
            TimestampFlag::new("since")
                .alias("s")
                .usage("Start of the window.")
                .config(TimestampConfig::new(layout::DATE))
                .env("DEMO_SINCE"),
        )?
        .add_subcommand(export);
    Ok(cmd)
}
