use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use chronicle_core::{Chronicle, ChronicleOptions};
use chronicle_error::ChronicleError;

use crate::cli::*;
use crate::config::CliConfig;

/// Result of a `replay` run.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub id: String,
    pub current: String,
    pub past: Vec<String>,
    pub probes: Vec<ProbeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ProbeResult {
    pub probe: String,
    pub included: bool,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::resolve(&cli)?;
    match cli.command {
        Command::Replay(args) => cmd_replay(args, &config),
        Command::Fail(args) => Err(fail(args, &config)?.into()),
    }
}

fn cmd_replay(args: ReplayArgs, config: &CliConfig) -> anyhow::Result<()> {
    let report = replay(args, config)?;
    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_replay(&report),
    }
    Ok(())
}

/// Build a chronicle from the arguments, oldest event first.
pub fn replay(args: ReplayArgs, config: &CliConfig) -> anyhow::Result<ReplayReport> {
    let mut events = args.events.into_iter();
    let initial = events
        .next()
        .ok_or_else(|| anyhow::anyhow!("replay needs at least one event"))?;

    let ignore_case = args.ignore_case;
    let options = ChronicleOptions::with_comparator(move |stored: &String, probe: &str| {
        if ignore_case {
            stored.eq_ignore_ascii_case(probe)
        } else {
            stored == probe
        }
    })
    .config(config.chronicle.clone())
    .on_append(|event, id| {
        debug!(chronicle = %id, %event, "replayed event");
        Ok(())
    });

    let mut chronicle = Chronicle::with_options(initial, options)?;
    chronicle.timer_start("replay");
    for event in events {
        chronicle.append(event)?;
    }
    if let Some(transform) = args.transform {
        chronicle.transform_all(|event| transform.apply(&event));
    }
    chronicle.timer_end("replay");

    let probes = args
        .probes
        .into_iter()
        .map(|probe| ProbeResult {
            included: chronicle.includes(&probe),
            probe,
        })
        .collect();

    Ok(ReplayReport {
        id: chronicle.id().to_string(),
        current: chronicle.current_event(),
        past: chronicle.past_events(),
        probes,
        transform: args.transform.map(Transform::name),
    })
}

fn print_replay(report: &ReplayReport) {
    println!("Chronicle {}", report.id.cyan());
    println!("  {} {}", "current:".green().bold(), report.current);
    for (index, event) in report.past.iter().enumerate() {
        println!("  {} {}", format!("past[{index}]:").dimmed(), event);
    }
    if let Some(transform) = report.transform {
        println!("  transformed: {}", transform.yellow());
    }
    for result in &report.probes {
        let mark = if result.included {
            "✓ included".green()
        } else {
            "✗ absent".red()
        };
        println!("  {} {}", result.probe.bold(), mark);
    }
}

/// Build the error that `fail` exits with.
pub fn fail(args: FailArgs, config: &CliConfig) -> anyhow::Result<ChronicleError<String>> {
    let mut events = args.events.into_iter();
    let initial = events
        .next()
        .ok_or_else(|| anyhow::anyhow!("fail needs at least one event"))?;

    let options = ChronicleOptions::new().config(config.chronicle.clone());
    let mut error = ChronicleError::with_options(initial, args.message, options)?;
    for event in events {
        error.append(event)?;
    }
    Ok(match args.cause {
        Some(cause) => error.caused_by(cause),
        None => error,
    })
}

/// Print the history carried by a failing command's error, if any.
pub fn print_carried_history(error: &anyhow::Error) {
    let Some(error) = error.downcast_ref::<ChronicleError<String>>() else {
        return;
    };
    eprintln!("{} {}", "History of".red().bold(), error.id().to_string().cyan());
    for (index, event) in error.all_events().iter().enumerate() {
        let marker = if index == 0 { "current" } else { "past" };
        eprintln!("  {:>7} {}", marker.dimmed(), event);
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use chronicle_types::Isolation;

    use super::*;

    fn replay_args(events: &[&str], probes: &[&str]) -> ReplayArgs {
        ReplayArgs {
            events: events.iter().map(|e| e.to_string()).collect(),
            probes: probes.iter().map(|p| p.to_string()).collect(),
            transform: None,
            ignore_case: false,
        }
    }

    #[test]
    fn replay_orders_newest_first() {
        let report = replay(
            replay_args(&["First event", "Second event", "Third event"], &[]),
            &CliConfig::default(),
        )
        .unwrap();
        assert_eq!(report.current, "Third event");
        assert_eq!(report.past, vec!["Second event", "First event"]);
        assert!(report.id.parse::<chronicle_types::ChronicleId>().is_ok());
    }

    #[test]
    fn replay_reports_probes() {
        let report = replay(
            replay_args(&["First event", "Second event"], &["First event", "Third event"]),
            &CliConfig::default(),
        )
        .unwrap();
        let included: Vec<bool> = report.probes.iter().map(|p| p.included).collect();
        assert_eq!(included, vec![true, false]);
    }

    #[test]
    fn replay_ignore_case_and_transform() {
        let mut args = replay_args(&["alpha", "beta"], &["ALPHA"]);
        args.ignore_case = true;
        args.transform = Some(Transform::Upper);

        let report = replay(args, &CliConfig::default()).unwrap();
        assert_eq!(report.current, "BETA");
        assert_eq!(report.past, vec!["ALPHA"]);
        assert!(report.probes[0].included);
        assert_eq!(report.transform, Some("upper"));
    }

    #[test]
    fn replay_report_serializes() {
        let mut config = CliConfig::default();
        config.chronicle.isolation = Isolation::Shared;
        let report = replay(replay_args(&["a", "b"], &["a"]), &config).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["current"], "b");
        assert_eq!(json["past"][0], "a");
        assert_eq!(json["probes"][0]["included"], true);
        assert!(json.get("transform").is_none());
    }

    #[test]
    fn fail_carries_history_and_cause() {
        let args = FailArgs {
            events: vec!["connect".into(), "handshake".into()],
            message: "session aborted".into(),
            cause: Some("peer reset".into()),
        };
        let error = fail(args, &CliConfig::default()).unwrap();
        assert_eq!(error.to_string(), "session aborted");
        assert_eq!(error.all_events(), vec!["handshake", "connect"]);
        assert_eq!(error.source().unwrap().to_string(), "peer reset");

        let report: anyhow::Error = error.into();
        let carried = report.downcast_ref::<ChronicleError<String>>().unwrap();
        assert!(carried.includes(&"connect".to_string()));
    }
}
