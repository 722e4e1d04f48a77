//! `govdash` command-line driver

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

fn build_cli() -> Command {
    Command::new("govdash")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Governance project pipeline: migration, health and audited updates")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .default_value(".govdash")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the stored collections"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .subcommand(
            Command::new("migrate")
                .about("Migrate legacy projects to the enriched schema")
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Migrate even if a valid enriched collection is cached"),
                ),
        )
        .subcommand(
            Command::new("list").about("List enriched projects").arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .help("Output as JSON"),
            ),
        )
        .subcommand(
            Command::new("show")
                .about("Show one enriched project as JSON")
                .arg(Arg::new("id").required(true).help("Project id")),
        )
        .subcommand(
            Command::new("health")
                .about("Explain a project's health score")
                .arg(Arg::new("id").required(true).help("Project id")),
        )
        .subcommand(
            Command::new("update")
                .about("Apply an audited update")
                .arg(Arg::new("id").required(true).help("Project id"))
                .arg(Arg::new("name").long("name").help("New project name"))
                .arg(
                    Arg::new("status")
                        .long("status")
                        .value_parser(["planejamento", "em_andamento", "pausado", "concluido", "cancelado"])
                        .help("New status"),
                )
                .arg(
                    Arg::new("total")
                        .long("total")
                        .value_parser(value_parser!(f64))
                        .help("New contracted value"),
                )
                .arg(
                    Arg::new("executed")
                        .long("executed")
                        .value_parser(value_parser!(f64))
                        .help("New executed value"),
                )
                .arg(
                    Arg::new("progress")
                        .long("progress")
                        .value_parser(value_parser!(f64))
                        .help("New physical progress (0-100)"),
                )
                .arg(
                    Arg::new("actor")
                        .long("actor")
                        .default_value("cli")
                        .help("Actor recorded on the audit events"),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a project from both collections")
                .arg(Arg::new("id").required(true).help("Project id")),
        )
        .subcommand(
            Command::new("minutes")
                .about("Draft meeting minutes from a transcript (needs GEMINI_API_KEY)")
                .arg(
                    Arg::new("transcript")
                        .long("transcript")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Transcript text file"),
                )
                .arg(Arg::new("title").long("title").required(true).help("Meeting title"))
                .arg(Arg::new("date").long("date").required(true).help("Meeting date"))
                .arg(Arg::new("committee").long("committee").help("Committee name"))
                .arg(
                    Arg::new("participant")
                        .long("participant")
                        .action(ArgAction::Append)
                        .help("Participant (repeatable)"),
                )
                .arg(
                    Arg::new("agenda")
                        .long("agenda")
                        .action(ArgAction::Append)
                        .help("Agenda item (repeatable, in order)"),
                )
                .arg(
                    Arg::new("model")
                        .long("model")
                        .default_value(govdash_minutes::DEFAULT_MODEL)
                        .help("Model name"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

/// `RUST_LOG` filter, default `info`; `GOVDASH_LOG_JSON=1` switches to JSON lines
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("GOVDASH_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("minutes", args)) => commands::minutes(args).await,
        Some((name, args)) => {
            let repo = commands::open_repository(matches)?;
            match name {
                "migrate" => commands::migrate(&repo, args),
                "list" => commands::list(&repo, args),
                "show" => commands::show(&repo, args),
                "health" => commands::health(&repo, args),
                "update" => commands::update(&repo, args),
                "delete" => commands::delete(&repo, args),
                other => anyhow::bail!("unknown command: {other}"),
            }
        }
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let matches = build_cli().get_matches();
    run(&matches).await
}
