//! Subcommand handlers

use anyhow::Context;
use clap::ArgMatches;
use govdash_core::{GovConfig, ProjectPatch, ProjectRepository};
use govdash_minutes::{
    AgendaItem, GeminiConfig, GeminiModel, MeetingInfo, MinuteGenerator, MinutesDocument,
    MinutesRequest,
};
use govdash_model::{EnrichedProject, ProjectId, ProjectStatus};
use govdash_store::{CachedStore, FileStore};
use std::path::PathBuf;
use std::sync::Arc;

const STORE_CACHE_CAPACITY: u64 = 16;

/// Repository over the file store in `--data-dir`
pub(crate) fn open_repository(matches: &ArgMatches) -> anyhow::Result<ProjectRepository> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => GovConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GovConfig::default(),
    };
    let data_dir = matches
        .get_one::<PathBuf>("data-dir")
        .context("--data-dir has a default")?;
    let files = FileStore::open(data_dir)
        .with_context(|| format!("opening data directory {}", data_dir.display()))?;
    let store = Arc::new(CachedStore::new(files, STORE_CACHE_CAPACITY));
    tracing::debug!(data_dir = %data_dir.display(), "store opened");
    Ok(ProjectRepository::bundled(store, &config)?)
}

fn project_id(args: &ArgMatches) -> anyhow::Result<ProjectId> {
    args.get_one::<String>("id")
        .map(ProjectId::new)
        .context("missing project id")
}

pub(crate) fn migrate(repo: &ProjectRepository, args: &ArgMatches) -> anyhow::Result<()> {
    let force = args.get_flag("force");
    if !force && repo.is_migrated() {
        println!("Enriched collection already up to date ({} projects)", repo.list().len());
        return Ok(());
    }
    let projects = repo.remigrate();
    println!("Migrated {} projects to schema v2", projects.len());
    Ok(())
}

pub(crate) fn list(repo: &ProjectRepository, args: &ArgMatches) -> anyhow::Result<()> {
    let projects = repo.list();
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }
    println!("{:<8} {:<13} {:>6} {:>8}  NAME", "ID", "STATUS", "HEALTH", "PROGRESS");
    for project in &projects {
        print_row(project);
    }
    Ok(())
}

fn print_row(project: &EnrichedProject) {
    println!(
        "{:<8} {:<13} {:>6} {:>7.0}%  {}",
        project.id().as_str(),
        project.base.status.as_str(),
        project.health_score,
        project.base.progress_pct,
        project.base.name
    );
}

pub(crate) fn show(repo: &ProjectRepository, args: &ArgMatches) -> anyhow::Result<()> {
    let project = repo.get(&project_id(args)?)?;
    println!("{}", serde_json::to_string_pretty(&project)?);
    Ok(())
}

pub(crate) fn health(repo: &ProjectRepository, args: &ArgMatches) -> anyhow::Result<()> {
    let id = project_id(args)?;
    let report = repo.health(&id)?;
    println!("{id}: {}/100", report.score);
    for reason in &report.reasons {
        println!("  - {reason}");
    }
    Ok(())
}

pub(crate) fn update(repo: &ProjectRepository, args: &ArgMatches) -> anyhow::Result<()> {
    let id = project_id(args)?;
    let patch = patch_from_args(args)?;
    if patch.is_empty() {
        anyhow::bail!("nothing to update: pass at least one of --name, --status, --total, --executed, --progress");
    }
    let actor = args.get_one::<String>("actor").map_or("cli", String::as_str);

    let before = repo.get(&id)?.audit_log.len();
    let project = repo.update(&id, &patch, actor)?;
    let changes = &project.audit_log.events()[before..];
    if changes.is_empty() {
        println!("{id}: no changes");
    }
    for event in changes {
        println!("{id}: {} {} -> {}", event.path(), event.before(), event.after());
    }
    println!("{id}: health {}/100", project.health_score);
    Ok(())
}

fn patch_from_args(args: &ArgMatches) -> anyhow::Result<ProjectPatch> {
    let mut patch = ProjectPatch::new();
    if let Some(name) = args.get_one::<String>("name") {
        patch = patch.with_name(name.clone());
    }
    if let Some(status) = args.get_one::<String>("status") {
        let status: ProjectStatus = status.parse().map_err(anyhow::Error::msg)?;
        patch = patch.with_status(status);
    }
    if let Some(total) = finite_arg(args, "total")? {
        patch = patch.with_total_value(total);
    }
    if let Some(executed) = finite_arg(args, "executed")? {
        patch = patch.with_executed_value(executed);
    }
    if let Some(progress) = finite_arg(args, "progress")? {
        patch = patch.with_progress(progress);
    }
    Ok(patch)
}

/// NaN and infinities have no JSON form and would be stored as zero
fn finite_arg(args: &ArgMatches, name: &str) -> anyhow::Result<Option<f64>> {
    match args.get_one::<f64>(name).copied() {
        Some(value) if !value.is_finite() => {
            anyhow::bail!("--{name} must be a finite number, got {value}")
        }
        value => Ok(value),
    }
}

pub(crate) fn delete(repo: &ProjectRepository, args: &ArgMatches) -> anyhow::Result<()> {
    let id = project_id(args)?;
    repo.delete(&id)?;
    println!("{id}: deleted");
    Ok(())
}

pub(crate) async fn minutes(args: &ArgMatches) -> anyhow::Result<()> {
    let request = minutes_request(args)?;
    let api_key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY is not set")?;
    let model_name = args
        .get_one::<String>("model")
        .map_or(govdash_minutes::DEFAULT_MODEL, String::as_str);

    let model = GeminiModel::new(GeminiConfig::new(api_key).with_model(model_name))?;
    let document = MinuteGenerator::new(Arc::new(model)).generate(&request).await?;

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print_minutes(&document);
    }
    Ok(())
}

fn minutes_request(args: &ArgMatches) -> anyhow::Result<MinutesRequest> {
    let path = args
        .get_one::<PathBuf>("transcript")
        .context("missing --transcript")?;
    let transcript = std::fs::read_to_string(path)
        .with_context(|| format!("reading transcript {}", path.display()))?;

    let title = args.get_one::<String>("title").context("missing --title")?;
    let date = args.get_one::<String>("date").context("missing --date")?;
    let mut meeting = MeetingInfo::new(title.as_str(), date.as_str());
    if let Some(committee) = args.get_one::<String>("committee") {
        meeting = meeting.with_committee(committee.as_str());
    }
    if let Some(participants) = args.get_many::<String>("participant") {
        meeting = meeting.with_participants(participants.map(String::as_str));
    }
    let agenda = args
        .get_many::<String>("agenda")
        .map(|items| items.map(AgendaItem::new).collect())
        .unwrap_or_default();

    Ok(MinutesRequest::new(transcript, meeting).with_agenda(agenda))
}

fn print_minutes(document: &MinutesDocument) {
    println!("# Resumo executivo\n\n{}\n", document.executive_summary);
    println!("# Ata\n\n{}\n", document.structured_minutes);
    println!("# Plano de ação");
    for item in &document.action_plan {
        println!("- {} (responsável: {}, prazo: {})", item.task, item.owner, item.deadline);
    }
}
