// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod menu;
mod terminal;

use chapter_desk::{
    ActiveDialog, Collaborators, ComplaintFacets, Complaints, ConfirmPrompt, DeleteOutcome,
    ExportFormat, ListBackend, ListHandle, Resource, SuggestionFacets, Suggestions, TyfcbSummary,
    spawn_controller,
};
use chapter_desk_domain::{
    ComplaintCategory, ComplaintStatus, DateRange, DomainError, PagedResult, SuggestionCategory,
    SuggestionStatus,
};
use chapter_desk_export::{CsvExporter, TextReportExporter};
use chapter_desk_gateway::HttpGateway;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use terminal::{AutoConfirm, StdinConfirm, TerminalNotifier};
use tracing::info;

/// Page size used when a single record must be looked up before a status
/// edit.
const LOOKUP_PAGE_SIZE: u32 = 1000;

/// Chapter Desk - operator console for the membership backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the backend API
    #[arg(long)]
    api_url: String,

    /// Directory export files are written into
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Answer yes to every confirmation prompt
    #[arg(long)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Member complaints administration
    Complaints {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Member suggestions administration
    Suggestions {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// TYFCB referral-value reporting
    Tyfcb {
        #[command(subcommand)]
        action: TyfcbAction,
    },
    /// Show the console navigation sections
    Menu {
        /// Highlight the section owning this route
        #[arg(long)]
        route: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum AdminAction {
    /// List records with filters
    List(ListArgs),
    /// Show one record in full
    Show {
        /// The record id
        id: String,
    },
    /// Update a record's status
    SetStatus {
        /// The record id
        id: String,
        /// The new status
        status: String,
        /// Free-text admin response
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Delete a record
    Delete {
        /// The record id
        id: String,
    },
    /// Export the entire filtered set
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    /// Free-text search
    #[arg(long, default_value = "")]
    search: String,

    /// Exact-match status filter
    #[arg(long)]
    status: Option<String>,

    /// Exact-match category filter
    #[arg(long)]
    category: Option<String>,

    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Records per page
    #[arg(long, default_value_t = 10)]
    limit: u32,
}

#[derive(clap::Args, Debug)]
struct ExportArgs {
    /// Export format: csv or report
    #[arg(long, default_value = "csv")]
    format: String,

    /// Free-text search
    #[arg(long, default_value = "")]
    search: String,

    /// Exact-match status filter
    #[arg(long)]
    status: Option<String>,

    /// Exact-match category filter
    #[arg(long)]
    category: Option<String>,
}

#[derive(Subcommand, Debug)]
enum TyfcbAction {
    /// List per-member summaries
    List(TyfcbListArgs),
    /// Export the entire filtered summary
    Export(TyfcbExportArgs),
}

#[derive(clap::Args, Debug)]
struct TyfcbListArgs {
    /// Restrict to one chapter
    #[arg(long)]
    chapter: Option<String>,

    /// Period start (YYYY-MM-DD); requires --to
    #[arg(long)]
    from: Option<String>,

    /// Period end (YYYY-MM-DD); requires --from
    #[arg(long)]
    to: Option<String>,

    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Records per page
    #[arg(long, default_value_t = 10)]
    limit: u32,
}

#[derive(clap::Args, Debug)]
struct TyfcbExportArgs {
    /// Export format: csv or report
    #[arg(long, default_value = "csv")]
    format: String,

    /// Restrict to one chapter
    #[arg(long)]
    chapter: Option<String>,

    /// Period start (YYYY-MM-DD); requires --to
    #[arg(long)]
    from: Option<String>,

    /// Period end (YYYY-MM-DD); requires --from
    #[arg(long)]
    to: Option<String>,
}

type CliError = Box<dyn std::error::Error>;

fn parse_format(format: &str) -> Result<ExportFormat, CliError> {
    match format {
        "csv" => Ok(ExportFormat::Tabular),
        "report" => Ok(ExportFormat::Document),
        other => Err(format!("Invalid export format '{other}'. Must be 'csv' or 'report'").into()),
    }
}

fn complaint_facets(
    status: Option<&str>,
    category: Option<&str>,
) -> Result<ComplaintFacets, DomainError> {
    Ok(ComplaintFacets {
        status: status.map(ComplaintStatus::from_str).transpose()?,
        category: category.map(ComplaintCategory::from_str).transpose()?,
    })
}

fn suggestion_facets(
    status: Option<&str>,
    category: Option<&str>,
) -> Result<SuggestionFacets, DomainError> {
    Ok(SuggestionFacets {
        status: status.map(SuggestionStatus::from_str).transpose()?,
        category: category.map(SuggestionCategory::from_str).transpose()?,
    })
}

fn date_range_from_flags(
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Option<DateRange>, CliError> {
    match (from, to) {
        (None, None) => Ok(None),
        (Some(from), Some(to)) => Ok(Some(DateRange::parse(from, to)?)),
        _ => Err("--from and --to must be provided together".into()),
    }
}

fn char_width(value: &str) -> usize {
    value.chars().count()
}

/// Renders the current page as a fixed-width table with a pagination footer.
fn render_table<R: Resource>(result: Option<&PagedResult<R::Record>>) {
    let Some(page) = result else {
        println!("No data loaded.");
        return;
    };
    if page.is_empty() {
        println!("No records match the current filters.");
        return;
    }

    let columns = R::tabular_columns();
    let offset: usize =
        usize::try_from(u64::from(page.page - 1) * u64::from(page.page_size)).unwrap_or_default();
    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .enumerate()
        .map(|(index, record)| R::tabular_row(record, offset + index))
        .collect();

    let mut widths: Vec<usize> = columns
        .iter()
        .map(|column| char_width(column.header))
        .collect();
    for row in &rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(char_width(cell));
        }
    }

    let header: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{:<width$}", column.header, width = widths[index]))
        .collect();
    println!("{}", header.join("  ").trim_end());
    println!(
        "{}",
        "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1))
    );
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(index, cell)| format!("{cell:<width$}", width = widths[index]))
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
    println!(
        "Page {} of {} ({} records)",
        page.page, page.total_pages, page.total_items
    );
}

async fn run_admin<R, F>(
    handle: ListHandle<R>,
    action: AdminAction,
    parse_facets: F,
) -> Result<(), CliError>
where
    R: Resource,
    F: Fn(Option<&str>, Option<&str>) -> Result<R::Facets, DomainError>,
{
    match action {
        AdminAction::List(args) => {
            let facets: R::Facets = parse_facets(args.status.as_deref(), args.category.as_deref())?;
            handle.edit_facets(move |current| *current = facets);
            handle.set_search(args.search);
            handle.set_limit(args.limit);
            let state = handle.go_to_page(args.page).await?;
            render_table::<R>(state.result.as_ref());
        }
        AdminAction::Show { id } => {
            handle.set_limit(LOOKUP_PAGE_SIZE);
            handle.refresh().await?;
            let state = handle.open_detail(id).await?;
            if let ActiveDialog::ViewDetail { record } = &state.dialog {
                let values: Vec<String> = R::tabular_row(record, 0);
                for (column, value) in R::tabular_columns().iter().zip(values) {
                    if column.key == "srNo" {
                        continue;
                    }
                    println!("{}: {value}", column.header);
                }
            }
            handle.close_dialog();
        }
        AdminAction::SetStatus { id, status, note } => {
            // The record must be on the looked-up page before its editor
            // can open.
            handle.set_limit(LOOKUP_PAGE_SIZE);
            handle.refresh().await?;
            handle.open_status_editor(id).await?;
            handle.save_status(status, note).await?;
        }
        AdminAction::Delete { id } => match handle.delete(id).await? {
            DeleteOutcome::Deleted => {}
            DeleteOutcome::Cancelled => println!("Cancelled."),
        },
        AdminAction::Export(args) => {
            let facets: R::Facets = parse_facets(args.status.as_deref(), args.category.as_deref())?;
            let format: ExportFormat = parse_format(&args.format)?;
            handle.edit_facets(move |current| *current = facets);
            handle.set_search(args.search);
            handle.export(format).await?;
        }
    }
    Ok(())
}

async fn run_tyfcb(handle: ListHandle<TyfcbSummary>, action: TyfcbAction) -> Result<(), CliError> {
    match action {
        TyfcbAction::List(args) => {
            let range: Option<DateRange> =
                date_range_from_flags(args.from.as_deref(), args.to.as_deref())?;
            let chapter: Option<String> = args.chapter;
            handle.edit_facets(move |facets| facets.chapter_name = chapter);
            handle.set_date_range(range);
            handle.set_limit(args.limit);
            let state = handle.go_to_page(args.page).await?;
            render_table::<TyfcbSummary>(state.result.as_ref());
        }
        TyfcbAction::Export(args) => {
            let range: Option<DateRange> =
                date_range_from_flags(args.from.as_deref(), args.to.as_deref())?;
            let format: ExportFormat = parse_format(&args.format)?;
            let chapter: Option<String> = args.chapter;
            handle.edit_facets(move |facets| facets.chapter_name = chapter);
            handle.set_date_range(range);
            handle.export(format).await?;
        }
    }
    Ok(())
}

fn build_collaborators(yes: bool, out_dir: &PathBuf) -> Collaborators {
    let confirm: Arc<dyn ConfirmPrompt> = if yes {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(StdinConfirm)
    };
    Collaborators {
        notifier: Arc::new(TerminalNotifier),
        confirm,
        tabular: Arc::new(CsvExporter::new(out_dir.clone())),
        document: Arc::new(TextReportExporter::new(out_dir.clone())),
    }
}

fn spawn<R>(api_url: &str, collaborators: Collaborators) -> ListHandle<R>
where
    R: Resource,
    HttpGateway: ListBackend<R>,
{
    let gateway: Arc<HttpGateway> = Arc::new(HttpGateway::new(api_url));
    spawn_controller(gateway, collaborators)
}

fn print_menu(route: Option<&str>) {
    let active: Option<&menu::MenuSection> = route.and_then(menu::active_section);
    for section in menu::SECTIONS {
        let marker: &str = if active == Some(section) { ">" } else { " " };
        println!("{marker} {}", section.title);
        for leaf in section.leaves {
            println!("    {} (/{})", leaf.label, leaf.route);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let Args {
        api_url,
        out_dir,
        yes,
        command,
    } = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(api_url = %api_url, "Starting Chapter Desk console");

    match command {
        Command::Complaints { action } => {
            let handle: ListHandle<Complaints> =
                spawn(&api_url, build_collaborators(yes, &out_dir));
            run_admin(handle, action, complaint_facets).await
        }
        Command::Suggestions { action } => {
            let handle: ListHandle<Suggestions> =
                spawn(&api_url, build_collaborators(yes, &out_dir));
            run_admin(handle, action, suggestion_facets).await
        }
        Command::Tyfcb { action } => {
            let handle: ListHandle<TyfcbSummary> =
                spawn(&api_url, build_collaborators(yes, &out_dir));
            run_tyfcb(handle, action).await
        }
        Command::Menu { route } => {
            print_menu(route.as_deref());
            Ok(())
        }
    }
}
