//! # CLI Layer
//!
//! This module is **one possible UI client** for mortydex, not the
//! application itself. It is the only place that:
//! - parses shell arguments (clap)
//! - sets up logging
//! - writes to stdout
//!
//! ## Structure
//!
//! - `run()`: parse, build the context, dispatch
//! - `init_context()`: resolve the data directory, load config, pick a catalog
//! - `handle_*()`: one per command; call `DexApi`, then render the result

use super::render::{
    print_messages, render_character_list, render_character_view, render_comments,
    render_config, render_filters,
};
use super::setup::{Cli, Commands, CommentCommands, FilterCommands};
use clap::Parser;
use directories::ProjectDirs;
use mortydex::api::{
    CmdResult, ConfigAction, ConfigKey, DexApi, ListQuery, ResetTarget, SortOrder,
};
use mortydex::catalog::file::JsonFileCatalog;
use mortydex::catalog::graphql::GraphQlCatalog;
use mortydex::catalog::Catalog;
use mortydex::config::DexConfig;
use mortydex::error::{DexError, Result};
use mortydex::filter::FilterEdit;
use mortydex::store::fs::FileBackend;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DATA_DIR_ENV: &str = "MORTYDEX_DATA_DIR";
const LOG_ENV: &str = "MORTYDEX_LOG";

struct AppContext {
    api: DexApi<FileBackend, Box<dyn Catalog>>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List {
            search,
            sort,
            deleted,
        }) => handle_list(&mut ctx, search, sort, deleted),
        Some(Commands::View { id }) => handle_view(&mut ctx, id),
        Some(Commands::Fav { ids }) => handle_fav(&mut ctx, ids),
        Some(Commands::Delete { ids }) => handle_delete(&mut ctx, ids),
        Some(Commands::Comment { action }) => match action {
            CommentCommands::Add { id, text } => handle_comment_add(&mut ctx, id, text),
            CommentCommands::Delete { id, comment_id } => {
                handle_comment_delete(&mut ctx, id, comment_id)
            }
            CommentCommands::List { id } => handle_comment_list(&mut ctx, id),
        },
        Some(Commands::Filter { action }) => match action {
            None | Some(FilterCommands::Show) => handle_filter_show(&mut ctx),
            Some(FilterCommands::Set {
                scope,
                species,
                status,
                gender,
            }) => handle_filter_set(
                &mut ctx,
                FilterEdit {
                    scope,
                    species,
                    status,
                    gender,
                },
            ),
            Some(FilterCommands::Apply) => handle_filter_apply(&mut ctx),
            Some(FilterCommands::Clear) => handle_filter_clear(&mut ctx),
            Some(FilterCommands::Search { text }) => handle_filter_search(&mut ctx, text),
        },
        Some(Commands::Reset { target }) => handle_reset(&mut ctx, target.into()),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None, SortOrder::Asc, false),
    }
}

/// Logs go to stderr so they never mix with command output.
/// `MORTYDEX_LOG` takes any `EnvFilter` directive and wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "mortydex=debug"
    } else {
        "mortydex=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_directive.into()))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.clone())?;

    let config = DexConfig::load(&data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable config, using defaults");
        DexConfig::default()
    });
    let catalog = build_catalog(&config)?;
    tracing::debug!(data_dir = %data_dir.display(), "context ready");

    Ok(AppContext {
        api: DexApi::new(FileBackend::new(data_dir.clone()), catalog, data_dir),
    })
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "mortydex", "mortydex")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DexError::Config("Could not determine a data directory".to_string()))
}

fn build_catalog(config: &DexConfig) -> Result<Box<dyn Catalog>> {
    match &config.catalog_file {
        Some(path) => {
            let catalog = JsonFileCatalog::new(path.clone());
            tracing::debug!(path = %catalog.path().display(), "using catalog file");
            Ok(Box::new(catalog))
        }
        None => {
            let catalog =
                GraphQlCatalog::new(config.endpoint.clone(), config.timeout(), config.retries)?;
            tracing::debug!(endpoint = catalog.endpoint(), "using remote catalog");
            Ok(Box::new(catalog))
        }
    }
}

fn handle_list(
    ctx: &mut AppContext,
    search: Option<String>,
    order: SortOrder,
    deleted: bool,
) -> Result<()> {
    let result = if deleted {
        ctx.api.list_deleted(order)?
    } else {
        ctx.api.list(&ListQuery { search, order })?
    };

    let empty_message = if deleted {
        "No deleted characters."
    } else {
        "No characters found."
    };
    print!("{}", render_character_list(&result.listed, empty_message));
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, id: u32) -> Result<()> {
    let result = ctx.api.view(id)?;
    if let Some(view) = &result.view {
        print!("{}", render_character_view(view));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_fav(ctx: &mut AppContext, ids: Vec<u32>) -> Result<()> {
    let result = ctx.api.toggle_favorites(&ids)?;
    finish_partial(&result);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, ids: Vec<u32>) -> Result<()> {
    let result = ctx.api.toggle_deleted(&ids)?;
    finish_partial(&result);
    Ok(())
}

/// Print what a multi-id command did; exit non-zero if it stopped partway.
fn finish_partial(result: &CmdResult) {
    print_messages(&result.messages);
    if result.has_errors() {
        std::process::exit(1);
    }
}

fn handle_comment_add(ctx: &mut AppContext, id: u32, text: Vec<String>) -> Result<()> {
    let result = ctx.api.add_comment(id, &text.join(" "))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_comment_delete(ctx: &mut AppContext, id: u32, comment_id: String) -> Result<()> {
    let result = ctx.api.delete_comment(id, &comment_id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_comment_list(ctx: &mut AppContext, id: u32) -> Result<()> {
    let result = ctx.api.comments(id)?;
    print!("{}", render_comments(&result.comments));
    print_messages(&result.messages);
    Ok(())
}

fn handle_filter_show(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.filters()?;
    if let Some(filters) = &result.filters {
        print!("{}", render_filters(filters));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_filter_set(ctx: &mut AppContext, edit: FilterEdit) -> Result<()> {
    let result = ctx.api.edit_filters(&edit)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_filter_apply(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.apply_filters()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_filter_clear(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.clear_filters()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_filter_search(ctx: &mut AppContext, text: Vec<String>) -> Result<()> {
    let result = ctx.api.search(&text.join(" "))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_reset(ctx: &mut AppContext, target: ResetTarget) -> Result<()> {
    let result = ctx.api.reset(target)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(ConfigKey::parse(&k)?),
        (Some(k), Some(v)) => ConfigAction::Set(ConfigKey::parse(&k)?, v),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}
