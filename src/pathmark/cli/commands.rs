use super::logging::setup_logging;
use super::print::{print_config, print_item_detail, print_items, print_messages, print_tree};
use super::setup::{Cli, Commands, ItemCommands, NodeCommands};
use clap::Parser;
use directories::ProjectDirs;
use pathmark::api::PathmarkApi;
use pathmark::commands::config::{self as config_cmd, ConfigAction};
use pathmark::commands::CmdResult;
use pathmark::config::PathmarkConfig;
use pathmark::error::{PathmarkError, Result};
use pathmark::model::ItemRecord;
use pathmark::store::fs_backend::FsBackend;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const HOME_ENV: &str = "PATHMARK_HOME";

struct AppContext {
    api: PathmarkApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let data_dir = resolve_data_dir(&cli)?;
    debug!(dir = %data_dir.display(), "using data directory");

    // Config never opens the document.
    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(&data_dir, key.clone(), value.clone());
    }

    // A check reports the document as stored and never writes it.
    let check_only = matches!(cli.command, Some(Commands::Doctor { check: true }));
    let mut ctx = init_context(&data_dir, check_only)?;
    print_messages(ctx.api.startup_messages());

    let outcome = match cli.command {
        None | Some(Commands::Tree) => handle_tree(&ctx),
        Some(Commands::Node { command }) => handle_node(&mut ctx, command),
        Some(Commands::Item { command }) => handle_item(&mut ctx, command),
        Some(Commands::Search { term }) => handle_search(&ctx, &term.join(" ")),
        Some(Commands::Doctor { check }) => handle_doctor(&mut ctx, check),
        Some(Commands::Init) => handle_init(&mut ctx),
        Some(Commands::Config { .. }) => Ok(()),
    };

    // Failed commands change nothing, but an auto-repair on open still needs saving.
    if ctx.api.is_dirty() && !check_only {
        ctx.api.save()?;
    }
    outcome
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(home) = &cli.home {
        return Ok(home.clone());
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "pathmark", "pathmark")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| PathmarkError::Api("Could not determine data directory".to_string()))
}

fn init_context(data_dir: &Path, check_only: bool) -> Result<AppContext> {
    let mut config = PathmarkConfig::load(data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "could not read config, using defaults");
        PathmarkConfig::default()
    });
    if check_only {
        config.auto_repair = false;
    }
    let backend = FsBackend::new(config.data_file_in(data_dir));
    let api = PathmarkApi::open(backend, config)?;
    Ok(AppContext { api })
}

fn finish(result: &CmdResult) {
    print_messages(&result.messages);
}

fn handle_tree(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.tree()?;
    print_tree(&result.nodes);
    finish(&result);
    Ok(())
}

fn handle_node(ctx: &mut AppContext, command: NodeCommands) -> Result<()> {
    let result = match command {
        NodeCommands::Add { name, parent } => ctx.api.add_node(&name, &parent)?,
        NodeCommands::Rename { node, name } => ctx.api.rename_node(&node, &name)?,
        NodeCommands::Remove { node } => ctx.api.remove_node(&node)?,
        NodeCommands::Order { node, index } => ctx.api.reorder_node(&node, index)?,
        NodeCommands::Move {
            node,
            parent,
            index,
        } => ctx.api.move_node(&node, &parent, index)?,
    };
    finish(&result);
    Ok(())
}

fn handle_item(ctx: &mut AppContext, command: ItemCommands) -> Result<()> {
    let result = match command {
        ItemCommands::Add {
            node,
            name,
            path,
            comment,
        } => {
            let mut record = ItemRecord::new(name);
            if let Some(path) = path {
                record = record.with_path(path);
            }
            if let Some(comment) = comment {
                record = record.with_comment(comment);
            }
            ctx.api.add_item(&node, record)?
        }
        ItemCommands::Drop { node, paths } => ctx.api.add_paths(&node, &paths)?,
        ItemCommands::List { node } => {
            let result = ctx.api.list_items(&node)?;
            print_items(&result.items, false);
            result
        }
        ItemCommands::Show { item } => {
            let result = ctx.api.show_item(&item)?;
            for view in &result.items {
                print_item_detail(view);
            }
            result
        }
        ItemCommands::Set { item, fields } => ctx.api.update_item(&item, &fields)?,
        ItemCommands::Remove { item } => ctx.api.remove_item(&item)?,
        ItemCommands::Order { item, index } => ctx.api.reorder_item(&item, index)?,
        ItemCommands::Move { item, node, index } => ctx.api.move_item(&item, &node, index)?,
    };
    finish(&result);
    Ok(())
}

fn handle_search(ctx: &AppContext, term: &str) -> Result<()> {
    let result = ctx.api.search(term)?;
    print_items(&result.items, true);
    finish(&result);
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext, check: bool) -> Result<()> {
    let result = ctx.api.doctor(check)?;
    finish(&result);
    Ok(())
}

fn handle_init(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    finish(&result);
    Ok(())
}

fn handle_config(data_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let shows_all = matches!(action, ConfigAction::ShowAll);

    let result = config_cmd::run(data_dir, action)?;
    if shows_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
