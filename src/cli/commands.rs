//! Command dispatch: wires model, store, and services together.

use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::SearchSetService;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::domain::AttributeSelector;
use crate::infrastructure::{load_model, GroupStore, JsonGroupStore, ModelTree};

pub fn execute_command(cli: &Cli, settings: &Settings) -> CliResult<()> {
    let sets_path = cli
        .sets
        .clone()
        .unwrap_or_else(|| settings.sets_file.clone());

    match &cli.command {
        Some(Commands::Disciplines { model }) => disciplines(model, &sets_path),
        Some(Commands::ClashSets { model, attribute }) => clash_sets(
            model,
            &sets_path,
            attribute.unwrap_or(settings.default_attribute),
        ),
        Some(Commands::Show) => show(&sets_path),
        Some(Commands::Config) => config(settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

fn build_service(model: &Path, sets_path: &Path) -> CliResult<SearchSetService> {
    let tree = load_model(model)?;
    debug!("model loaded from {}", model.display());
    let tree: Arc<dyn ModelTree> = Arc::new(tree);
    let store: Arc<dyn GroupStore> = Arc::new(JsonGroupStore::new(sets_path));
    Ok(SearchSetService::new(tree, store))
}

#[instrument(level = "debug", skip_all)]
fn disciplines(model: &Path, sets_path: &Path) -> CliResult<()> {
    let service = build_service(model, sets_path)?;
    let folder = service.create_discipline_sets()?;

    println!("{}", output::render_hierarchy(&folder));
    output::success(&format!(
        "created {} discipline search sets in {}",
        folder.leaf_count(),
        sets_path.display()
    ));
    Ok(())
}

#[instrument(level = "debug", skip_all, fields(%attribute))]
fn clash_sets(model: &Path, sets_path: &Path, attribute: AttributeSelector) -> CliResult<()> {
    let service = build_service(model, sets_path)?;
    let folder = service.create_clash_sets(attribute)?;

    println!("{}", output::render_hierarchy(&folder));
    output::success(&format!(
        "created {} clash sets (grouped by {}) in {}",
        folder.leaf_count(),
        attribute,
        sets_path.display()
    ));
    Ok(())
}

fn show(sets_path: &Path) -> CliResult<()> {
    let store = JsonGroupStore::new(sets_path);
    let folders = store.folders()?;

    if folders.is_empty() {
        println!("no saved sets in {}", sets_path.display());
        return Ok(());
    }

    output::header(&sets_path.display());
    for folder in &folders {
        println!("{}", output::render_hierarchy(folder));
    }
    Ok(())
}

fn config(settings: &Settings) -> CliResult<()> {
    print!("{}", settings.to_toml()?);
    Ok(())
}
