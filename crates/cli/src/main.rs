use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use propanel_engine::{CommandExecutor, Modeler, PropertiesPanel};
use propanel_model::{Document, load_diagram_file, save_diagram_file};
use propanel_util::PanelConfig;
use tracing::{debug, info};

fn main() -> Result<()> {
    init_tracing();
    let matches = build_cli().get_matches();
    let config = load_config(matches.get_one::<String>("config").map(PathBuf::from).as_deref())?;
    let panel = PropertiesPanel::with_default_providers(&config);

    match matches.subcommand() {
        Some(("elements", sub)) => {
            let document = load_document(sub)?;
            for element_id in document.element_ids() {
                let node = document.element_checked(element_id)?;
                println!("{}\t{}", element_id, document.node_checked(node)?.type_name());
            }
            Ok(())
        }
        Some(("inspect", sub)) => {
            let document = load_document(sub)?;
            print_snapshot(&panel, &document, required(sub, "element")?)
        }
        Some(("set", sub)) => edit(&panel, &config, sub, |panel, modeler, element| {
            panel
                .set_value(modeler, element, required(sub, "entry")?, required(sub, "value")?)
                .context("failed to set entry value")
        }),
        Some(("add", sub)) => edit(&panel, &config, sub, |panel, modeler, element| {
            panel
                .add_item(modeler, element, required(sub, "list")?)
                .context("failed to add list item")
        }),
        Some(("remove", sub)) => edit(&panel, &config, sub, |panel, modeler, element| {
            panel
                .remove_item(modeler, element, required(sub, "item")?)
                .context("failed to remove list item")
        }),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_cli() -> Command {
    let file = || Arg::new("file").required(true).help("Diagram file (YAML, or JSON by extension)");
    let element = || Arg::new("element").required(true).help("Id of the selected element");
    let write = || {
        Arg::new("write")
            .long("write")
            .short('w')
            .action(ArgAction::SetTrue)
            .help("Save the edited diagram back to the input file")
    };
    let output = || {
        Arg::new("output")
            .long("output")
            .short('o')
            .action(ArgAction::Set)
            .conflicts_with("write")
            .help("Save the edited diagram to this path instead")
    };

    Command::new("propanel")
        .about("Inspect and edit diagram element properties")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .action(ArgAction::Set)
                .help("Path to the panel config (defaults to PROPANEL_CONFIG_PATH or the user config dir)"),
        )
        .subcommand(Command::new("elements").about("List the elements of a diagram").arg(file()))
        .subcommand(
            Command::new("inspect")
                .about("Print the property groups of an element as JSON")
                .arg(file())
                .arg(element()),
        )
        .subcommand(
            Command::new("set")
                .about("Set the value of an entry")
                .arg(file())
                .arg(element())
                .arg(Arg::new("entry").required(true).help("Entry id, e.g. timerEventDefinitionType"))
                .arg(Arg::new("value").required(true).allow_hyphen_values(true).help("New value; empty clears"))
                .arg(write())
                .arg(output()),
        )
        .subcommand(
            Command::new("add")
                .about("Add an item to a list")
                .arg(file())
                .arg(element())
                .arg(Arg::new("list").required(true).help("List group id or nested list entry id"))
                .arg(write())
                .arg(output()),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a list item")
                .arg(file())
                .arg(element())
                .arg(Arg::new("item").required(true).help("Item id, e.g. Task_1-listener-0"))
                .arg(write())
                .arg(output()),
        )
}

fn load_config(path: Option<&Path>) -> Result<PanelConfig> {
    match path {
        Some(path) => PanelConfig::load_from(path).with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(PanelConfig::load()),
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument '{name}'"))
}

fn load_document(matches: &ArgMatches) -> Result<Document> {
    let file = required(matches, "file")?;
    load_diagram_file(file).with_context(|| format!("failed to load diagram {file}"))
}

fn print_snapshot(panel: &PropertiesPanel, document: &Document, element: &str) -> Result<()> {
    let snapshot = panel.snapshot(document, element)?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Load the diagram, run one edit, print the resulting groups and optionally save.
fn edit(
    panel: &PropertiesPanel,
    config: &PanelConfig,
    matches: &ArgMatches,
    action: impl FnOnce(&PropertiesPanel, &mut Modeler, &str) -> Result<()>,
) -> Result<()> {
    let element = required(matches, "element")?;
    let mut modeler = Modeler::from_config(load_document(matches)?, config);
    action(panel, &mut modeler, element)?;
    debug!(undo_steps = modeler.command_stack().undo_len(), "edit applied");

    print_snapshot(panel, modeler.document(), element)?;

    let target = if matches.get_flag("write") {
        Some(required(matches, "file")?.to_string())
    } else {
        matches.get_one::<String>("output").cloned()
    };
    if let Some(target) = target {
        save_diagram_file(modeler.document(), &target).with_context(|| format!("failed to save diagram {target}"))?;
        info!(path = %target, "diagram saved");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn parses_set_with_global_config() {
        let matches = build_cli()
            .try_get_matches_from(["propanel", "set", "diagram.yaml", "Task_1", "Task_1-listener-0-eventType", "end", "--write", "--config", "panel.json"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("config").map(String::as_str), Some("panel.json"));
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "set");
        assert_eq!(required(sub, "value").unwrap(), "end");
        assert!(sub.get_flag("write"));
    }

    #[test]
    fn write_conflicts_with_output() {
        let result = build_cli().try_get_matches_from(["propanel", "add", "d.yaml", "Task_1", "list", "--write", "--output", "out.yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn explicit_missing_config_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(dir.path().join("absent.json").as_path())).unwrap();
        assert_eq!(config, PanelConfig::default());
    }
}
