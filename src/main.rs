use clap::Parser;
use snippet_playground::catalog::load_catalog;
use snippet_playground::io::CatalogWatcher;
use snippet_playground::message::{Message, Output};
use snippet_playground::outline::render_text;
use snippet_playground::{Config, Playground};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "snippet-playground", about = "Browse the example catalog")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog JSON document
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Item to select on start
    #[arg(long)]
    select: Option<String>,

    #[arg(long)]
    multiple_open: bool,

    #[arg(long)]
    hide_arrows: bool,

    /// Reload and redraw whenever the catalog changes
    #[arg(long)]
    watch: bool,
}

impl Cli {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(catalog) = &self.catalog {
            config.catalog.path = catalog.clone();
        }
        if let Some(select) = &self.select {
            config.session.initial_selection = Some(select.clone());
        }
        config.navigation.multiple_open |= self.multiple_open;
        config.navigation.hide_arrows |= self.hide_arrows;
        config
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_or_default(path),
        None => Config::load(),
    };
    let config = cli.apply(config);

    match run(&config, cli.watch) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, watch: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Arc::new(load_catalog(&config.catalog.path)?);
    let (mut playground, outputs) = Playground::new(catalog, config);
    report(&outputs);
    print!("{}", render_text(&playground.rows()));

    if !watch {
        return Ok(());
    }

    let watcher = CatalogWatcher::new(&config.catalog.path)?;
    while let Some(message) = watcher.next_reload() {
        let outputs = playground.update(message);
        report(&outputs);
        // re-reveal the current selection in the new tree
        let selected = playground.coordinator.state().selected_item.clone();
        report(&playground.update(Message::ExternalSelection(selected)));
        print!("{}", render_text(&playground.rows()));
    }
    Ok(())
}

fn report(outputs: &[Output]) {
    for output in outputs {
        match output {
            Output::LoadRequested {
                identifier, plan, ..
            } => {
                log::info!("Content {} -> {}", identifier, plan.primary.display());
                for aux in &plan.auxiliary {
                    log::info!("  with {}", aux.display());
                }
            }
            Output::LoadFailed { identifier, reason } => {
                log::error!("Cannot show {}: {}", identifier.as_deref().unwrap_or("item"), reason);
            }
            Output::Warning(warning) => log::warn!("{}", warning),
            Output::ItemActivated(activated) => {
                log::info!("Activated {} in {}", activated.item.name, activated.category);
            }
            Output::ContentReady(ticket) => log::debug!("Content ready {:?}", ticket),
        }
    }
}
