mod config;
mod destination;
mod entry;
mod error;
mod frontends;
mod model;
mod pipeline;
mod resolver;
mod writer;

use anyhow::Result;
use clap::Parser;
use log::debug;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use crate::config::load_config;
use crate::destination::{has_elevated_privileges, Destinations};
use crate::error::Error;
use crate::frontends::flags::{FlagFrontend, FlagValues};
use crate::frontends::form::FormFrontend;
use crate::frontends::prompt::PromptFrontend;
use crate::frontends::StdConsole;
use crate::model::DestinationMode;
use crate::pipeline::{Outcome, RunOptions};

const FIELD_ARGS: [&str; 7] = [
    "name",
    "comment",
    "exec_path",
    "icon",
    "terminal_app",
    "app_type",
    "categories",
];

/// Create .desktop launcher entries from flags, prompts or a guided form.
///
/// Without any field flags every field is asked for interactively.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
struct Args {
    /// Install into ~/.local/share/applications (default)
    #[arg(long, conflicts_with = "global")]
    local: bool,

    /// Install into /usr/share/applications (needs root)
    #[arg(long)]
    global: bool,

    /// Application name, also used as the file name
    #[arg(long)]
    name: Option<String>,

    /// Short description; several words may follow the flag
    #[arg(long, num_args = 1.., value_name = "TEXT")]
    comment: Option<Vec<String>>,

    /// Command line to launch
    #[arg(long, value_name = "COMMAND")]
    exec_path: Option<String>,

    /// Icon file path or themed icon name
    #[arg(long, visible_alias = "icon-path")]
    icon: Option<String>,

    /// Run inside a terminal
    #[arg(long, value_name = "true|false")]
    terminal_app: Option<String>,

    /// Entry type [default: Application]
    #[arg(long, value_name = "Application|Link|Directory")]
    app_type: Option<String>,

    /// Categories separated by ',' or ';', e.g. "Development,Utility"
    #[arg(long)]
    categories: Option<String>,

    /// Fill in the entry through a guided form
    #[arg(long, conflicts_with_all = FIELD_ARGS)]
    form: bool,

    /// Never prompt; fail on missing required fields
    #[arg(long)]
    non_interactive: bool,

    /// Print the entry instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Args {
    fn mode(&self) -> DestinationMode {
        if self.global && !self.local {
            DestinationMode::Global
        } else {
            DestinationMode::Local
        }
    }

    fn flag_values(&self) -> FlagValues {
        FlagValues {
            name: self.name.clone(),
            comment: self.comment.clone(),
            exec_path: self.exec_path.clone(),
            icon: self.icon.clone(),
            terminal: self.terminal_app.clone(),
            app_type: self.app_type.clone(),
            categories: self.categories.clone(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if std::env::consts::OS != "linux" {
        return Err(Error::UnsupportedPlatform(std::env::consts::OS.to_string()).into());
    }

    // 1. Load Config
    let config = load_config(args.config.as_deref())?;
    let interactive = config.general.interactive && !args.non_interactive && io::stdin().is_terminal();
    debug!("interactive: {}", interactive);

    let opts = RunOptions {
        mode: args.mode(),
        destinations: Destinations::discover(&config.paths)?,
        defaults: config.defaults.clone(),
        elevated: has_elevated_privileges(),
        dry_run: args.dry_run,
    };

    // 2. Pick the frontend and run
    let flag_values = args.flag_values();
    let outcome = if flag_values.any() {
        let fallback = interactive.then(StdConsole::stdio);
        pipeline::run(&mut FlagFrontend::new(flag_values, fallback), &opts)?
    } else if !interactive {
        // Nothing to ask with: resolution fails on the first required field.
        pipeline::run(&mut FlagFrontend::<StdConsole>::new(flag_values, None), &opts)?
    } else if args.form {
        let dir = opts.destination().dir;
        pipeline::run(&mut FormFrontend::new(StdConsole::stdio(), dir), &opts)?
    } else {
        pipeline::run(&mut PromptFrontend::new(StdConsole::stdio()), &opts)?
    };

    match outcome {
        Outcome::Written(path) => println!("Desktop entry created at: {}", path.display()),
        Outcome::Rendered(text) => print!("{}", text),
    }
    Ok(())
}
