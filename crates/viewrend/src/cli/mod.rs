//! The `viewrend` command line.
//!
//! ```text
//! viewrend [--config FILE] [--views DIR] [--partials DIR] [--ext EXT]... [--engine ENGINE] [-v]... <COMMAND>
//!
//! Commands:
//!   check   Set up the renderer and render every view with no data
//!   list    Print the registered view names
//!   render  Render one view to stdout
//! ```
//!
//! [`run`] does the work and takes its input and output streams as
//! parameters; the binary only parses arguments, installs logging and maps the
//! [`Outcome`] to an exit code.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use viewrend_render::EngineKind;

use crate::config::{RendererConfig, TemplateSource, DEFAULT_CONFIG_FILE};
use crate::setup::load_renderer;

/// Render and check directory-driven Handlebars views.
#[derive(Debug, Parser)]
#[command(name = "viewrend", version, about)]
pub struct Cli {
    /// Config file (defaults to ./viewrend.yaml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Views directory, overriding the config
    #[arg(long, global = true, value_name = "DIR")]
    pub views: Option<String>,

    /// Partials directory, overriding the config
    #[arg(long, global = true, value_name = "DIR")]
    pub partials: Option<String>,

    /// Extension to gather, e.g. ".hbs" (repeatable; replaces the configured list)
    #[arg(long = "ext", global = true, value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Template engine: handlebars or minijinja
    #[arg(long, global = true, value_name = "ENGINE")]
    pub engine: Option<EngineKind>,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set up the renderer and render every view with no data
    Check,

    /// Print the registered view names, one per line
    List,

    /// Render one view to stdout
    Render(RenderArgs),
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// View name, e.g. "users/show"
    #[arg(value_name = "NAME")]
    pub name: String,

    /// JSON data file, or "-" for stdin (defaults to null)
    #[arg(long, value_name = "FILE")]
    pub data: Option<String>,
}

/// How a successful command run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// `check` found views that fail to render.
    ViewsFailed(usize),
}

impl Cli {
    /// Loads the config file and applies command-line overrides.
    pub fn resolve_config(&self) -> Result<RendererConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                load_config(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => RendererConfig::default(),
        };

        if let Some(engine) = self.engine {
            config.engine = engine;
        }
        if let Some(dir) = &self.views {
            config.views.dir = Some(dir.clone());
        }
        if let Some(dir) = &self.partials {
            config
                .partials
                .get_or_insert_with(TemplateSource::default)
                .dir = Some(dir.clone());
        }
        if !self.extensions.is_empty() {
            config.views.extensions = self.extensions.clone();
            if let Some(partials) = config.partials.as_mut() {
                partials.extensions = self.extensions.clone();
            }
        }

        debug!(?config, "resolved configuration");
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<RendererConfig> {
    info!(path = %path.display(), "loading config");
    RendererConfig::from_file(path).with_context(|| format!("loading {}", path.display()))
}

/// Runs the parsed command. `input` backs `--data -`.
pub fn run(cli: &Cli, input: &mut dyn Read, out: &mut dyn Write) -> Result<Outcome> {
    let config = cli.resolve_config()?;
    let renderer = load_renderer(&config).context("setting up templates")?;

    match &cli.command {
        Command::Check => {
            let names = renderer.view_names();
            let errors = renderer.check_renders();
            for err in &errors {
                writeln!(out, "{err}")?;
            }
            if errors.is_empty() {
                writeln!(out, "{} views ok", names.len())?;
                Ok(Outcome::Success)
            } else {
                writeln!(out, "{} of {} views failed", errors.len(), names.len())?;
                Ok(Outcome::ViewsFailed(errors.len()))
            }
        }
        Command::List => {
            for name in renderer.view_names() {
                writeln!(out, "{name}")?;
            }
            Ok(Outcome::Success)
        }
        Command::Render(args) => {
            let data = read_data(args.data.as_deref(), input)?;
            renderer
                .render(out, &args.name, &data)
                .with_context(|| format!("rendering {}", args.name))?;
            Ok(Outcome::Success)
        }
    }
}

fn read_data(source: Option<&str>, input: &mut dyn Read) -> Result<Value> {
    let text = match source {
        None => return Ok(Value::Null),
        Some("-") => {
            let mut text = String::new();
            input.read_to_string(&mut text).context("reading data from stdin")?;
            text
        }
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading data file {path}"))?
        }
    };
    serde_json::from_str(&text).context("parsing template data as JSON")
}
