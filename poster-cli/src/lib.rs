//! # Poster CLI
//!
//! Headless access to the poster editor core.
//!
//! ## Commands
//!
//! - `render` - load a document, optionally replay a JSON list of actions,
//!   and print the resulting paint list as text or JSON
//! - `check` - load a document and report structural problems
//!   (dangling children, components owned twice, stale selection)
//! - `types` - list every component type with its renderer and editor

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use poster_core::{
    editor_registry, Action, ComponentId, ComponentType, Document, DocumentStore, EditorConfig,
};
use poster_renderer::{render_registry, PaintList, Renderer, RendererConfig};
use serde::{Deserialize, Serialize};

/// Command-line arguments for poster.
#[derive(Debug, Clone, Parser)]
#[command(name = "poster")]
#[command(about = "Poster document tool")]
#[command(version)]
pub struct CliArgs {
    /// JSON configuration file (`{"editor": {...}, "renderer": {...}}`)
    #[arg(long, env = "POSTER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Replay actions on a document and print its paint list
    Render {
        /// Document JSON file
        document: PathBuf,
        /// JSON array of actions to dispatch before rendering
        #[arg(long)]
        actions: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Validate a document
    Check {
        /// Document JSON file
        document: PathBuf,
    },
    /// List component types
    Types,
}

/// Paint list output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per paint op.
    Text,
    /// The paint list as JSON.
    Json,
}

/// Combined configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    /// Document store and editing settings.
    pub editor: EditorConfig,
    /// Render dispatch settings.
    pub renderer: RendererConfig,
}

impl PosterConfig {
    /// Load from a JSON file, or use defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an editor
    /// limit is unusable.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config
            .editor
            .validate()
            .with_context(|| format!("validating config {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Run a parsed command, writing its output to `out`.
///
/// # Errors
///
/// Returns an error if input files cannot be read or parsed, if writing
/// fails, or if `check` finds problems.
pub fn run(args: CliArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let config = PosterConfig::load(args.config.as_deref())?;
    match args.command {
        Command::Render {
            document,
            actions,
            format,
        } => {
            let document = read(&document)?;
            let actions = actions.as_deref().map(read).transpose()?;
            let output = render(&document, actions.as_deref(), &config, format)?;
            writeln!(out, "{output}")?;
        }
        Command::Check { document } => {
            let report = check(&read(&document)?)?;
            write!(out, "{report}")?;
            if !report.is_clean() {
                anyhow::bail!("{} problem(s) found", report.problems.len());
            }
        }
        Command::Types => write!(out, "{}", types())?,
    }
    Ok(())
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Load a document, replay `actions`, and format its paint list.
///
/// # Errors
///
/// Returns an error if the document or the actions do not parse.
pub fn render(
    document_json: &str,
    actions_json: Option<&str>,
    config: &PosterConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let document = Document::from_json(document_json).context("loading document")?;
    let mut store = DocumentStore::from_document(document, config.editor.clone());

    if let Some(actions_json) = actions_json {
        let actions: Vec<Action> =
            serde_json::from_str(actions_json).context("parsing actions")?;
        let total = actions.len();
        let changed = store.dispatch_all(actions);
        tracing::info!("Replayed {total} actions, {changed} changed the document");
    }

    let frame = Renderer::new(config.renderer.clone()).plan(store.document());
    match format {
        OutputFormat::Json => Ok(frame.to_json()?),
        OutputFormat::Text => Ok(format_text(&frame)),
    }
}

fn format_text(frame: &PaintList) -> String {
    let mut text = String::new();
    for op in frame {
        let g = &op.geometry;
        let kind = op.primitive.name();
        let indent = if op.handlers.target().container.is_some() {
            "  "
        } else {
            ""
        };
        // Writing to a String cannot fail.
        let _ = writeln!(
            text,
            "{indent}{:<12} {:<36} x={} y={} w={} h={}",
            kind, op.component_id, g.x, g.y, g.width, g.height
        );
    }
    text.trim_end().to_string()
}

/// One structural issue in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// A composite lists a child that does not exist.
    DanglingChild {
        /// The composite.
        container: ComponentId,
        /// The missing child.
        child: ComponentId,
    },
    /// A component is listed by more than one composite.
    SharedChild {
        /// The child.
        child: ComponentId,
        /// Number of composites listing it.
        owners: usize,
    },
    /// A composite is listed as a child of another composite.
    NestedComposite(ComponentId),
    /// The selection names a component that does not exist.
    StaleSelection(ComponentId),
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingChild { container, child } => {
                write!(f, "{container} lists missing child {child}")
            }
            Self::SharedChild { child, owners } => {
                write!(f, "{child} is listed by {owners} composites")
            }
            Self::NestedComposite(id) => write!(f, "composite {id} is nested in another"),
            Self::StaleSelection(id) => write!(f, "selection names missing {id}"),
        }
    }
}

/// Result of `check`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Number of components.
    pub components: usize,
    /// Number of composites.
    pub composites: usize,
    /// Issues found.
    pub problems: Vec<Problem>,
}

impl CheckReport {
    /// Whether no problems were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} components, {} composites",
            self.components, self.composites
        )?;
        if self.is_clean() {
            return writeln!(f, "ok");
        }
        for problem in &self.problems {
            writeln!(f, "- {problem}")?;
        }
        Ok(())
    }
}

/// Validate a document.
///
/// Decoding already rejects duplicate ids; this reports the softer issues
/// the editor tolerates at runtime.
///
/// # Errors
///
/// Returns an error if the document does not parse.
pub fn check(document_json: &str) -> anyhow::Result<CheckReport> {
    let document = Document::from_json(document_json).context("loading document")?;
    let mut report = CheckReport {
        components: document.len(),
        ..CheckReport::default()
    };

    let mut owners: HashMap<&ComponentId, usize> = HashMap::new();
    for component in document.components().filter(|c| c.is_composite()) {
        report.composites += 1;
        for child in document.dangling_children(&component.id) {
            report.problems.push(Problem::DanglingChild {
                container: component.id.clone(),
                child,
            });
        }
        for child in component.child_ids() {
            *owners.entry(child).or_default() += 1;
            if document.get(child).is_some_and(|c| c.is_composite()) {
                report.problems.push(Problem::NestedComposite(child.clone()));
            }
        }
    }

    let mut shared: Vec<_> = owners.into_iter().filter(|(_, n)| *n > 1).collect();
    shared.sort();
    report
        .problems
        .extend(shared.into_iter().map(|(child, owners)| Problem::SharedChild {
            child: child.clone(),
            owners,
        }));

    report.problems.extend(
        document
            .selected_ids()
            .iter()
            .filter(|id| !document.contains(id))
            .cloned()
            .map(Problem::StaleSelection),
    );

    Ok(report)
}

/// Table of every component type with its renderer and property editor.
#[must_use]
pub fn types() -> String {
    let renderers = render_registry();
    let editors = editor_registry();
    let mut text = String::new();
    for tag in ComponentType::ALL {
        let renderer = renderers.lookup(tag).map_or("-", |r| r.name());
        let editor = editors.lookup(tag).map_or("-", |e| e.label());
        let kind = if tag.is_composite() { "composite" } else { "leaf" };
        let _ = writeln!(text, "{:<18} {kind:<10} {renderer:<12} {editor}", tag.as_str());
    }
    text
}
