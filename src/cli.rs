use std::path::PathBuf;

mod terminal;

use clap::ArgAction;
use mela_exchange::{Export, Recipe, domain::identity, storage::JsonRecipe};
use terminal::Colorize;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.command.run()
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Print the contents of a recipe export
    Show(Show),

    /// Convert a recipe export to plain JSON or the native format
    Convert(Convert),

    /// Check every recipe in an export against the id format rule
    Validate(Validate),
}

impl Command {
    fn run(self) -> anyhow::Result<()> {
        match self {
            Self::Show(command) => command.run()?,
            Self::Convert(command) => command.run()?,
            Self::Validate(command) => command.run()?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Show {
    /// The export file to read (.melarecipe or .melarecipes)
    file: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Show {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        let export = Export::load(&self.file)?;

        match self.output {
            OutputFormat::Pretty => {
                println!(
                    "{} ({} {})",
                    self.file.display(),
                    export.len(),
                    if export.len() == 1 { "recipe" } else { "recipes" }
                );
                println!();
                for recipe in export.recipes() {
                    print_recipe(recipe);
                }
            }
            OutputFormat::Json => {
                let documents: Vec<JsonRecipe> = export
                    .recipes()
                    .iter()
                    .cloned()
                    .map(JsonRecipe::from)
                    .collect();
                println!("{}", serde_json::to_string_pretty(&documents)?);
            }
        }

        Ok(())
    }
}

fn print_recipe(recipe: &Recipe) {
    let title = recipe.title().unwrap_or("(untitled)");
    println!("  {}", title);
    println!("    id:   {}", recipe.id().dim());
    println!("    date: {}", recipe.date().format("%Y-%m-%d"));
    if let Some(link) = recipe.link() {
        println!("    link: {}", link.dim());
    }
    if !recipe.categories().is_empty() {
        println!("    tags: {}", recipe.categories().join(", "));
    }
    let mut flags = Vec::new();
    if recipe.favorite() {
        flags.push("favorite");
    }
    if recipe.want_to_cook() {
        flags.push("want to cook");
    }
    if !flags.is_empty() {
        println!("    {}", flags.join(", ").dim());
    }
    println!();
}

/// Target format for conversion
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Target {
    /// Plain JSON (one document, or an array for collections)
    Json,
    /// Native .melarecipe / .melarecipes output
    Native,
}

#[derive(Debug, clap::Parser)]
pub struct Convert {
    /// The export file to read (.melarecipe or .melarecipes)
    input: PathBuf,

    /// The format to write
    #[arg(long, value_name = "FORMAT")]
    to: Target,

    /// Directory to write into
    #[arg(long, short, default_value = ".")]
    out_dir: PathBuf,
}

impl Convert {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        let export = Export::load(&self.input)?;

        let written = match self.to {
            Target::Json => export.save_json(&self.out_dir)?,
            Target::Native => export.save_native(&self.out_dir)?,
        };

        println!("{}", format!("Wrote {}", written.display()).success());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Validate {
    /// The export file to read (.melarecipe or .melarecipes)
    file: PathBuf,

    /// Suppress per-recipe output
    #[arg(long, short)]
    quiet: bool,
}

impl Validate {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        let export = Export::load(&self.file)?;

        let mut failures = 0_usize;
        for recipe in export.recipes() {
            match identity::validate(recipe.id(), recipe.link()) {
                Ok(()) => {
                    if !self.quiet {
                        println!("{} {}", "ok".success(), recipe.id());
                    }
                }
                Err(error) => {
                    failures += 1;
                    if !self.quiet {
                        println!("{} {}: {error}", "bad".warning(), recipe.id());
                    }
                }
            }
        }

        if failures == 0 {
            if !self.quiet {
                println!(
                    "{}",
                    format!("All {} recipes pass the id format rule", export.len()).success()
                );
            }
            Ok(())
        } else {
            if !self.quiet {
                println!(
                    "{}",
                    format!("{failures} of {} recipes fail the id format rule", export.len())
                        .warning()
                );
            }
            // CI-friendly: distinguish invalid content from operational errors
            std::process::exit(2);
        }
    }
}
