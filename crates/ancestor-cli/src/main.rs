//! CLI binary for resolving closest common ancestors in a class hierarchy file.

use ancestor_core::config::AncestorConfig;
use ancestor_core::{AncestorResolver, ClassHierarchy, ClassMetadata};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "common-ancestor",
    about = "Find the closest common ancestor of classes in a hierarchy"
)]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Hierarchy JSON file (defaults to the configured path)
    #[arg(long, global = true)]
    hierarchy: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the closest common ancestor of one or more classes
    Resolve {
        /// Class names
        #[arg(required = true)]
        classes: Vec<String>,

        /// Only consider classes backed by a storage table
        #[arg(long)]
        tables_only: bool,

        /// Print every common ancestor, nearest first
        #[arg(long)]
        all: bool,
    },

    /// Print a class's ancestry, root first
    Ancestry {
        /// Class name
        class: String,

        /// Only include classes backed by a storage table
        #[arg(long)]
        tables_only: bool,
    },

    /// Check the hierarchy file for dangling parents and cycles
    Validate,
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = AncestorConfig::load(&project_root)?;
    let hierarchy_path = match &cli.hierarchy {
        Some(path) => path.clone(),
        None => config.hierarchy_path(&project_root),
    };

    match cli.command {
        Commands::Resolve {
            classes,
            tables_only,
            all,
        } => cmd_resolve(
            &hierarchy_path,
            &classes,
            tables_only || config.resolve.tables_only,
            all,
        ),
        Commands::Ancestry { class, tables_only } => cmd_ancestry(
            &hierarchy_path,
            &class,
            tables_only || config.resolve.tables_only,
        ),
        Commands::Validate => cmd_validate(&hierarchy_path),
    }
}

fn load_hierarchy(path: &Path) -> Result<ClassHierarchy> {
    let hierarchy = ancestor_core::storage::load(path)?;
    tracing::debug!(
        path = %path.display(),
        classes = hierarchy.len(),
        "loaded hierarchy"
    );
    Ok(hierarchy)
}

fn cmd_resolve(path: &Path, classes: &[String], tables_only: bool, all: bool) -> Result<()> {
    let hierarchy = load_hierarchy(path)?;
    let resolver = AncestorResolver::new(&hierarchy);

    if all {
        for ancestor in resolver.common_ancestors(classes, tables_only)? {
            println!("{}", ancestor);
        }
    } else {
        println!("{}", resolver.resolve(classes, tables_only)?);
    }
    Ok(())
}

fn cmd_ancestry(path: &Path, class: &str, tables_only: bool) -> Result<()> {
    let hierarchy = load_hierarchy(path)?;
    if !hierarchy.exists(class) {
        anyhow::bail!("class {} does not exist in {}", class, path.display());
    }

    for ancestor in hierarchy.ancestry(class, tables_only) {
        println!("{}", ancestor);
    }
    Ok(())
}

fn cmd_validate(path: &Path) -> Result<()> {
    let hierarchy = load_hierarchy(path)?;
    let roots: Vec<&str> = hierarchy
        .class_names()
        .filter(|name| hierarchy.get(name).is_some_and(|def| def.parent.is_none()))
        .collect();
    let tables = hierarchy.classes.values().filter(|def| def.has_table).count();

    eprintln!("Hierarchy OK: {}", path.display());
    eprintln!("  Classes: {}", hierarchy.len());
    eprintln!("  Roots: {}", roots.join(", "));
    eprintln!("  Table-backed: {}", tables);
    Ok(())
}
