use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use modkeeper::config::{get_config_path, read_config, write_config};
use modkeeper::{
    compare_manifest_files, installed_mods, move_all, read_identifier_list,
    reconcile_by_identifiers, reconcile_selected, regenerate_manifest, remove_mods, scan_source,
    write_identifier_list, CollisionPolicy, ModkeeperConfig, ReconcileOptions, ReconcileOutcome,
    ReconciliationResult, ScanIndex, TransferAction, TransferProgress,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Modkeeper - copy, move and track workshop mods
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Workshop directory laid out as <id>/mods/<mod name>
    #[arg(short, long, global = true, env = "MODKEEPER_SOURCE")]
    source: Option<PathBuf>,

    /// Game mods directory holding mods_info.json
    #[arg(short, long, global = true, env = "MODKEEPER_DEST")]
    dest: Option<PathBuf>,

    /// Config file (default: ~/.modkeeper/config.json)
    #[arg(long, global = true, env = "MODKEEPER_CONFIG")]
    config: Option<PathBuf>,

    /// Refuse to transfer mods found under more than one identifier
    #[arg(long, global = true)]
    strict_ids: bool,

    /// More log output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the mods found in the source directory
    Scan,
    /// List the mods installed in the destination directory
    List,
    /// Copy mods from the source into the destination
    Copy(SelectionArgs),
    /// Move mods from the source into the destination
    Move(SelectionArgs),
    /// Copy every mod matching an identifier list file
    ImportIds {
        /// Comma-separated identifier file
        file: PathBuf,
        /// Move instead of copy
        #[arg(long = "move")]
        move_mods: bool,
        /// Write identifiers that matched nothing to this file
        #[arg(long)]
        missing_out: Option<PathBuf>,
    },
    /// Move every mod in the source into the destination
    MoveAll,
    /// Write the identifiers of source mods to a file
    ExportIds {
        /// Output file
        out: PathBuf,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Compare the destination manifest with another manifest file
    Diff {
        /// The other machine's mods_info.json
        remote: PathBuf,
        /// Local manifest to use instead of the destination's
        #[arg(long)]
        local: Option<PathBuf>,
        /// Write identifiers missing locally to this file
        #[arg(long)]
        export_local: Option<PathBuf>,
        /// Write identifiers missing remotely to this file
        #[arg(long)]
        export_remote: Option<PathBuf>,
    },
    /// Rebuild mods_info.json from the destination's folders
    Regenerate,
    /// Delete mods from the destination
    Remove {
        #[arg(required = true)]
        mods: Vec<String>,
    },
    /// Save --source, --dest and --strict-ids as defaults in the config file
    SaveDefaults,
}

#[derive(clap::Args, Debug)]
struct SelectionArgs {
    /// Mod names
    #[arg(required_unless_present = "all")]
    mods: Vec<String>,
    /// Every mod found in the source
    #[arg(long, conflicts_with = "mods")]
    all: bool,
}

impl SelectionArgs {
    fn resolve(&self, index: &ScanIndex) -> Vec<String> {
        if self.all {
            index.mod_names().map(str::to_string).collect()
        } else {
            self.mods.clone()
        }
    }
}

/// Command-line arguments merged with the config file
struct Settings {
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
    policy: CollisionPolicy,
    config_path: PathBuf,
    config: ModkeeperConfig,
}

impl Settings {
    fn source(&self) -> Result<&Path> {
        match &self.source {
            Some(path) => Ok(path),
            None => bail!("No source directory: pass --source or set sourceDir in the config"),
        }
    }

    fn dest(&self) -> Result<&Path> {
        match &self.dest {
            Some(path) => Ok(path),
            None => bail!("No destination directory: pass --dest or set destinationDir in the config"),
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_progress(update: TransferProgress) {
    eprintln!("[{}/{}] {}", update.done, update.total, update.mod_name);
}

async fn print_result(result: &ReconciliationResult, missing_out: Option<&Path>) -> Result<()> {
    println!("{}", result.summary());

    if let ReconcileOutcome::PartialMatch { missing } = result.outcome() {
        if let Some(path) = missing_out {
            write_identifier_list(path, &missing).await?;
            println!("Missing items written to {}", path.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let config_path = match args.config.clone() {
        Some(path) => path,
        None => get_config_path()?,
    };
    let config = read_config(&config_path)
        .await
        .with_context(|| format!("Failed to read config {}", config_path.display()))?
        .unwrap_or_default();

    let ctx = Settings {
        source: args
            .source
            .clone()
            .or_else(|| config.source_dir.as_ref().map(PathBuf::from)),
        dest: args
            .dest
            .clone()
            .or_else(|| config.destination_dir.as_ref().map(PathBuf::from)),
        policy: if args.strict_ids {
            CollisionPolicy::Reject
        } else {
            config.collision_policy
        },
        config_path,
        config,
    };

    run(args.command, ctx).await
}

async fn transfer_selected(
    ctx: &Settings,
    selection: &SelectionArgs,
    action: TransferAction,
) -> Result<()> {
    let mut progress = print_progress;
    let source = ctx.source()?;
    let index = scan_source(source).await?;
    let result = reconcile_selected(
        source,
        ctx.dest()?,
        &index,
        &selection.resolve(&index),
        action,
        ReconcileOptions::default()
            .with_policy(ctx.policy)
            .with_progress(&mut progress),
    )
    .await?;
    print_result(&result, None).await
}

async fn run(command: Command, ctx: Settings) -> Result<()> {
    let mut progress = print_progress;

    match command {
        Command::Scan => {
            let index = scan_source(ctx.source()?).await?;
            for (name, identifier) in index.iter() {
                println!("{}\t{}", name, identifier);
            }
            for collision in index.collisions() {
                println!(
                    "warning: {} is in both {} and {} (using {})",
                    collision.mod_name, collision.discarded, collision.kept, collision.kept
                );
            }
            println!("{} mod(s) found", index.len());
        }
        Command::List => {
            let manifest = installed_mods(ctx.dest()?).await?;
            for (name, identifier) in manifest.iter() {
                println!("{}\t{}", name, identifier);
            }
            println!("{} mod(s) installed", manifest.count());
        }
        Command::Copy(selection) => {
            transfer_selected(&ctx, &selection, TransferAction::Copy).await?;
        }
        Command::Move(selection) => {
            transfer_selected(&ctx, &selection, TransferAction::Move).await?;
        }
        Command::ImportIds {
            file,
            move_mods,
            missing_out,
        } => {
            let identifiers = read_identifier_list(&file).await?;
            if identifiers.is_empty() {
                bail!("{} contains no identifiers", file.display());
            }
            let source = ctx.source()?;
            let index = scan_source(source).await?;
            let action = if move_mods {
                TransferAction::Move
            } else {
                TransferAction::Copy
            };
            let result = reconcile_by_identifiers(
                source,
                ctx.dest()?,
                &index,
                &identifiers,
                action,
                ReconcileOptions::default()
                    .with_policy(ctx.policy)
                    .with_progress(&mut progress),
            )
            .await?;
            print_result(&result, missing_out.as_deref()).await?;
        }
        Command::MoveAll => {
            let source = ctx.source()?;
            let index = scan_source(source).await?;
            let result = move_all(
                source,
                ctx.dest()?,
                &index,
                ReconcileOptions::default()
                    .with_policy(ctx.policy)
                    .with_progress(&mut progress),
            )
            .await?;
            print_result(&result, None).await?;
        }
        Command::ExportIds { out, selection } => {
            let index = scan_source(ctx.source()?).await?;
            let names = selection.resolve(&index);
            let identifiers = index.identifiers_for(&names);
            write_identifier_list(&out, &identifiers).await?;
            println!(
                "Exported {} identifier(s) to {}",
                identifiers.len(),
                out.display()
            );
        }
        Command::Diff {
            remote,
            local,
            export_local,
            export_remote,
        } => {
            let local = match local {
                Some(path) => path,
                None => modkeeper::utils::get_manifest_path(ctx.dest()?),
            };
            let diff = compare_manifest_files(&local, &remote).await?;
            print!("{}", diff.render_report());

            if let Some(path) = export_local {
                write_identifier_list(&path, &diff.missing_on_local_identifiers()).await?;
                println!("Identifiers missing locally written to {}", path.display());
            }
            if let Some(path) = export_remote {
                write_identifier_list(&path, &diff.missing_on_remote_identifiers()).await?;
                println!("Identifiers missing remotely written to {}", path.display());
            }
        }
        Command::Regenerate => {
            let index = scan_source(ctx.source()?).await?;
            let manifest = regenerate_manifest(ctx.dest()?, &index).await?;
            println!("mods_info.json rebuilt with {} mod(s)", manifest.count());
        }
        Command::Remove { mods } => {
            let result = remove_mods(ctx.dest()?, &mods).await?;
            println!(
                "Removed {} mod(s); manifest tracks {} mod(s)",
                result.removed.len(),
                result.manifest.count()
            );
            if !result.not_found.is_empty() {
                println!("Not installed: {}", result.not_found.join(", "));
            }
        }
        Command::SaveDefaults => {
            let config = ModkeeperConfig {
                source_dir: ctx
                    .source
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
                destination_dir: ctx.dest.as_ref().map(|p| p.to_string_lossy().to_string()),
                collision_policy: ctx.policy,
            };
            if config == ctx.config {
                println!("Config unchanged");
                return Ok(());
            }
            write_config(&ctx.config_path, &config).await?;
            info!(path = %ctx.config_path.display(), "Config saved");
            println!("Defaults saved to {}", ctx.config_path.display());
        }
    }

    Ok(())
}
