use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use jumpgen_cli::JumpgenError;
use jumpgen_cli::config::{
	Overrides, Settings, generate_init_template, load_config, load_settings, user_config_path,
};
use jumpgen_cli::hosts::{collect_host_blocks, find_bastions};
use jumpgen_cli::proxy::generate_proxies;

#[derive(Parser)]
#[command(name = "jumpgen")]
#[command(
	author,
	version,
	about = "CLI tool for generating bastion-proxied SSH config fragments"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Config file to use instead of ~/.jumpgen.toml
	#[arg(long, global = true, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Directory holding the SSH config fragments
	#[arg(long, global = true, value_name = "DIR")]
	config_dir: Option<PathBuf>,

	/// File that receives the generated include line
	#[arg(long, global = true, value_name = "PATH")]
	include_file: Option<PathBuf>,

	/// Log progress to stderr
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Regenerate the per-bastion proxy configs and the include file
	Proxy,
	/// List every host defined in the fragments
	Hosts,
	/// List the hosts that act as bastions
	Bastions,
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the effective settings and where they came from
	Show,
	/// Check the config file for errors without generating anything
	Validate,
	/// Write a template config file
	Init {
		/// Overwrite an existing config file
		#[arg(long)]
		force: bool,
	},
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_logging(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	let overrides = Overrides {
		config_dir: cli.config_dir.clone(),
		include_file: cli.include_file.clone(),
	};

	match cli.command {
		Commands::Proxy => handle_proxy(&cli, &overrides),
		Commands::Hosts => handle_hosts(&cli, &overrides),
		Commands::Bastions => handle_bastions(&cli, &overrides),
		Commands::Config { ref action } => match action {
			ConfigAction::Show => handle_config_show(&cli, &overrides),
			ConfigAction::Validate => handle_config_validate(&cli),
			ConfigAction::Init { force } => handle_config_init(&cli, *force),
		},
	}
}

fn resolve(cli: &Cli, overrides: &Overrides) -> Result<(Settings, Option<PathBuf>)> {
	load_settings(cli.config.as_deref(), overrides).context("Failed to load configuration")
}

fn handle_proxy(cli: &Cli, overrides: &Overrides) -> Result<ExitCode> {
	let (settings, _) = resolve(cli, overrides)?;

	let tree = generate_proxies(&settings).map_err(|e| {
		let message = match e {
			JumpgenError::SnapshotFailed { .. } => {
				"Proxy generation could not start, no proxy configs were changed"
			}
			JumpgenError::CommitFailed { .. } => {
				"New proxy configs are in place but the old ones could not be removed"
			}
			JumpgenError::RollbackFailed { .. } => {
				"Proxy generation failed and the previous proxy configs could not be restored"
			}
			_ => "Proxy generation failed, reverted to the previous proxy configs",
		};
		anyhow::Error::new(e).context(message)
	})?;

	println!(
		"Generated proxy configs for {} bastion(s) from {} fragment(s)",
		tree.bastions.len(),
		tree.fragments.len()
	);
	for bastion in &tree.bastions {
		println!("  {}", settings.output_dir().join(bastion).display());
	}
	println!("Updated {}", tree.include_file.display());

	Ok(ExitCode::SUCCESS)
}

fn handle_hosts(cli: &Cli, overrides: &Overrides) -> Result<ExitCode> {
	let (settings, _) = resolve(cli, overrides)?;
	let records = collect_host_blocks(&settings.config_dir, &settings.ignored_names())
		.context("Failed to read host definitions")?;

	if records.is_empty() {
		println!("No hosts found.");
		return Ok(ExitCode::SUCCESS);
	}

	for record in &records {
		println!("{}\t({})", record.name(), record.fragment);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_bastions(cli: &Cli, overrides: &Overrides) -> Result<ExitCode> {
	let (settings, _) = resolve(cli, overrides)?;
	let bastions = find_bastions(
		&settings.config_dir,
		&settings.ignored_names(),
		&settings.bastion_marker,
	)
	.context("Failed to read host definitions")?;

	if bastions.is_empty() {
		println!("No bastions found.");
		return Ok(ExitCode::SUCCESS);
	}

	for bastion in &bastions {
		println!("{}", bastion);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(cli: &Cli, overrides: &Overrides) -> Result<ExitCode> {
	let (settings, source) = resolve(cli, overrides)?;

	match source {
		Some(path) => println!("# Source: {}", path.display()),
		None => println!("# Source: built-in defaults"),
	}
	println!("config-dir: {}", settings.config_dir.display());
	println!("include-file: {}", settings.include_file.display());
	println!("include-prefix: {}", settings.include_prefix);
	println!("proxy-dir: {}", settings.proxy_dir);
	println!("backup-suffix: {}", settings.backup_suffix);
	println!("ignore: {}", settings.ignore.join(", "));
	println!("bastion-marker: {}", settings.bastion_marker);

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(cli: &Cli) -> Result<ExitCode> {
	match load_config(cli.config.as_deref()) {
		Ok(Some(loaded)) => {
			println!("Configuration file is valid: {}", loaded.path.display());
			Ok(ExitCode::SUCCESS)
		}
		Ok(None) => {
			println!("No configuration file found.");
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_config_init(cli: &Cli, force: bool) -> Result<ExitCode> {
	let config_path = match cli.config {
		Some(ref path) => path.clone(),
		None => user_config_path()?,
	};

	if config_path.exists() && !force {
		anyhow::bail!(
			"{} already exists. Use --force to overwrite.",
			config_path.display()
		);
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {}", config_path.display());
	Ok(ExitCode::SUCCESS)
}
