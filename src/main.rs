use clap::{Parser, Subcommand};
use gke_lifecycle::config::ConfigLoader;
use gke_lifecycle::logging::{init_logging, LogConfig};
use gke_lifecycle::manifest::load_cluster_config;
use gke_lifecycle::operator::{
    needs_security_compliance, validate_security_compliance, ResourceName,
};
use gke_lifecycle::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(
    name = "gke-lifecycle",
    version,
    about = "GKE cluster lifecycle and compliance tooling"
)]
struct Cli {
    /// Settings file (toml, yaml or json)
    #[arg(long, short, env = "GKE_LIFECYCLE_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a GKEClusterConfig manifest against the security compliance checklist
    Check {
        /// Path to the manifest
        file: PathBuf,
        /// Validate even when the cluster is not labelled or annotated for compliance
        #[arg(long)]
        force: bool,
    },
    /// Print the resource name used to address a cluster or node pool
    Identity {
        #[arg(long)]
        project: String,
        #[arg(long, default_value = "")]
        region: String,
        #[arg(long, default_value = "")]
        zone: String,
        #[arg(long)]
        cluster: String,
        #[arg(long)]
        node_pool: Option<String>,
    },
    /// Show the effective retry schedule for cluster deletion
    Backoff,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match ConfigLoader::new()
        .load_from_file(cli.config.as_deref())
        .load_from_env()
        .build()
    {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            return ExitCode::from(78);
        }
    };

    let _guard = match init_logging(&LogConfig::from_settings(&settings.logging)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Check { file, force } => check(&file, force),
        Commands::Identity {
            project,
            region,
            zone,
            cluster,
            node_pool,
        } => {
            if region.is_empty() && zone.is_empty() {
                Err(Error::Config(
                    "either --region or --zone is required".to_string(),
                ))
            } else {
                identity(&project, &region, &zone, &cluster, node_pool.as_deref())
            }
        }
        Commands::Backoff => settings.backoff.to_policy().map(|policy| {
            println!("initial delay: {:?}", policy.initial_delay);
            println!("max attempts:  {}", policy.steps);
            println!("factor:        {}", policy.factor);
            if let Some(cap) = policy.max_delay {
                println!("max delay:     {:?}", cap);
            }
            println!("worst case:    {:?}", policy.total_wait_bound());
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code().clamp(1, 255) as u8)
        }
    }
}

fn check(file: &Path, force: bool) -> gke_lifecycle::Result<()> {
    let config = load_cluster_config(file)?;
    let cluster = config.spec.cluster_name.as_str();

    if !force && !needs_security_compliance(&config) {
        info!(cluster, "Cluster does not require security compliance, skipping");
        println!("{}: compliance not required", cluster);
        return Ok(());
    }

    match validate_security_compliance(&config) {
        Ok(()) => {
            info!(cluster, "Cluster is security compliant");
            println!("{}: compliant", cluster);
            Ok(())
        }
        Err(violation) => {
            warn!(cluster, rule = violation.rule(), "Security compliance violation");
            println!("{}: {}", cluster, violation);
            Err(violation.into())
        }
    }
}

fn identity(
    project: &str,
    region: &str,
    zone: &str,
    cluster: &str,
    node_pool: Option<&str>,
) -> gke_lifecycle::Result<()> {
    let location = ResourceName::location(region, zone);
    let name = match node_pool {
        Some(pool) => ResourceName::node_pool(project, location, cluster, pool)?,
        None => ResourceName::cluster(project, location, cluster)?,
    };
    println!("{}", name);
    Ok(())
}
