// CLI command definitions

use super::k8s::{DeployCommand, HealthCommand, InstallCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "keda-deploy",
    version,
    about = "Kubernetes deployment tool for KEDA-autoscaled applications",
    long_about = "A standalone CLI tool for installing KEDA and deploying event-driven autoscaled applications on Kubernetes"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Install KEDA into the cluster via Helm (idempotent)
    Install(InstallCommand),

    /// Deploy an application with its service and scaling policy
    Deploy(DeployCommand),

    /// Report deployment health
    Health(HealthCommand),
}
