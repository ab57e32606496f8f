//! Kubernetes automation commands

use crate::cli::display::TableRenderer;
use crate::domain::config::RawAppConfig;
use crate::domain::deploy::{DeploymentOrchestrator, HealthReporter};
use crate::infrastructure::constants::{DEFAULT_NAMESPACE, DEFAULT_TIMEOUT_SECS, KEDA_NAMESPACE};
use crate::infrastructure::installer::KedaInstaller;
use crate::infrastructure::kubernetes::client::KubeGateway;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => f.write_str("table"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct InstallCommand {
    /// Namespace to install KEDA into
    #[arg(long, short = 'n', default_value = KEDA_NAMESPACE)]
    pub namespace: String,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    #[arg(long)]
    pub context: Option<String>,

    /// Per-call timeout for cluster requests, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct DeployCommand {
    /// Path to the application configuration file (YAML)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: String,

    /// Path to kubeconfig file
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    #[arg(long)]
    pub context: Option<String>,

    /// Per-call timeout for cluster requests, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Output format for the deployment result
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct HealthCommand {
    /// Deployment name
    #[arg(long, short = 'd')]
    pub deployment: String,

    /// Kubernetes namespace
    #[arg(long, short = 'n', default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Path to kubeconfig file
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    #[arg(long)]
    pub context: Option<String>,

    /// Per-call timeout for cluster requests, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Output format for the health snapshot
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

impl InstallCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let gateway = KubeGateway::new_with_config(
            self.kubeconfig.clone(),
            self.context.clone(),
            Duration::from_secs(self.timeout),
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Kubernetes cluster: {}", e))?;

        let installer = KedaInstaller::new(&gateway, &self.namespace);
        installer
            .ensure_installed()
            .await
            .map_err(|e| anyhow::anyhow!("KEDA installation failed: {}", e))?;

        println!("KEDA installation complete!");
        Ok(())
    }
}

impl DeployCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let raw = RawAppConfig::from_file(&self.config)
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

        let orchestrator = DeploymentOrchestrator::new_with_config(
            self.kubeconfig.clone(),
            self.context.clone(),
            Duration::from_secs(self.timeout),
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Kubernetes cluster: {}", e))?;

        let result = orchestrator
            .deploy(&raw)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        match self.output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Table => {
                println!("\n{}", TableRenderer::new().render_deploy_summary(&result));
            }
        }

        println!(
            "Application {} deployed successfully!",
            result.deployment_name
        );
        Ok(())
    }
}

impl HealthCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let reporter = HealthReporter::new_with_config(
            self.kubeconfig.clone(),
            self.context.clone(),
            Duration::from_secs(self.timeout),
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Kubernetes cluster: {}", e))?;

        let snapshot = reporter
            .check_health(&self.deployment, &self.namespace)
            .await
            .map_err(|e| anyhow::anyhow!("Health check failed: {}", e))?;

        match self.output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
            OutputFormat::Table => {
                println!("{}", TableRenderer::new().render_health(&snapshot));
            }
        }

        Ok(())
    }
}
