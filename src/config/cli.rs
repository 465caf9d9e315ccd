use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "dish-explorer")]
#[command(about = "Describe Chinese dishes, picture them, and find nearby restaurants")]
pub struct CliConfig {
    #[arg(long, help = "TOML config file; environment variables are used when omitted")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override the listen address, e.g. 0.0.0.0:8080")]
    pub bind: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}
