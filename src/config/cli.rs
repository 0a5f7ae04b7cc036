use crate::config::{LogFormat, ServiceConfig};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "goldprime")]
#[command(about = "Serves the national gold rate, regional prices and charts over HTTP")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "goldprime.toml")]
    pub config: String,

    /// Override server.listen_addr
    #[arg(long)]
    pub listen: Option<String>,

    /// Override logging.format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// 套用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut ServiceConfig) {
        if let Some(listen) = &self.listen {
            config.server.listen_addr = listen.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }
}
