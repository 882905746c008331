use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "todo-api")]
#[command(about = "HTTP API for todos")]
#[command(version)]
pub struct Cli {
    #[arg(short = 'd', long, help = "Path to directory to store todos [default: data/store]")]
    pub storage_directory: Option<PathBuf>,

    #[arg(short = 'u', long, help = "Path to JSON file containing user credentials [default: data/users.json]")]
    pub users: Option<PathBuf>,

    #[arg(short = 'a', long, help = "Listen address for the HTTP server [default: 127.0.0.1:12345]")]
    pub address: Option<String>,

    #[arg(short = 'p', long, help = "Prefix for all API routes [default: /v1]")]
    pub path_prefix: Option<String>,
}

impl Cli {
    /// Flags given on the command line win over `config`.
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(dir) = self.storage_directory {
            config.storage.directory = dir;
        }
        if let Some(users) = self.users {
            config.auth.users_file = users;
        }
        if let Some(address) = self.address {
            config.server.address = address;
        }
        if let Some(prefix) = self.path_prefix {
            config.server.path_prefix = prefix;
        }
        config
    }
}
