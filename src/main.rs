// Copyright 2025 RustFS Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use shadow_rs::shadow;
use tenant_wizard::wizard::calc::presets::Integration;

shadow!(build);

#[derive(Parser)]
#[command(name = "tenant-wizard")]
#[command(about = "Create Tenant wizard console", long_about = None)]
#[command(version = build::PKG_VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Output the tenant creation request schema in YAML
    Schema {
        /// Optional output path. If not set, the output will be written to stdout.
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Run the wizard console
    Server {
        #[arg(short, long, default_value_t = 9090)]
        port: u16,

        /// Base URL of the operator API
        #[arg(long, env = "CONSOLE_API_ENDPOINT")]
        api_endpoint: String,

        /// Storage integration new wizards start with
        #[arg(long, default_value_t = Integration::Default)]
        integration: Integration,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Schema { file } => tenant_wizard::schema(file).await?,
        Commands::Server {
            port,
            api_endpoint,
            integration,
        } => tenant_wizard::run(port, api_endpoint, integration).await?,
    }

    Ok(())
}
