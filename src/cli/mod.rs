use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the relay server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Start an interactive chat against a running relay
    Chat {
        /// URL of the relay's bot endpoint
        #[arg(long, default_value = "http://127.0.0.1:2222/api/bot")]
        url: String,

        /// Name shown next to replies
        #[arg(long, default_value = "Sensei")]
        assistant_name: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Chat {
            url,
            assistant_name,
        }) => {
            chat::run(&url, &assistant_name).await?;
        }
        None => {}
    }

    Ok(())
}
