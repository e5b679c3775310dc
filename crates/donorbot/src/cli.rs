use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "donorbot")]
#[command(author, version, about = "Telegram bot connecting blood donors with people who need them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (the default when no subcommand is given)
    Run {
        /// Receive updates through a webhook instead of long polling (needs WEBHOOK_URL)
        #[arg(long)]
        webhook: bool,
    },

    /// Validate settings and open the donor store, then exit
    CheckConfig,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The subcommand to run, `run` without `--webhook` if none was given.
    pub fn command_or_default(self) -> Commands {
        self.command.unwrap_or(Commands::Run { webhook: false })
    }
}
