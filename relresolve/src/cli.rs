use anyhow::Result;
use clap::Parser;

use crate::commands::resolve::ResolveCommand;

#[derive(Parser)]
#[command(name = "relresolve")]
#[command(about = "Find the download URL of a release tarball on a GitHub-style releases API")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub command: ResolveCommand,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(clap::Args, Clone)]
pub struct GlobalArgs {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        self.command.run(self.global_args).await
    }
}
