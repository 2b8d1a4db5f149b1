use crate::demo::{run_demo, run_questions, run_score, DemoArgs, ScoreArgs};
use crate::server;
use career_readiness::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Career Readiness Assessment",
    about = "Score, serve, and demonstrate the waste management career readiness assessment",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Build a results report from a saved assessment JSON file
    Score(ScoreArgs),
    /// List every question id and prompt in the question bank
    Questions,
    /// Run a scripted candidate session end to end
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Questions => {
            run_questions();
            Ok(())
        }
        Command::Demo(args) => run_demo(args),
    }
}
