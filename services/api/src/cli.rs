use crate::demo::{
    run_counsellor_report, run_eligibility_check, run_platform_report, CounsellorReportArgs,
    EligibilityCheckArgs, PlatformReportArgs,
};
use crate::server;
use admitpath::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "AdmitPath Counselling Platform",
    about = "Serve and inspect the AdmitPath admissions analytics backend",
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
    /// Print the admin analytics report for a snapshot
    Report(PlatformReportArgs),
    /// Print the counsellor workload report for a snapshot
    Counsellors(CounsellorReportArgs),
    /// Score an applicant profile against the eligibility rubric
    Eligibility(EligibilityCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Serve a datastore CSV export instead of the built-in demo dataset
    #[arg(long)]
    pub(crate) snapshot_dir: Option<std::path::PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_platform_report(args),
        Command::Counsellors(args) => run_counsellor_report(args),
        Command::Eligibility(args) => run_eligibility_check(args),
    }
}
