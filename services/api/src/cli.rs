use crate::commands::{
    run_records, run_report_export, run_report_show, ReportExportArgs, ReportShowArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use crm_reports::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "CRM Reports",
    about = "Serve and export CRM dashboard reports from the command line",
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
    /// Render or export a single report
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// List the seeded contacts, deals and activities with their pipeline rollup
    Records,
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Print a report's metrics, chart and pipeline breakdown
    Show(ReportShowArgs),
    /// Write a report as CSV
    Export(ReportExportArgs),
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
        Command::Report {
            command: ReportCommand::Show(args),
        } => run_report_show(args),
        Command::Report {
            command: ReportCommand::Export(args),
        } => run_report_export(args),
        Command::Records => run_records(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_reports::reports::ReportType;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["crm-reports-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn report_export_parses_type_and_date() {
        let cli = Cli::try_parse_from([
            "crm-reports-api",
            "report",
            "export",
            "--type",
            "contacts",
            "--today",
            "2024-06-30",
            "--stdout",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Report {
                command: ReportCommand::Export(args),
            }) => {
                assert_eq!(args.report, ReportType::Contacts);
                assert_eq!(args.today.map(|d| d.to_string()).as_deref(), Some("2024-06-30"));
                assert!(args.stdout);
                assert!(args.out_dir.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_report_type_is_rejected() {
        let err = Cli::try_parse_from(["crm-reports-api", "report", "show", "--type", "forecast"])
            .expect_err("unknown type");
        assert!(err.to_string().contains("forecast"));
    }
}
