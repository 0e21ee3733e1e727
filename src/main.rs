use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use investigator::config::AnalyzerArgs;
use investigator::flow::{Investigator, Phase};
use investigator::{logging, report};
use serde_json::json;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "investigator",
    about = "Check a YouTube video for credible and misleading statements"
)]
struct Cli {
    /// Video link (watch, shorts, youtu.be or embed).
    url: String,

    /// Print the result as JSON instead of a text report.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    analyzer: AnalyzerArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();
    logging::init("investigator=info");

    let cli = Cli::parse();
    let analyzer = cli.analyzer.build().context("failed to configure analyzer")?;
    let mut investigator = Investigator::new(analyzer, cli.analyzer.timeout());

    let succeeded = {
        let phase = investigator
            .investigate(cli.url.clone())
            .await
            .context("submission refused")?;
        matches!(phase, Phase::Succeeded { .. })
    };

    let submission = investigator.submission();
    if cli.json {
        let body = json!({
            "url": submission.url(),
            "message": submission.notice(),
            "statements": submission.results(),
            "summary": submission.results().summary(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{}", report::render(submission));
    }

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
