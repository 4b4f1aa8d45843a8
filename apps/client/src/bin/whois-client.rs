use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use whois_lookup_client::{parse_prompt, ApiClient, LookupView, PromptCommand, DEFAULT_API_URL};
use whois_lookup_core::LookupType;

#[derive(Parser)]
#[command(name = "whois-client")]
#[command(about = "Look up domain and contact records through the WHOIS gateway")]
struct Cli {
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Domain to look up once; starts an interactive prompt when omitted
    domain: Option<String>,

    #[arg(long = "type", value_parser = parse_lookup_type, default_value = "domain")]
    lookup_type: LookupType,
}

fn parse_lookup_type(value: &str) -> Result<LookupType, String> {
    value
        .parse::<LookupType>()
        .map_err(|_| format!("unknown lookup type {value:?}; expected domain or contact"))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))?;

    let mut view = LookupView::new(ApiClient::new(cli.api_url));
    view.lookup_type = cli.lookup_type;

    match cli.domain {
        Some(domain) => run_once(&mut view, domain).await,
        None => run_interactive(&mut view).await.map(|_| ExitCode::SUCCESS),
    }
}

async fn run_once(view: &mut LookupView, domain: String) -> anyhow::Result<ExitCode> {
    view.domain = domain;
    search(view).await;
    print_view(view);

    if view.toast().is_visible() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

async fn run_interactive(view: &mut LookupView) -> anyhow::Result<()> {
    println!("{}", "WHOIS Lookup".bold());
    println!("Enter '<domain> [domain|contact]' to search, '/help' for commands");
    println!("---");

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        print!("[{}] > ", view.lookup_type.as_str().cyan());
        std::io::Write::flush(&mut std::io::stdout()).context("failed to flush stdout")?;

        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break;
        }

        match parse_prompt(&line) {
            Ok(PromptCommand::Empty) => {
                if view.toast().is_visible() {
                    print_view(view);
                }
            }
            Ok(PromptCommand::Quit) => {
                println!("Goodbye!");
                break;
            }
            Ok(PromptCommand::Help) => {
                println!("Available commands:");
                println!("  <domain> [domain|contact]  - Look up a domain");
                println!("  /type, /t <domain|contact> - Change the lookup type");
                println!("  /dismiss, /d               - Hide the current error");
                println!("  /quit, /exit, /q           - Exit");
            }
            Ok(PromptCommand::Dismiss) => view.dismiss_toast(),
            Ok(PromptCommand::SetType(lookup_type)) => {
                view.lookup_type = lookup_type;
                print_view(view);
            }
            Ok(PromptCommand::Search {
                domain,
                lookup_type,
            }) => {
                if let Some(lookup_type) = lookup_type {
                    view.lookup_type = lookup_type;
                }
                view.domain = domain;
                search(view).await;
                print_view(view);
            }
            Err(message) => println!("{}", message.yellow()),
        }
    }

    Ok(())
}

async fn search(view: &mut LookupView) {
    let (domain, lookup_type) = view.begin_submit();
    println!("{}", view.button_label().dimmed());
    let result = view.client().lookup(&domain, lookup_type).await;
    view.finish_submit(result);
}

fn print_view(view: &LookupView) {
    for line in view.render().lines() {
        if line.starts_with("[error]") {
            println!("{}", line.red().bold());
        } else {
            println!("{line}");
        }
    }
}
