/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use colored::*;

use xfindsub::cli::Args;
use xfindsub::progress::ProgressSink;
use xfindsub::{load_domains, logging, output, Error, Pipeline, ScanConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BANNER: &str = r#"
__  _______ ___ _   _ ____  ____  _   _ ____
\ \/ /  ___|_ _| \ | |  _ \/ ___|| | | | __ )
 \  /| |_   | ||  \| | | | \___ \| | | |  _ \
 /  \|  _|  | || |\  | |_| |___) | |_| | |_) |
/_/\_\_|   |___|_| \_|____/|____/ \___/|____/
"#;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose, args.silent);

    if let Err(err) = run(args).await {
        eprintln!("{} {:#}", "!".bright_red(), err);
        let code = match err.downcast_ref::<Error>() {
            Some(e) if e.is_input() => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

fn print_banner() {
    eprintln!("{}", BANNER.bright_cyan());
    eprintln!(
        "{}",
        format!("xfindsub v{} - Passive Subdomain Finder", VERSION).bright_magenta()
    );
    eprintln!("{}", "=".repeat(60).bright_yellow());
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = ScanConfig::from_args(&args)?;
    let domains = load_domains(args.domain.as_deref(), args.list.as_deref()).await?;

    if !args.silent {
        print_banner();
        let targets: Vec<&str> = domains.iter().map(|d| d.as_str()).collect();
        eprintln!("{} {}", "[+] Target  :".bright_green(), targets.join(", "));
        eprintln!("{} {}", "[+] Sources :".bright_green(), config.sources.join(", "));
        eprintln!(
            "{} {}\n",
            "[+] Resolve :".bright_green(),
            if config.resolve { "ON" } else { "OFF" }
        );
    }

    let mut pipeline = Pipeline::from_config(&config)?;
    if !args.silent {
        pipeline = pipeline.with_sink(Arc::new(ProgressSink::new()));
    }

    let start_time = Local::now();
    let mut total = 0;
    let silent = args.silent;
    let results = pipeline
        .run_batch_with(&domains, config.source_names(), config.resolve, |domain, hosts| {
            for host in hosts {
                println!("{}", host);
            }
            total += hosts.len();
            if !silent {
                eprintln!(
                    "{}\n",
                    format!("[✔] {}: {} subdomains", domain, hosts.len()).bright_green()
                );
            }
        })
        .await?;
    let end_time = Local::now();

    if let Some(path) = args.output.as_deref() {
        let written = output::write_txt(path, &results)
            .await
            .with_context(|| format!("saving TXT to {}", path.display()))?;
        if !args.silent {
            eprintln!(
                "{} {} ({})",
                "[+] saved TXT:".bright_green(),
                path.display(),
                written
            );
        }
    }

    if let Some(path) = args.json.as_deref() {
        output::write_json(path, &results)
            .await
            .with_context(|| format!("saving JSON to {}", path.display()))?;
        if !args.silent {
            eprintln!("{} {}", "[+] saved JSON:".bright_green(), path.display());
        }
    }

    if !args.silent {
        let duration = end_time.signed_duration_since(start_time);
        eprintln!("\n{}", "=".repeat(60).bright_yellow());
        eprintln!(
            "{} {}",
            "Start Time:".bright_blue(),
            start_time.format("%H:%M:%S").to_string().bright_green()
        );
        eprintln!(
            "{} {}",
            "End Time:".bright_blue(),
            end_time.format("%H:%M:%S").to_string().bright_green()
        );
        eprintln!(
            "{} {}",
            "Total Duration:".bright_blue(),
            format!("{} minutes {} seconds", duration.num_minutes(), duration.num_seconds() % 60).bright_green()
        );
        eprintln!(
            "{}",
            format!("Done! Total subdomains: {}", total).bright_green().bold()
        );
    }

    Ok(())
}
