use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use pentaudit_core::{AuditRequest, Auditor, FetchConfig};

mod echo;
mod render;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the audit report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Audit a web page against the five-pillar on-page SEO framework
#[derive(Parser, Debug)]
#[command(name = "pentaudit")]
#[command(version = VERSION)]
#[command(about = "Run a five-pillar on-page SEO audit", long_about = None)]
struct Args {
    /// Page URL to audit (include http:// or https://)
    #[arg(value_name = "URL")]
    url: String,

    /// Primary keyword for density and placement checks
    #[arg(short = 'k', long, default_value = "", value_name = "KEYWORD")]
    keyword: String,

    /// Related (LSI) terms, comma-separated
    #[arg(long, default_value = "", value_name = "TERMS")]
    related: String,

    /// Externally measured originality percentage (e.g. 97)
    #[arg(long, value_name = "PCT")]
    originality: Option<f64>,

    /// PageSpeed Insights API key; enables measured performance mode
    #[arg(long, value_name = "KEY")]
    pagespeed_key: Option<String>,

    /// ScraperAPI key for the proxy fetch fallback
    #[arg(long, value_name = "KEY")]
    scraper_key: Option<String>,

    /// HTTP timeout for the page fetch, in seconds
    #[arg(long, default_value = "15", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable progress logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        echo::print_banner();
    }

    let mut config = FetchConfig {
        timeout: args.timeout,
        scraper_api_key: args.scraper_key.clone(),
        ..FetchConfig::default()
    };
    if let Some(ua) = &args.user_agent {
        config.user_agent = ua.clone();
    }

    let request = AuditRequest::new(&args.url)
        .keyword(&args.keyword)
        .related_terms_from_csv(&args.related)
        .originality(args.originality)
        .pagespeed_key(args.pagespeed_key.clone());

    if args.verbose {
        echo::print_step(1, 2, &format!("Auditing {}", args.url.bright_white().underline()));
        if request.pagespeed_key.is_some() {
            echo::print_info("Performance mode: measured (PageSpeed)");
        } else {
            echo::print_info("Performance mode: heuristic (no PageSpeed key)");
        }
    }

    let auditor = Auditor::with_config(config).context("Failed to build HTTP client")?;
    let result = match auditor.run(&request).await {
        Ok(result) => result,
        Err(err) => {
            echo::print_error(&err.to_string());
            std::process::exit(1);
        }
    };

    if args.verbose {
        echo::print_step(2, 2, "Rendering report");
        echo::print_success(&format!(
            "Detected content type: {}",
            result.content_type.to_string().bright_white()
        ));
    }

    let rendered = match args.format {
        OutputFormat::Text => render::render_text(&result),
        OutputFormat::Json => render::render_json(&result).context("Failed to encode report")?,
    };

    match args.output {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Report written to {}", path.display()));
        }
        None => {
            print!("{}", rendered);
        }
    }

    Ok(())
}
