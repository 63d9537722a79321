use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use vitrine_core::SortKey;
use vitrine_session::{render_page, BrowserConfig, Controller, Interaction, Session, TextSink};
use vitrine_store::{load_catalog, FileSource};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Browse a product catalog from the terminal", long_about = None)]
struct Cli {
    /// Dataset document: { "products": [...], "categories": [...] }
    #[arg(long, env = "VITRINE_DATA")]
    data: PathBuf,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print one page of results for a query
    Browse {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        /// Index into the price bracket table (0 = All)
        #[arg(long, default_value_t = 0)]
        price: usize,
        #[arg(long, default_value = "price_asc", value_parser = parse_sort)]
        sort: SortKey,
        /// Number of pages to reveal
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        json: bool,
    },
    /// List categories, brands and price brackets
    Facets {
        #[arg(long)]
        json: bool,
    },
    /// Read commands from stdin: search, category, price, brand, sort, more, quit
    Interactive,
}

fn parse_sort(s: &str) -> std::result::Result<SortKey, Infallible> {
    s.parse()
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Apply(Interaction),
    Quit,
    Skip,
}

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let line = line.trim();
    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((v, a)) => (v, a.trim()),
        None => (line, ""),
    };
    let interaction = match verb {
        "" => return Ok(Command::Skip),
        "quit" | "exit" => return Ok(Command::Quit),
        "search" => Interaction::SearchInput(arg.to_string()),
        "category" if arg.is_empty() => Interaction::ClearCategory,
        "category" => Interaction::ToggleCategory(arg.to_string()),
        "price" => Interaction::TogglePriceRange(
            arg.parse()
                .map_err(|_| format!("price expects a bracket index, got {:?}", arg))?,
        ),
        "brand" if arg.is_empty() || arg == "-" => Interaction::SelectBrand(None),
        "brand" => Interaction::SelectBrand(Some(arg.to_string())),
        "sort" => Interaction::SetSort(parse_sort(arg).unwrap_or_default()),
        "more" => Interaction::LoadMore,
        other => return Err(format!("unknown command {:?}", other)),
    };
    Ok(Command::Apply(interaction))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("VITRINE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = BrowserConfig::from_env();
    let source = FileSource::new(&cli.data);
    let catalog = load_catalog(&source, config.price_ranges.clone())
        .await
        .with_context(|| format!("loading catalog from {}", cli.data.display()))?;

    match cli.cmd {
        Cmd::Browse {
            search,
            category,
            brand,
            price,
            sort,
            page,
            json,
        } => {
            let mut controller = Controller::new(catalog, config);
            controller.set_search(&search);
            if let Some(c) = category {
                controller.toggle_category(&c);
            }
            controller.select_brand(brand.as_deref());
            if price != 0 {
                controller.toggle_price_range(price)?;
            }
            let mut view = controller.set_sort(sort);
            for _ in 1..page {
                if !view.has_more {
                    break;
                }
                view = controller.load_more();
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                render_page(&mut TextSink::new(std::io::stdout().lock()), &view)?;
            }
        }
        Cmd::Facets { json } => {
            if json {
                let doc = serde_json::json!({
                    "categories": catalog.categories(),
                    "brands": catalog.brands(),
                    "price_ranges": catalog.price_ranges(),
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("categories:");
                for c in catalog.categories() {
                    println!("  {}", c);
                }
                println!("brands:");
                for b in catalog.brands() {
                    println!("  {}", b);
                }
                println!("price:");
                for (i, r) in catalog.price_ranges().iter().enumerate() {
                    println!("  {} {}", i, r.label);
                }
            }
        }
        Cmd::Interactive => {
            let settle = config.search_debounce * 2;
            let controller = Controller::new(catalog, config);
            let session = Session::new(controller, TextSink::new(std::io::stdout()));
            let (tx, rx) = mpsc::channel(64);
            let reader = tokio::spawn(async move {
                let mut lines = BufReader::new(tokio::io::stdin()).lines();
                loop {
                    let line = match lines.next_line().await {
                        Ok(Some(line)) => line,
                        Ok(None) => {
                            // end of input: let a trailing search burst settle first
                            tokio::time::sleep(settle).await;
                            break;
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "stdin read failed");
                            break;
                        }
                    };
                    match parse_command(&line) {
                        Ok(Command::Apply(i)) => {
                            if tx.send(i).await.is_err() {
                                break;
                            }
                        }
                        Ok(Command::Quit) => break,
                        Ok(Command::Skip) => {}
                        Err(msg) => eprintln!("{}", msg),
                    }
                }
            });
            let controller = session.run(rx).await;
            reader.await?;
            tracing::debug!(page = controller.query().page(), "interactive session done");
        }
    }
    Ok(())
}
