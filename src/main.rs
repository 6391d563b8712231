//! domwalk - outline and ancestor dumps of HTML documents

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use domwalk::dom::{Dom, NodeId, NodeRef, parse_html_file};
use domwalk::{Walk, descend, try_ascend};

#[derive(Parser)]
#[command(name = "domwalk")]
#[command(version, about = "Walk HTML document trees", long_about = None)]
#[command(after_help = "EXAMPLES:
    domwalk outline page.html                    Outline the whole document
    domwalk outline page.html --from nav -d 2    Two levels below #nav
    domwalk ancestors page.html --id footer      Ancestors of #footer")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a node and its descendants, indented by depth
    Outline(OutlineArgs),
    /// Print the ancestors of a node, nearest first
    Ancestors(AncestorsArgs),
}

#[derive(Args)]
struct OutlineArgs {
    /// HTML file to read
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Start at the element with this id attribute instead of the document
    #[arg(long, value_name = "ID")]
    from: Option<String>,

    /// Do not descend below this depth
    #[arg(short = 'd', long, value_name = "N")]
    max_depth: Option<usize>,

    /// Hide text, comment and doctype nodes
    #[arg(short, long)]
    elements_only: bool,

    /// Print a JSON array instead of an indented outline
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["id", "index"])))]
struct AncestorsArgs {
    /// HTML file to read
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Element id attribute
    #[arg(long, value_name = "ID")]
    id: Option<String>,

    /// Raw node index, as printed by `outline --json`
    #[arg(long, value_name = "N")]
    index: Option<u32>,
}

/// One line of an outline.
#[derive(Debug, Serialize, PartialEq)]
struct Entry {
    index: u32,
    depth: usize,
    label: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Outline(args) => outline(args),
        Command::Ancestors(args) => ancestors(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn outline(args: &OutlineArgs) -> Result<(), String> {
    let dom = parse_html_file(&args.input).map_err(|e| e.to_string())?;
    let start = match &args.from {
        Some(id) => dom.require_id(id).map_err(|e| e.to_string())?,
        None => NodeId::DOCUMENT,
    };
    let start = dom.checked(start).resolve().map_err(|e| e.to_string())?;

    let entries = collect_outline(start, args.max_depth, args.elements_only);
    debug!(entries = entries.len(), "outline collected");

    if args.json {
        let json = serde_json::to_string_pretty(&entries).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        for entry in &entries {
            println!("{}{}", "  ".repeat(entry.depth), entry.label);
        }
    }
    Ok(())
}

fn collect_outline(start: NodeRef<'_>, max_depth: Option<usize>, elements_only: bool) -> Vec<Entry> {
    let mut entries = Vec::new();
    descend(start, |node, depth| {
        let whitespace = node.text().is_some_and(|t| t.trim().is_empty());
        let shown = if elements_only {
            depth == 0 || node.is_element()
        } else {
            !whitespace
        };
        if shown {
            entries.push(Entry {
                index: node.id().0,
                depth,
                label: node.to_string(),
            });
        }
        Walk::prune_if(max_depth.is_some_and(|max| depth >= max))
    });
    entries
}

fn ancestors(args: &AncestorsArgs) -> Result<(), String> {
    let dom = parse_html_file(&args.input).map_err(|e| e.to_string())?;
    let target = match &args.id {
        Some(id) => dom.require_id(id).map_err(|e| e.to_string())?,
        None => NodeId(args.index.unwrap_or_default()),
    };

    let chain = ancestor_chain(&dom, target).map_err(|e| e.to_string())?;
    for id in chain {
        if let Some(node) = dom.node(id) {
            println!("{}\t{node}", id.0);
        }
    }
    Ok(())
}

fn ancestor_chain(dom: &Dom, target: NodeId) -> domwalk::Result<Vec<NodeId>> {
    let mut chain = Vec::new();
    try_ascend(dom.checked(target), |node| {
        chain.push(node.id());
        true
    })?;
    Ok(chain)
}
