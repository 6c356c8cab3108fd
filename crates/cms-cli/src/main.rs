use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use cms_cli::{DocumentKind, ReviseOptions};
use cms_revision::EngineConfig;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn document_arg() -> Arg {
    Arg::new("document")
        .long("document")
        .short('d')
        .default_value("proposal")
        .value_parser(DocumentKind::NAMES)
        .help("Document type")
}

fn cli() -> Command {
    Command::new("cms")
        .version(cms_revision::VERSION)
        .about("Section-level revision tool for curriculum documents")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Engine configuration (TOML)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("normalize")
                .about("Print the normalized state of a server document")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Server document (JSON)"),
                )
                .arg(document_arg()),
        )
        .subcommand(
            Command::new("revise")
                .about("Replay an edit script and print the submission payload")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Server document (JSON)"),
                )
                .arg(document_arg())
                .arg(
                    Arg::new("edits")
                        .long("edits")
                        .short('e')
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Edit script (JSON array)"),
                )
                .arg(
                    Arg::new("session-dir")
                        .long("session-dir")
                        .value_parser(value_parser!(PathBuf))
                        .help("Persist the session in this directory"),
                )
                .arg(
                    Arg::new("resume")
                        .long("resume")
                        .action(ArgAction::SetTrue)
                        .requires("session-dir")
                        .help("Continue from the persisted session"),
                )
                .arg(
                    Arg::new("step")
                        .long("step")
                        .default_value("0")
                        .value_parser(value_parser!(u32))
                        .help("Wizard step to record with the session"),
                ),
        )
        .subcommand(
            Command::new("sections")
                .about("Print the section registry of a document type")
                .arg(document_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn load_config(matches: &ArgMatches) -> Result<EngineConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => Ok(EngineConfig::load(path)?),
        None => Ok(EngineConfig::default()),
    }
}

fn read(path: &PathBuf) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn document_kind(args: &ArgMatches) -> Result<DocumentKind> {
    args.get_one::<String>("document")
        .map_or("proposal", String::as_str)
        .parse()
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));
    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("normalize", args)) => {
            let kind = document_kind(args)?;
            let file = args.get_one::<PathBuf>("file").context("missing file")?;
            let state = cms_cli::normalize(kind, &read(file)?)?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Some(("revise", args)) => {
            let kind = document_kind(args)?;
            let file = args.get_one::<PathBuf>("file").context("missing file")?;
            let edits = args.get_one::<PathBuf>("edits").context("missing edits")?;
            let options = ReviseOptions {
                session_dir: args.get_one::<PathBuf>("session-dir").cloned(),
                resume: args.get_flag("resume"),
                step: args.get_one::<u32>("step").copied().unwrap_or_default(),
            };
            let payload = cms_cli::revise(kind, &read(file)?, &read(edits)?, &config, &options)?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Some(("sections", args)) => {
            let kind = document_kind(args)?;
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&cms_cli::sections(kind))?);
            } else {
                print!("{}", cms_cli::sections_text(kind));
            }
        }
        _ => unreachable!("subcommand_required"),
    }

    Ok(())
}
