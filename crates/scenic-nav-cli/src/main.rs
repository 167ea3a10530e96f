use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use scenic_nav_cli::data::{load_dataset, write_sample, DataPaths};
use scenic_nav_cli::output::OutputFormat;
use scenic_nav_lib::{Category, Language, PathAlgorithm, SpotId, UserPreference};

mod commands;

use commands::mst::{MstAlgorithm, MstArgs};
use commands::paths::PathsArgs;
use commands::route::RouteArgs;
use commands::search::{SearchArgs, SortKey};
use commands::tour::TourArgs;
use commands::traverse::{TraversalOrder, TraverseArgs};
use commands::CommandContext;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scenic-area route planning and catalog search")]
struct Cli {
    /// Directory holding spots.json and graph.csv.
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Override the spot records file.
    #[arg(long, global = true)]
    spots: Option<PathBuf>,

    /// Override the edge records file.
    #[arg(long, global = true)]
    edges: Option<PathBuf>,

    /// Treat every edge record as one-way instead of building an undirected graph.
    #[arg(long, global = true)]
    directed: bool,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Language used for spot names.
    #[arg(long, global = true, value_enum, default_value_t = LanguageArg::Zh)]
    lang: LanguageArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the bundled Temple of Heaven sample data into the data directory.
    Init {
        /// Overwrite existing files.
        #[arg(long)]
        force: bool,
    },
    /// Shortest route between two spots.
    Route {
        #[arg(long)]
        from: SpotId,
        #[arg(long)]
        to: SpotId,
        #[arg(long, value_enum, default_value_t = AlgorithmArg::Dijkstra)]
        algorithm: AlgorithmArg,
        /// Penalise crowded paths.
        #[arg(long)]
        avoid_crowds: bool,
    },
    /// Closed tour through a set of spots, starting and ending at the first.
    Tour {
        /// Comma-separated spot ids.
        #[arg(long, value_delimiter = ',', num_args = 1.., required = true)]
        stops: Vec<SpotId>,
        #[arg(long)]
        avoid_crowds: bool,
    },
    /// Minimum spanning tree of the whole map.
    Mst {
        #[arg(long, value_enum, default_value_t = MstAlgorithm::Kruskal)]
        algorithm: MstAlgorithm,
        /// Root for Prim and for the printed walk.
        #[arg(long)]
        start: Option<SpotId>,
        #[arg(long)]
        avoid_crowds: bool,
    },
    /// Depth- or breadth-first visiting order from a spot.
    Traverse {
        #[arg(long)]
        start: SpotId,
        #[arg(long, value_enum, default_value_t = TraversalOrder::Dfs)]
        order: TraversalOrder,
    },
    /// Search the spot catalog.
    Search {
        /// Name fragment (or whole name with --fuzzy).
        #[arg(long, default_value = "")]
        text: String,
        /// Category label, Chinese or English.
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,
        #[arg(long)]
        accessible_only: bool,
        /// Accept names within two edits of --text.
        #[arg(long)]
        fuzzy: bool,
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
    },
    /// Every simple path between two spots, cheapest first.
    Paths {
        #[arg(long)]
        from: SpotId,
        #[arg(long)]
        to: SpotId,
        /// Maximum number of paths to print.
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        avoid_crowds: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Dijkstra,
    #[value(name = "a-star")]
    AStar,
}

impl From<AlgorithmArg> for PathAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Dijkstra => PathAlgorithm::Dijkstra,
            AlgorithmArg::AStar => PathAlgorithm::AStar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LanguageArg {
    Zh,
    En,
}

impl From<LanguageArg> for Language {
    fn from(value: LanguageArg) -> Self {
        match value {
            LanguageArg::Zh => Language::Zh,
            LanguageArg::En => Language::En,
        }
    }
}

fn parse_category(value: &str) -> std::result::Result<Category, String> {
    value.parse::<Category>().map_err(|err| err.to_string())
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    if let Command::Init { force } = cli.command {
        let paths = write_sample(&cli.data_dir, force)?;
        println!(
            "Sample data written to {} and {}",
            paths.spots.display(),
            paths.edges.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let paths = DataPaths::resolve(&cli.data_dir, cli.spots.as_deref(), cli.edges.as_deref());
    let dataset = load_dataset(&paths, cli.directed)?;
    let mut preference = UserPreference::default();
    preference.language = cli.lang.into();
    let context = CommandContext {
        dataset,
        preference,
        format: cli.format,
    };

    match cli.command {
        Command::Init { .. } => Ok(ExitCode::SUCCESS),
        Command::Route {
            from,
            to,
            algorithm,
            avoid_crowds,
        } => {
            let found = commands::route::handle_route(
                &context,
                &RouteArgs {
                    from,
                    to,
                    algorithm: algorithm.into(),
                    avoid_crowds,
                },
            )?;
            Ok(if found {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Tour {
            stops,
            avoid_crowds,
        } => {
            commands::tour::handle_tour(
                &context,
                &TourArgs {
                    stops,
                    avoid_crowds,
                },
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Mst {
            algorithm,
            start,
            avoid_crowds,
        } => {
            commands::mst::handle_mst(
                &context,
                &MstArgs {
                    algorithm,
                    start,
                    avoid_crowds,
                },
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Traverse { start, order } => {
            commands::traverse::handle_traverse(&context, &TraverseArgs { start, order })?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Search {
            text,
            category,
            accessible_only,
            fuzzy,
            sort,
        } => {
            commands::search::handle_search(
                &context,
                &SearchArgs {
                    text,
                    category,
                    accessible_only,
                    fuzzy,
                    sort,
                },
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Paths {
            from,
            to,
            limit,
            avoid_crowds,
        } => {
            commands::paths::handle_paths(
                &context,
                &PathsArgs {
                    from,
                    to,
                    limit,
                    avoid_crowds,
                },
            )?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
