use clap::{Parser, Subcommand};
use docf::{
    commands::{
        clean,
        config::{self, ConfigAction},
        inspect,
        open::{self, OpenCommand},
        pack::{self, PackCommand},
        unpack::{self, UnpackCommand},
        validate::{self, ValidateCommand},
    },
    init_tracing, logger, GlobalOpts,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docf")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Markdown documentation packager",
    long_about = "docf packages a folder of Markdown documentation into a single .docf file and opens it again."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Package a documentation folder into a .docf file
    Pack(PackCommand),
    /// Open a .docf file and show its entry document
    Open(OpenCommand),
    /// Extract a .docf file into a directory
    Unpack(UnpackCommand),
    /// List the entries of a .docf file without extracting it
    Inspect {
        /// The .docf file to inspect
        file: PathBuf,
    },
    /// Check that a folder can be packaged
    Validate(ValidateCommand),
    /// Remove working directories left behind by earlier sessions
    Clean {
        /// Remove every working directory regardless of age
        #[arg(long)]
        all: bool,
    },
    /// Configure docf
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    init_tracing();

    let result = match cli.command {
        Commands::Pack(cmd) => pack::handle_pack(cmd, &cli.global),
        Commands::Open(cmd) => open::handle_open(cmd, &cli.global),
        Commands::Unpack(cmd) => unpack::handle_unpack(cmd, &cli.global),
        Commands::Inspect { file } => inspect::handle_inspect(&file, &cli.global),
        Commands::Validate(cmd) => validate::handle_validate(cmd, &cli.global),
        Commands::Clean { all } => clean::handle_clean(all, &cli.global),
        Commands::Config { action } => config::handle_config(action, &cli.global),
    };

    if let Err(e) = result {
        logger::error(&format!("{:#}", e));
        if cli.global.verbosity_level() > 0 {
            logger::show_log_path();
        }
        std::process::exit(1);
    }
}
