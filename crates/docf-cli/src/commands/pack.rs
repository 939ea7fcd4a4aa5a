use anyhow::Result;
use clap::Args;
use colored::Colorize;
use docf_package::{export_package, ExportStage};
use std::path::PathBuf;

use crate::commands::manifest_args::ManifestArgs;
use crate::common::{default_output, load_config};
use crate::logger;
use crate::GlobalOpts;

#[derive(Args, Debug, Clone)]
pub struct PackCommand {
    /// Folder containing a docs/ subfolder with Markdown files
    pub folder: PathBuf,

    /// Output .docf file (default: <folder-name>.docf)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}

/// Package a documentation folder into a .docf file
pub fn handle_pack(cmd: PackCommand, _opts: &GlobalOpts) -> Result<()> {
    let config = load_config();
    let output = cmd
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cmd.folder));

    logger::info(&format!("Packaging \"{}\"...", cmd.folder.display()));
    logger::info(&format!("Output: {}", output.display()));

    let supplied = cmd.manifest.resolve(&cmd.folder, &config)?;

    logger::spinner_start(ExportStage::Scanning.message());
    let result = export_package(&cmd.folder, &output, supplied, |stage| {
        logger::step(&stage.to_string());
        logger::spinner_message(stage.message());
    });

    match result {
        Ok(exported) => {
            logger::spinner_success(&format!(
                "Successfully created {}",
                exported.path.display()
            ));
            println!("  {} {}", "Title:".bold(), exported.manifest.title);
            println!("  {} {}", "Entry:".bold(), exported.manifest.entry_file);
            Ok(())
        }
        Err(e) => {
            logger::spinner_error("Packaging failed");
            Err(e.into())
        }
    }
}
