use anyhow::Result;
use clap::Args;
use docf_package::plan_export;
use std::path::PathBuf;

use crate::commands::manifest_args::ManifestArgs;
use crate::common::load_config;
use crate::logger;
use crate::GlobalOpts;

#[derive(Args, Debug, Clone)]
pub struct ValidateCommand {
    /// Folder containing a docs/ subfolder with Markdown files
    pub folder: PathBuf,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}

/// Run every export check without writing anything
pub fn handle_validate(cmd: ValidateCommand, _opts: &GlobalOpts) -> Result<()> {
    let config = load_config();
    let supplied = cmd.manifest.resolve(&cmd.folder, &config)?;
    let manifest = plan_export(&cmd.folder, supplied)?;

    print!("{}", manifest.to_json_string()?);
    logger::success(&format!(
        "\"{}\" is ready to pack",
        cmd.folder.display()
    ));
    Ok(())
}
