use anyhow::Result;
use clap::Args;
use docf_package::unpack_package;
use std::path::PathBuf;

use crate::logger;
use crate::GlobalOpts;

#[derive(Args, Debug, Clone)]
pub struct UnpackCommand {
    /// The .docf file to unpack
    pub file: PathBuf,

    /// Destination directory
    #[arg(short, long)]
    pub dest: PathBuf,
}

/// Extract a .docf file into a chosen directory and validate it
pub fn handle_unpack(cmd: UnpackCommand, _opts: &GlobalOpts) -> Result<()> {
    let unpacked = unpack_package(&cmd.file, &cmd.dest)?;

    for skipped in &unpacked.report.skipped {
        logger::warn(&format!(
            "Skipped archive entry \"{}\" ({})",
            skipped.name, skipped.reason
        ));
    }

    logger::success(&format!(
        "Unpacked \"{}\" ({} files) into {}",
        unpacked.manifest.title,
        unpacked.report.files.len(),
        unpacked.destination.display()
    ));
    println!("{}", unpacked.docs_path.join(&unpacked.manifest.entry_file).display());
    Ok(())
}
