use anyhow::Result;
use clap::Args;
use colored::Colorize;
use docf_package::{OpenedPackage, Session};
use std::path::PathBuf;

use crate::common::load_config;
use crate::logger;
use crate::GlobalOpts;

#[derive(Args, Debug, Clone)]
pub struct OpenCommand {
    /// The .docf file to open
    pub file: PathBuf,

    /// Leave the working directory in place instead of removing it on exit
    #[arg(long)]
    pub keep: bool,

    /// Print only the summary, not the entry file
    #[arg(long)]
    pub no_content: bool,
}

fn print_summary(opened: &OpenedPackage, viewer_theme: &str) {
    let manifest = &opened.manifest;
    let theme = match viewer_theme {
        "system" => manifest.theme.as_deref().unwrap_or("light"),
        other => other,
    };

    println!("{}", manifest.title.bold().green());
    println!("  {} {}", "Version:".cyan(), manifest.version);
    if let Some(author) = &manifest.author {
        println!("  {} {}", "Author:".cyan(), author);
    }
    println!("  {} {}", "Theme:".cyan(), theme);
    println!("  {} {}", "Entry:".cyan(), manifest.entry_file);
    println!(
        "  {} {}",
        "Working directory:".cyan(),
        opened.working_dir.path().display()
    );
}

/// Open a .docf file for viewing
pub fn handle_open(cmd: OpenCommand, _opts: &GlobalOpts) -> Result<()> {
    let config = load_config();
    let mut session = Session::new(config.get_scratch_dir());

    let opened = session.open(&cmd.file)?;
    print_summary(opened, config.get_viewer_theme());

    for skipped in &opened.report.skipped {
        logger::warn(&format!(
            "Skipped archive entry \"{}\" ({})",
            skipped.name, skipped.reason
        ));
    }

    println!("  {}", "Documents:".cyan());
    for name in opened.list_docs()? {
        println!("    {}", name);
    }

    if !cmd.no_content {
        println!();
        println!("{}", opened.read_entry()?);
    }

    if cmd.keep {
        if let Some(detached) = session.detach() {
            let path = detached.working_dir.keep();
            logger::success(&format!("Working directory kept at {}", path.display()));
        }
        return Ok(());
    }

    session.close()?;
    Ok(())
}
