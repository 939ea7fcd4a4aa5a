use anyhow::Result;
use colored::Colorize;
use docf_archive::{inspect, EntryVerdict};
use std::path::Path;

use crate::GlobalOpts;

/// List the entries of a .docf file and what extraction would do with them
pub fn handle_inspect(file: &Path, _opts: &GlobalOpts) -> Result<()> {
    let entries = inspect(file)?;

    println!("{}", file.display().to_string().bold());
    let mut skipped = 0;
    for entry in &entries {
        let verdict = match &entry.verdict {
            EntryVerdict::Extract(_) => "ok".green().to_string(),
            EntryVerdict::Skip(reason) => {
                skipped += 1;
                format!("skip: {}", reason).red().to_string()
            }
        };
        if entry.is_dir {
            println!("  {:>10}  {}  {}", "-", entry.name.blue(), verdict);
        } else {
            println!("  {:>10}  {}  {}", entry.size, entry.name, verdict);
        }
    }
    println!(
        "{} entries, {} would be skipped",
        entries.len(),
        skipped
    );
    Ok(())
}
