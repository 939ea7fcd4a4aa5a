use anyhow::Result;
use docf_package::purge_stale_working_dirs;
use std::time::Duration;

use crate::common::load_config;
use crate::logger;
use crate::GlobalOpts;

/// Working directories younger than this may belong to a running session
const STALE_AFTER: Duration = Duration::from_secs(60 * 60);

/// Remove working directories left behind by sessions that did not exit cleanly
pub fn handle_clean(all: bool, _opts: &GlobalOpts) -> Result<()> {
    let scratch = load_config().get_scratch_dir();
    let older_than = if all { Duration::ZERO } else { STALE_AFTER };

    logger::debug(&format!("Purging working directories in {}", scratch.display()));
    let removed = purge_stale_working_dirs(&scratch, older_than)?;

    if removed == 0 {
        logger::success("No stale working directories found");
    } else {
        logger::success(&format!("Removed {} stale working directories", removed));
    }
    Ok(())
}
