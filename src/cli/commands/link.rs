use anyhow::{bail, Result};
use taskdash_core::{frontmatter, GithubLink, Vault};

use crate::cli::LinkArgs;

/// Execute the link command: append a GitHub URL to an issue's link list.
///
/// # Errors
///
/// Returns an error for a non-GitHub URL or a failed splice.
pub fn execute(args: &LinkArgs) -> Result<()> {
    if !args.url.starts_with("https://github.com/") {
        bail!("not a GitHub URL: {}", args.url);
    }
    let (_root, _cfg, mut dashboard) = super::open_dashboard()?;

    let snapshot = dashboard.snapshot()?;
    let Some(issue) = snapshot
        .active_issues
        .iter()
        .chain(&snapshot.archived_issues)
        .find(|i| i.id == args.id)
    else {
        println!("No issue '{}'", args.id);
        return Ok(());
    };

    // Prefer the issue file's link list: it carries cached metadata the
    // dashboard block drops.
    let mut links = match dashboard.vault().read_text(&issue.path) {
        Ok(file_text) => frontmatter::github_links(&file_text),
        Err(_) => issue.github_links.iter().map(GithubLink::new).collect(),
    };
    if links.iter().any(|l| l.url == args.url) {
        println!("{} already linked to {}", args.id, args.url);
        return Ok(());
    }
    links.push(GithubLink::new(&args.url));
    dashboard.set_github_links(&args.id, &links)?;

    println!("Linked {} to {}", args.id, args.url);
    Ok(())
}
