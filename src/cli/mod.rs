//! CLI command handlers
//!
//! Each subcommand is implemented in its own module. Handlers open the
//! vault, run the corresponding library operation, and print human-readable
//! lines or JSON.

pub mod brief;
pub mod info;
pub mod links;
pub mod list;
pub mod search;

use crate::error::Result;
use crate::types::SearchMatch;

/// Print matches as aligned lines or a JSON array
pub(crate) fn print_matches(matches: &[SearchMatch], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No matching notes.");
        return Ok(());
    }

    for m in matches {
        let tags = if m.tags.is_empty() {
            String::new()
        } else {
            format!(
                "  tags: {}",
                m.tags.iter().cloned().collect::<Vec<_>>().join(", ")
            )
        };
        let distance = match m.distance {
            Some(d) => format!("  distance: {}", d),
            None => String::new(),
        };
        println!(
            "{}  ({}){}{}",
            m.path.display(),
            m.match_kind,
            distance,
            tags
        );
    }
    println!("\n{} note(s)", matches.len());

    Ok(())
}
