pub mod add;
pub mod done;
pub mod export;
pub mod habits;
pub mod list;
pub mod priority;
pub mod pull;
pub mod push;
pub mod remove;
pub mod watch;

pub use crate::utils::tui::create_spinner;

use anyhow::{Result, bail};
use chrono::Local;
use owo_colors::OwoColorize;
use studydesk_core::store::AssignmentStore;

use crate::render::short_id;

/// Resolve an id the user typed against the current items. An exact id
/// always wins; otherwise a unique prefix is enough.
pub fn resolve_id<'a, T>(items: &'a [T], id_of: impl Fn(&T) -> &str, input: &str) -> Result<&'a T> {
    if let Some(item) = items.iter().find(|item| id_of(item) == input) {
        return Ok(item);
    }

    // An empty input would prefix-match every id.
    if input.is_empty() {
        bail!("No item with id ''");
    }

    let matches: Vec<&T> = items
        .iter()
        .filter(|item| id_of(item).starts_with(input))
        .collect();

    match matches.len() {
        0 => bail!("No item with id '{}'", input),
        1 => Ok(matches[0]),
        n => {
            let ids: Vec<String> = matches.iter().map(|item| short_id(id_of(item))).collect();
            bail!("Id '{}' is ambiguous ({} matches: {})", input, n, ids.join(", "))
        }
    }
}

/// First run of a display command on an empty desk: put a couple of
/// example assignments on it so the table isn't a blank screen.
pub fn seed_if_fresh(store: &mut AssignmentStore) {
    if store.is_fresh() && store.is_empty() {
        store.seed_examples(Local::now().date_naive());
        println!(
            "{}",
            "  New desk: seeded a couple of example assignments.".dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn unique_prefix_resolves() {
        let items = ids(&["4c2a91d0-aaaa", "9f01b3c2-bbbb"]);
        let found = resolve_id(&items, |id| id.as_str(), "4c2a").unwrap();
        assert_eq!(found, "4c2a91d0-aaaa");
    }

    #[test]
    fn exact_id_wins_over_a_longer_sibling() {
        let items = ids(&["abc", "abcdef"]);
        let found = resolve_id(&items, |id| id.as_str(), "abc").unwrap();
        assert_eq!(found, "abc");
    }

    #[test]
    fn ambiguous_prefix_is_rejected() {
        let items = ids(&["4c2a91d0", "4c2b77e1"]);
        let err = resolve_id(&items, |id| id.as_str(), "4c2").unwrap_err();
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn unknown_id_is_rejected() {
        let items = ids(&["4c2a91d0-aaaa"]);
        assert!(resolve_id(&items, |id| id.as_str(), "zzz").is_err());
    }

    #[test]
    fn empty_id_does_not_resolve_to_the_only_item() {
        let items = ids(&["4c2a91d0-aaaa"]);
        let err = resolve_id(&items, |id| id.as_str(), "").unwrap_err();
        assert!(err.to_string().contains("No item"));
    }
}
