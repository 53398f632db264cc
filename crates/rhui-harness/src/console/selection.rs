//! Toggle checklists, single-choice lists and verified confirmations.
//!
//! A checklist renders as
//!
//! ```text
//!   -  1 : custom-1
//!   x  2 : custom-2
//! rhui: Enter value (1-2) to toggle selection, 'c' to confirm selections, or '?' for more commands:
//! ```
//!
//! Every read is anchored on the trailing prompt, so a rendering is consumed
//! whole and an older one can never be mistaken for the current list.

use super::prompts;
use crate::error::{ErrorCode, HarnessError, HarnessResult};
use crate::model::SelectableItem;
use crate::session::text::{self, compile_safe_regex, normalize_line};
use crate::session::Session;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::debug;

fn checklist_line_regex() -> Option<&'static Regex> {
    static LINE: OnceLock<Option<Regex>> = OnceLock::new();
    LINE.get_or_init(|| compile_safe_regex(prompts::CHECKLIST_LINE_RE).ok())
        .as_ref()
}

fn choice_line_regex() -> Option<&'static Regex> {
    static LINE: OnceLock<Option<Regex>> = OnceLock::new();
    LINE.get_or_init(|| compile_safe_regex(prompts::CHOICE_LINE_RE).ok())
        .as_ref()
}

fn parse_checklist_line(line: &str) -> Option<SelectableItem> {
    let captures = checklist_line_regex()?.captures(line)?;
    Some(SelectableItem {
        index: captures.get(2)?.as_str().parse().ok()?,
        selected: captures.get(1)?.as_str() == "x",
        label: captures.get(3)?.as_str().to_string(),
    })
}

/// Parse every checklist line in a rendered block.
#[must_use]
pub fn parse_checklist(block: &str) -> Vec<SelectableItem> {
    text::lines(block).filter_map(parse_checklist_line).collect()
}

/// Parse `  <n> - <label>` lines of a single-choice list.
#[must_use]
pub fn parse_choices(block: &str) -> Vec<(u32, String)> {
    let Some(re) = choice_line_regex() else {
        return Vec::new();
    };
    text::lines(block)
        .filter_map(|line| {
            let captures = re.captures(line)?;
            let index = captures.get(1)?.as_str().parse().ok()?;
            Some((index, captures.get(2)?.as_str().to_string()))
        })
        .collect()
}

/// Whether `needle` occurs in `haystack` delimited by whitespace or the ends.
///
/// `repo-A` matches `repo-A (Yum)` and `Hostname: repo-A` but not `repo-AB`.
#[must_use]
pub fn contains_token(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack.get(..start).and_then(|s| s.chars().next_back());
        let after = haystack.get(start + needle.len()..).and_then(|s| s.chars().next());
        before.map_or(true, char::is_whitespace) && after.map_or(true, char::is_whitespace)
    })
}

fn selection_failed(message: String, value: &str, rendered: &str) -> HarnessError {
    HarnessError::new(
        ErrorCode::ExpectationFailed,
        message,
        serde_json::json!({ "value": value, "unmatched": rendered }),
    )
}

/// Consume the next checklist rendering and return its raw text.
fn read_checklist_block(session: &mut Session) -> HarnessResult<String> {
    let timeout = session.options().default_timeout;
    Ok(session.expect(prompts::CHECKLIST_END_RE, timeout)?.before)
}

/// Toggle each of `values` on, checking after every toggle that the item
/// flipped to selected, then confirm with `c`.
///
/// The list is re-rendered with `l` between values because the console may
/// reorder it once an item is toggled.
pub fn select<S: AsRef<str>>(session: &mut Session, values: &[S]) -> HarnessResult<()> {
    for (position, value) in values.iter().enumerate() {
        let value = value.as_ref();
        if position > 0 {
            session.enter(prompts::RELIST_KEY)?;
        }
        let block = read_checklist_block(session)?;
        let Some(item) = parse_checklist(&block)
            .into_iter()
            .find(|item| !item.selected && contains_token(&item.label, value))
        else {
            return Err(selection_failed(
                format!("'{value}' is not an unselected entry of the list"),
                value,
                &block,
            ));
        };

        debug!(session = %session.id(), value, index = item.index, "toggling");
        session.enter(&item.index.to_string())?;
        let after = read_checklist_block(session)?;
        let flipped = parse_checklist(&after).iter().any(|shown| {
            shown.index == item.index && shown.selected && contains_token(&shown.label, value)
        });
        if !flipped {
            return Err(selection_failed(
                format!("'{value}' did not become selected"),
                value,
                &after,
            ));
        }
    }
    session.enter(prompts::CONFIRM_KEY)
}

/// Toggle `items` from a single reading of the list, then confirm.
///
/// An item may sit on a continuation line of a multi-line entry; its index
/// is taken from the closest numbered line above it. Items already selected
/// are left alone.
pub fn select_items<S: AsRef<str>>(session: &mut Session, items: &[S]) -> HarnessResult<()> {
    let block = read_checklist_block(session)?;
    let lines: Vec<&str> = text::lines(&block).collect();
    let mut to_toggle = Vec::new();

    for item in items {
        let item = item.as_ref();
        let entry = lines
            .iter()
            .position(|line| contains_token(line, item))
            .and_then(|found| {
                lines
                    .get(..=found)?
                    .iter()
                    .rev()
                    .find_map(|line| parse_checklist_line(line))
            });
        match entry {
            Some(entry) if entry.selected => {}
            Some(entry) => {
                if !to_toggle.contains(&entry.index) {
                    to_toggle.push(entry.index);
                }
            }
            None => {
                return Err(selection_failed(
                    format!("'{item}' is not in the list"),
                    item,
                    &block,
                ));
            }
        }
    }

    for index in to_toggle {
        debug!(session = %session.id(), index, "toggling");
        session.enter(&index.to_string())?;
        read_checklist_block(session)?;
    }
    session.enter(prompts::CONFIRM_KEY)
}

/// Pick `item` from a single-choice list.
///
/// An entry whose label equals `item` wins; otherwise exactly one label must
/// contain it as a token.
pub fn select_one(session: &mut Session, item: &str) -> HarnessResult<()> {
    let timeout = session.options().default_timeout;
    let block = session.expect(prompts::CHOICE_END_RE, timeout)?.before;
    let choices = parse_choices(&block);
    let exact: Vec<u32> = choices
        .iter()
        .filter(|(_, label)| label == item)
        .map(|(index, _)| *index)
        .collect();
    let candidates: Vec<u32> = if exact.is_empty() {
        choices
            .iter()
            .filter(|(_, label)| contains_token(label, item))
            .map(|(index, _)| *index)
            .collect()
    } else {
        exact
    };
    match candidates.as_slice() {
        [index] => {
            debug!(session = %session.id(), item, index, "choosing");
            session.enter(&index.to_string())
        }
        [] => Err(selection_failed(
            format!("'{item}' is not in the list"),
            item,
            &block,
        )),
        _ => Err(selection_failed(
            format!("'{item}' matches more than one entry"),
            item,
            &block,
        )),
    }
}

/// Select every entry with `a`, then confirm with `c`.
pub fn select_all(session: &mut Session) -> HarnessResult<()> {
    read_checklist_block(session)?;
    session.enter(prompts::SELECT_ALL_KEY)?;
    read_checklist_block(session)?;
    session.enter(prompts::CONFIRM_KEY)
}

/// Pattern matching the summary block under `caption` through its
/// `Proceed? (y/n)` prompt; group 1 is the block body.
#[must_use]
pub fn summary_pattern(caption: &str) -> String {
    format!("{}(.*?){}", regex::escape(caption), prompts::PROCEED_RE)
}

/// Normalised, non-blank lines of a summary block body.
#[must_use]
pub fn summary_lines(body: &str) -> Vec<String> {
    text::lines(body)
        .map(normalize_line)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Read the summary block under `caption`, up to the `Proceed? (y/n)` prompt.
///
/// Lines come back normalised (tabs to spaces, whitespace collapsed) with
/// blank lines dropped. Nothing is answered.
pub fn read_summary(session: &mut Session, caption: &str) -> HarnessResult<Vec<String>> {
    let timeout = session.options().default_timeout;
    let found = session.expect(&summary_pattern(caption), timeout)?;
    Ok(summary_lines(found.group(1).unwrap_or_default()))
}

/// Answer a yes/no question.
pub fn answer(session: &mut Session, yes: bool) -> HarnessResult<()> {
    session.enter(if yes { prompts::YES } else { prompts::NO })
}

/// Compare summary lines with the expected items.
///
/// Lines equal to an entry of `skip` are ignored. Both sides are compared
/// as sets: order and repetition do not matter.
pub fn check_summary<S: AsRef<str>, K: AsRef<str>>(
    caption: &str,
    shown: Vec<String>,
    expected: &[S],
    skip: &[K],
) -> HarnessResult<()> {
    let skip: BTreeSet<String> = skip.iter().map(|line| normalize_line(line.as_ref())).collect();
    let shown: BTreeSet<String> = shown
        .into_iter()
        .filter(|line| !skip.contains(line))
        .collect();
    let wanted: BTreeSet<String> = expected
        .iter()
        .map(|value| normalize_line(value.as_ref()))
        .collect();
    if shown == wanted {
        return Ok(());
    }

    let missing: Vec<&String> = wanted.difference(&shown).collect();
    let unexpected: Vec<&String> = shown.difference(&wanted).collect();
    debug!(caption, ?missing, ?unexpected, "summary mismatch");
    let rendered: Vec<&str> = shown.iter().map(String::as_str).collect();
    Err(HarnessError::new(
        ErrorCode::ExpectationFailed,
        format!("summary under '{caption}' does not match the requested items"),
        serde_json::json!({
            "caption": caption,
            "expected": wanted,
            "shown": shown,
            "missing": missing,
            "unexpected": unexpected,
            "unmatched": rendered.join("\n"),
        }),
    ))
}

/// Verify the summary under `caption` lists exactly `expected`, then say yes.
///
/// On a mismatch nothing is sent and the console is left at the prompt.
pub fn proceed_with_check<S: AsRef<str>, K: AsRef<str>>(
    session: &mut Session,
    caption: &str,
    expected: &[S],
    skip: &[K],
) -> HarnessResult<()> {
    let shown = read_summary(session, caption)?;
    check_summary(caption, shown, expected, skip)?;
    answer(session, true)
}

/// Say yes to the next `Proceed? (y/n)` without looking at the summary.
pub fn proceed_without_check(session: &mut Session) -> HarnessResult<()> {
    let timeout = session.options().default_timeout;
    session.expect(prompts::PROCEED_RE, timeout)?;
    answer(session, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_lines_parse_with_markers() {
        let block = "Select:\r\n  -  1 : repo-A\r\n  x  2 : repo-B\r\n\r\n";
        let items = parse_checklist(block);
        assert_eq!(items.len(), 2);
        assert_eq!(items.first().map(|i| (i.index, i.selected)), Some((1, false)));
        assert_eq!(items.get(1).map(|i| i.label.as_str()), Some("repo-B"));
    }

    #[test]
    fn choices_parse_index_and_label() {
        let choices = parse_choices("  1 - custom-1\r\n  2 - custom-2\r\n");
        assert_eq!(choices, [(1, "custom-1".to_string()), (2, "custom-2".to_string())]);
    }

    #[test]
    fn summaries_compare_ignoring_order_and_skipped_lines() {
        let shown = summary_lines("\r\n  Custom Entitlements\r\n    custom-2\r\n  custom-1\r\n\r\n");
        let skip = ["Custom Entitlements"];
        assert!(check_summary("c", shown.clone(), &["custom-2", "custom-1"], &skip).is_ok());
        let err = check_summary("c", shown, &["custom-1"], &skip);
        assert!(err.is_err_and(|err| err.is(ErrorCode::ExpectationFailed)));
    }

    #[test]
    fn summaries_ignore_repeated_lines_and_labels() {
        let none: &[&str] = &[];
        let repeated = vec!["custom-1".to_string(), "custom-1".to_string()];
        assert!(check_summary("c", repeated, &["custom-1"], none).is_ok());
        let single = vec!["cds01".to_string()];
        assert!(check_summary("c", single, &["cds01", "cds01"], none).is_ok());
        let err = check_summary("c", vec!["cds01".to_string()], &["cds01", "cds02"], none);
        assert!(err.is_err_and(|err| err.is(ErrorCode::ExpectationFailed)));
    }

    #[test]
    fn tokens_respect_boundaries() {
        assert!(contains_token("repo-A (Yum)", "repo-A"));
        assert!(contains_token("Hostname: cds01.example.com", "cds01.example.com"));
        assert!(!contains_token("repo-AB", "repo-A"));
        assert!(!contains_token("xrepo-A", "repo-A"));
        assert!(!contains_token("anything", ""));
    }
}
