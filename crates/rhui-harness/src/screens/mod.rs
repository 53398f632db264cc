//! Drivers for the console's domain screens.
//!
//! Every driver enters its screen from home, runs one flow and returns home,
//! also when the console answered with a recognised refusal. Only an
//! expectation failure leaves the console wherever it stopped.

pub mod client;
pub mod entitlements;
pub mod instance;
pub mod repo;
pub mod subscriptions;
pub mod sync;
pub mod users;

use crate::session::text;

/// Names printed two spaces in under a heading.
///
/// Headings, rules and blank lines are skipped.
#[must_use]
pub fn indented_names(listing: &str) -> Vec<String> {
    text::lines(listing)
        .filter(|line| line.starts_with("  "))
        .map(str::trim)
        .filter(|name| !name.is_empty() && !name.starts_with("---"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_indented_lines_are_names() {
        let listing = "-= Entitled Products =-\r\n\r\nProducts\r\n  RHEL 8 (RPMs)\r\n  RHEL 9 (RPMs)\r\n\r\n";
        assert_eq!(indented_names(listing), ["RHEL 8 (RPMs)", "RHEL 9 (RPMs)"]);
    }
}
