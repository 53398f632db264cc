use serde::{Deserialize, Serialize};

/// One line of a rendered checklist, `  x  3 : label`.
///
/// Indices are only meaningful for the rendering they were read from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableItem {
    pub index: u32,
    pub selected: bool,
    pub label: String,
}
