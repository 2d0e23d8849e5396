use serde::{Deserialize, Serialize};

/// Knobs for behaviour where the source material leaves a choice open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GenerateOptions {
    pub table_alignment: TableAlignment,
    pub duplicate_definitions: DuplicateDefinitions,
    /// Turn GFM bare `http(s)://` and `www.` links in plain text into links.
    pub bare_autolinks: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            table_alignment: TableAlignment::default(),
            duplicate_definitions: DuplicateDefinitions::default(),
            bare_autolinks: true,
        }
    }
}

/// Where table column alignment comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableAlignment {
    /// Read `:` markers from the delimiter row
    #[default]
    Parsed,
    /// Every column is left-aligned regardless of markup
    AlwaysLeft,
}

/// Which definition a label resolves to when it is defined more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateDefinitions {
    /// CommonMark: the first definition in document order
    #[default]
    FirstWins,
    LastWins,
}
