use serde::{Deserialize, Serialize};

use crate::config;

/// The five user-curated label taxonomies. Each category persists as its
/// own flat JSON array under the playbook directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Setups,
    Entries,
    StopLossReasons,
    TakeProfitReasons,
    PartialCloseReasons,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Setups,
        Category::Entries,
        Category::StopLossReasons,
        Category::TakeProfitReasons,
        Category::PartialCloseReasons,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Category::Setups => "setups.json",
            Category::Entries => "entries.json",
            Category::StopLossReasons => "sl_reasons.json",
            Category::TakeProfitReasons => "tp_reasons.json",
            Category::PartialCloseReasons => "close_reasons.json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Setups => "Setup Options",
            Category::Entries => "Entry Options",
            Category::StopLossReasons => "Stop Loss Reasons",
            Category::TakeProfitReasons => "Take Profit Reasons",
            Category::PartialCloseReasons => "Partial Close Reasons",
        }
    }

    /// Seed list written on first use or after a corrupted-file reset.
    pub fn default_options(self) -> Vec<String> {
        let defaults: &[&str] = match self {
            Category::Setups => config::DEFAULT_SETUPS,
            Category::Entries => config::DEFAULT_ENTRIES,
            Category::StopLossReasons => config::DEFAULT_SL_REASONS,
            Category::TakeProfitReasons => config::DEFAULT_TP_REASONS,
            Category::PartialCloseReasons => config::DEFAULT_PARTIAL_CLOSE_REASONS,
        };
        defaults.iter().map(|s| s.to_string()).collect()
    }
}
