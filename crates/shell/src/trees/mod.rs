//! Tree variants and search modes selectable from the command line.

use range_search::{SearchMode, TreeType};

/// The available tree variants.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum Tree {
    /// Hyper-rectangle bounds, split at the middle of the widest dimension.
    #[clap(name = "kd")]
    Kd,
    /// Ball bounds, split between two far-apart poles.
    #[clap(name = "ball")]
    Ball,
    /// Ball bounds around a vantage point, split at the median distance.
    #[clap(name = "vp")]
    Vp,
}

impl Tree {
    /// The library's selector for this variant.
    pub const fn tree_type(self) -> TreeType {
        match self {
            Self::Kd => TreeType::Kd,
            Self::Ball => TreeType::Ball,
            Self::Vp => TreeType::Vp,
        }
    }
}

/// The available search modes.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum Mode {
    #[clap(name = "naive")]
    Naive,
    #[clap(name = "single")]
    Single,
    #[clap(name = "dual")]
    Dual,
}

impl Mode {
    /// The library's selector for this mode.
    pub const fn search_mode(self) -> SearchMode {
        match self {
            Self::Naive => SearchMode::Naive,
            Self::Single => SearchMode::Single,
            Self::Dual => SearchMode::Dual,
        }
    }
}
