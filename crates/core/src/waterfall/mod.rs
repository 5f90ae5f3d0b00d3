//! Forecast-to-budget waterfall bridge.
//!
//! Lays signed per-category deltas out as floating bars between the two
//! total bars. Bars carry a [`BarKind`] tag, not a colour.

pub mod builder;
pub mod types;


pub use builder::WaterfallBuilder;
pub use types::{BarKind, BridgeStep, WaterfallBar};
