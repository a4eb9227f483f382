//! # ProdPlan Calculation Engine
//!
//! 配方換算與生產建議的純計算模組

pub mod availability;
pub mod rounding;
pub mod scaling;
pub mod suggestion;

// Re-export 主要類型
pub use availability::{AvailabilityChecker, AvailabilityLine, AvailabilityReport};
pub use rounding::round_quantity;
pub use scaling::{RequirementScaler, ScaledRequirement};
pub use suggestion::{Suggestion, SuggestionEngine};
