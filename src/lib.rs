//! # ProdPlan
//!
//! 配方驅動的生產計劃引擎：配方登錄、批次庫存帳、
//! 需求換算、自動補貨建議與生產訂單生命週期。

pub use prodplan_api::{error_code, PlanningService, Request, Response};
pub use prodplan_calc::{
    round_quantity, AvailabilityChecker, AvailabilityLine, AvailabilityReport, RequirementScaler,
    ScaledRequirement, Suggestion, SuggestionEngine,
};
pub use prodplan_core::{
    Batch, Chemical, Formula, Ingredient, OrderStatus, PlanError, Product, ProductionOrder,
};
pub use prodplan_ledger::{BatchDraw, FifoConsumption, Ledger, PurchaseReceiptItem};
