//! 回應 schema 與錯誤代碼

use prodplan_calc::{AvailabilityReport, Suggestion};
use prodplan_core::{Batch, Chemical, Formula, PlanError, Product, ProductionOrder};
use serde::{Deserialize, Serialize};

/// 邊界回應（以 `kind` 欄位標記內容）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    /// 無資料確認
    Ack,

    /// 單一配方
    Formula { formula: Formula },

    /// 配方清單
    Formulas { formulas: Vec<Formula> },

    /// 單一生產訂單
    Order { order: ProductionOrder },

    /// 生產訂單清單
    Orders { orders: Vec<ProductionOrder> },

    /// 生產建議清單
    Suggestions { suggestions: Vec<Suggestion> },

    /// 批次清單
    Batches { batches: Vec<Batch> },

    /// 單一原料
    Chemical { chemical: Chemical },

    /// 原料清單
    Chemicals { chemicals: Vec<Chemical> },

    /// 單一成品
    Product { product: Product },

    /// 可用性報告
    Availability { report: AvailabilityReport },
}

/// 穩定的錯誤代碼（跨邊界時取代內部錯誤型別）
pub fn error_code(error: &PlanError) -> &'static str {
    match error {
        PlanError::InvalidQuantity(_) => "invalid_quantity",
        PlanError::InvalidYield(_) => "invalid_yield",
        PlanError::EmptyFormula => "empty_formula",
        PlanError::DuplicateIngredient(_) => "duplicate_ingredient",
        PlanError::FormulaNotFound(_) => "formula_not_found",
        PlanError::OrderNotFound(_) => "order_not_found",
        PlanError::ChemicalNotFound(_) => "chemical_not_found",
        PlanError::ProductNotFound(_) => "product_not_found",
        PlanError::AlreadyCompleted(_) => "already_completed",
        PlanError::FormulaInUse(_) => "formula_in_use",
        PlanError::InsufficientStock { .. } => "insufficient_stock",
        PlanError::ConcurrentModification(_) => "concurrent_modification",
    }
}
