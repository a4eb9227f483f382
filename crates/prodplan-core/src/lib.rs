//! # ProdPlan Core
//!
//! 核心資料模型與類型定義

pub mod batch;
pub mod chemical;
pub mod formula;
pub mod order;
pub mod product;

// Re-export 主要類型
pub use batch::Batch;
pub use chemical::Chemical;
pub use formula::{Formula, Ingredient};
pub use order::{OrderStatus, ProductionOrder};
pub use product::Product;

use rust_decimal::Decimal;
use uuid::Uuid;

/// 生產計劃錯誤類型
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    #[error("無效的計劃數量: {0}")]
    InvalidQuantity(Decimal),

    #[error("無效的標準產量: {0}")]
    InvalidYield(Decimal),

    #[error("配方沒有任何成分")]
    EmptyFormula,

    #[error("配方成分重複: {0}")]
    DuplicateIngredient(String),

    #[error("找不到配方: {0}")]
    FormulaNotFound(Uuid),

    #[error("找不到生產訂單: {0}")]
    OrderNotFound(Uuid),

    #[error("找不到原料: {0}")]
    ChemicalNotFound(String),

    #[error("找不到成品: {0}")]
    ProductNotFound(String),

    #[error("生產訂單已完工: {0}")]
    AlreadyCompleted(Uuid),

    #[error("配方仍被未完工訂單引用: {0}")]
    FormulaInUse(Uuid),

    #[error("原料庫存不足: {chemical_id} 需要 {required}，可用 {available}")]
    InsufficientStock {
        chemical_id: String,
        required: Decimal,
        available: Decimal,
    },

    #[error("併發修改衝突: {0}")]
    ConcurrentModification(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
