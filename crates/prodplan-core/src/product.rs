//! 成品模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 成品（完工入庫的銷售品項）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// 成品ID（如 PROD-001）
    pub id: String,

    /// 成品名稱
    pub name: String,

    /// 現有庫存（不變量：>= 0）
    pub stock: Decimal,

    /// 回連的配方ID
    pub formula_id: Option<Uuid>,

    /// 補貨警戒線（低於此值觸發生產建議）
    pub reorder_threshold: Decimal,

    /// 最小生產批量（建議量下限）
    pub min_production_qty: Option<Decimal>,
}

impl Product {
    /// 創建新的成品
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            stock: Decimal::ZERO,
            formula_id: None,
            reorder_threshold: Decimal::ZERO,
            min_production_qty: None,
        }
    }

    /// 建構器模式：設置現有庫存
    pub fn with_stock(mut self, stock: Decimal) -> Self {
        self.stock = stock;
        self
    }

    /// 建構器模式：回連配方
    pub fn with_formula_id(mut self, formula_id: Uuid) -> Self {
        self.formula_id = Some(formula_id);
        self
    }

    /// 建構器模式：設置補貨警戒線
    pub fn with_reorder_threshold(mut self, threshold: Decimal) -> Self {
        self.reorder_threshold = threshold;
        self
    }

    /// 建構器模式：設置最小生產批量
    pub fn with_min_production_qty(mut self, qty: Decimal) -> Self {
        self.min_production_qty = Some(qty);
        self
    }

    /// 完工入庫
    pub fn receive(&mut self, quantity: Decimal) {
        self.stock += quantity;
    }

    /// 庫存缺口（低於警戒線的差額，下限 0）
    pub fn deficit(&self) -> Decimal {
        if self.stock < self.reorder_threshold {
            self.reorder_threshold - self.stock
        } else {
            Decimal::ZERO
        }
    }

    /// 檢查是否需要補產
    pub fn needs_production(&self) -> bool {
        self.deficit() > Decimal::ZERO
    }
}
