//! 原料批次模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PlanError, Result};

/// 原料批次（依收貨日期先進先出消耗）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// 批次ID
    pub id: Uuid,

    /// 所屬原料ID
    pub chemical_id: String,

    /// 現有數量（不變量：>= 0）
    pub quantity: Decimal,

    /// 收貨日期（FIFO 排序依據）
    pub received_date: NaiveDate,

    /// 有效期限
    pub expiry_date: Option<NaiveDate>,

    /// 批號（追溯用）
    pub lot_code: Option<String>,
}

impl Batch {
    /// 創建新的批次
    pub fn new(chemical_id: String, quantity: Decimal, received_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            chemical_id,
            quantity,
            received_date,
            expiry_date: None,
            lot_code: None,
        }
    }

    /// 建構器模式：設置有效期限
    pub fn with_expiry_date(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    /// 建構器模式：設置批號
    pub fn with_lot_code(mut self, lot_code: String) -> Self {
        self.lot_code = Some(lot_code);
        self
    }

    /// 從本批次消耗指定數量
    pub fn consume(&mut self, quantity: Decimal) -> Result<()> {
        if quantity > self.quantity {
            return Err(PlanError::InsufficientStock {
                chemical_id: self.chemical_id.clone(),
                required: quantity,
                available: self.quantity,
            });
        }
        self.quantity -= quantity;
        Ok(())
    }

    /// 檢查批次是否已耗盡
    pub fn is_exhausted(&self) -> bool {
        self.quantity <= Decimal::ZERO
    }
}
