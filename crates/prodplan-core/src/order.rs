//! 生產訂單模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PlanError, Result};

/// 生產訂單狀態
///
/// 狀態機：Planned → Completed（終態，不可逆、無取消狀態）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// 已計劃（尚未扣料）
    Planned,
    /// 已完工（扣料與入庫完成）
    Completed,
}

/// 生產訂單
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionOrder {
    /// 訂單ID
    pub id: Uuid,

    /// 配方ID（建立後不可變更）
    pub formula_id: Uuid,

    /// 計劃數量
    pub quantity_planned: Decimal,

    /// 實際產出數量（完工前為 None）
    pub quantity_produced: Option<Decimal>,

    /// 訂單狀態
    pub status: OrderStatus,

    /// 建立時間
    pub created_at: DateTime<Utc>,

    /// 完工時間
    pub completed_at: Option<DateTime<Utc>>,

    /// 生產批號
    pub batch_code: Option<String>,
}

impl ProductionOrder {
    /// 創建新的生產訂單（Planned 狀態）
    pub fn new(formula_id: Uuid, quantity_planned: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            formula_id,
            quantity_planned,
            quantity_produced: None,
            status: OrderStatus::Planned,
            created_at: Utc::now(),
            completed_at: None,
            batch_code: None,
        }
    }

    /// 建構器模式：設置生產批號
    pub fn with_batch_code(mut self, batch_code: String) -> Self {
        self.batch_code = Some(batch_code);
        self
    }

    /// 檢查是否尚在計劃狀態
    pub fn is_planned(&self) -> bool {
        self.status == OrderStatus::Planned
    }

    /// 檢查是否已完工
    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }

    /// 完工：記錄實際產出並進入終態
    ///
    /// 重複完工回傳 `AlreadyCompleted`，狀態不變。
    pub fn complete(&mut self, quantity_produced: Decimal) -> Result<()> {
        if self.is_completed() {
            return Err(PlanError::AlreadyCompleted(self.id));
        }
        self.quantity_produced = Some(quantity_produced);
        self.completed_at = Some(Utc::now());
        self.status = OrderStatus::Completed;
        Ok(())
    }
}
