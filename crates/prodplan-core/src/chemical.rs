//! 原料模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 化學原料主檔
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chemical {
    /// 原料ID（如 CHEM-001）
    pub id: String,

    /// 原料名稱
    pub name: String,

    /// 計量單位（kg、L 等）
    pub unit: String,

    /// 補貨警戒線（採購提醒用）
    pub reorder_threshold: Decimal,
}

impl Chemical {
    /// 創建新的原料主檔
    pub fn new(id: String, name: String, unit: String) -> Self {
        Self {
            id,
            name,
            unit,
            reorder_threshold: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置補貨警戒線
    pub fn with_reorder_threshold(mut self, threshold: Decimal) -> Self {
        self.reorder_threshold = threshold;
        self
    }

    /// 檢查可用量是否低於警戒線
    pub fn is_below_threshold(&self, available: Decimal) -> bool {
        available < self.reorder_threshold
    }

    /// 獲取需要補充的數量
    pub fn replenishment_needed(&self, available: Decimal) -> Decimal {
        if self.is_below_threshold(available) {
            self.reorder_threshold - available
        } else {
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_chemical() {
        let chemical = Chemical::new(
            "CHEM-001".to_string(),
            "過氧化氫".to_string(),
            "kg".to_string(),
        );

        assert_eq!(chemical.id, "CHEM-001");
        assert_eq!(chemical.unit, "kg");
        assert_eq!(chemical.reorder_threshold, Decimal::ZERO);
    }

    #[test]
    fn test_replenishment_needed() {
        let chemical = Chemical::new(
            "CHEM-002".to_string(),
            "檸檬酸".to_string(),
            "kg".to_string(),
        )
        .with_reorder_threshold(Decimal::from(20));

        // 可用 5，警戒線 20，需補 15
        assert!(chemical.is_below_threshold(Decimal::from(5)));
        assert_eq!(
            chemical.replenishment_needed(Decimal::from(5)),
            Decimal::from(15)
        );

        // 可用 30，高於警戒線，不需補貨
        assert!(!chemical.is_below_threshold(Decimal::from(30)));
        assert_eq!(
            chemical.replenishment_needed(Decimal::from(30)),
            Decimal::ZERO
        );
    }
}
