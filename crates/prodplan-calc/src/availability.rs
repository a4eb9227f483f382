//! 原料可用性檢查

use prodplan_core::Batch;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::scaling::ScaledRequirement;

/// 單一原料的可用性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityLine {
    /// 原料ID
    pub chemical_id: String,

    /// 需求量
    pub required: Decimal,

    /// 可用量（批次加總）
    pub available: Decimal,

    /// 缺口（required - available，下限 0）
    pub shortfall: Decimal,
}

impl AvailabilityLine {
    /// 檢查此原料是否足量
    pub fn is_sufficient(&self) -> bool {
        self.shortfall <= Decimal::ZERO
    }
}

/// 可用性檢查報告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityReport {
    /// 逐原料明細
    pub lines: Vec<AvailabilityLine>,

    /// 全部原料是否足量
    pub sufficient: bool,
}

impl AvailabilityReport {
    /// 查找指定原料的明細
    pub fn line(&self, chemical_id: &str) -> Option<&AvailabilityLine> {
        self.lines.iter().find(|l| l.chemical_id == chemical_id)
    }
}

/// 可用性檢查器
pub struct AvailabilityChecker;

impl AvailabilityChecker {
    /// 將換算後的需求逐一對比批次庫存
    ///
    /// 不修改任何批次。供手動下單前的提示與自動建議的可行性標記使用。
    pub fn check(requirements: &[ScaledRequirement], batches: &[Batch]) -> AvailabilityReport {
        let mut available_by_chemical: HashMap<&str, Decimal> = HashMap::new();
        for batch in batches {
            *available_by_chemical
                .entry(batch.chemical_id.as_str())
                .or_insert(Decimal::ZERO) += batch.quantity;
        }

        let lines: Vec<AvailabilityLine> = requirements
            .iter()
            .map(|requirement| {
                let available = available_by_chemical
                    .get(requirement.chemical_id.as_str())
                    .copied()
                    .unwrap_or(Decimal::ZERO);

                let shortfall = if requirement.quantity_required > available {
                    requirement.quantity_required - available
                } else {
                    Decimal::ZERO
                };

                AvailabilityLine {
                    chemical_id: requirement.chemical_id.clone(),
                    required: requirement.quantity_required,
                    available,
                    shortfall,
                }
            })
            .collect();

        let sufficient = lines.iter().all(AvailabilityLine::is_sufficient);

        AvailabilityReport { lines, sufficient }
    }
}
