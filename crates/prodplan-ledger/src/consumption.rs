//! 批次消耗計算（先進先出）

use prodplan_core::{Batch, PlanError, Result};
use rust_decimal::Decimal;
use uuid::Uuid;

/// 單一批次的扣帳計劃
#[derive(Debug, Clone, PartialEq)]
pub struct BatchDraw {
    /// 批次ID
    pub batch_id: Uuid,

    /// 計劃時批次的現有數量（提交時的比對依據）
    pub expected_quantity: Decimal,

    /// 從本批次扣除的數量
    pub quantity: Decimal,
}

/// FIFO 消耗計算器
pub struct FifoConsumption;

impl FifoConsumption {
    /// 規劃扣帳：依收貨日期由舊到新吃批次，直到滿足需求
    ///
    /// 批次清單須已依收貨日期排序。不足時回傳 `InsufficientStock`，
    /// 不產生任何扣帳。純計算，不修改批次。
    pub fn plan(chemical_id: &str, batches: &[Batch], required: Decimal) -> Result<Vec<BatchDraw>> {
        let mut draws = Vec::new();
        let mut remaining = required;

        for batch in batches {
            if remaining <= Decimal::ZERO {
                break;
            }
            if batch.quantity <= Decimal::ZERO {
                continue;
            }

            let take = remaining.min(batch.quantity);
            draws.push(BatchDraw {
                batch_id: batch.id,
                expected_quantity: batch.quantity,
                quantity: take,
            });
            remaining -= take;
        }

        if remaining > Decimal::ZERO {
            return Err(PlanError::InsufficientStock {
                chemical_id: chemical_id.to_string(),
                required,
                available: required - remaining,
            });
        }

        Ok(draws)
    }

    /// 提交扣帳：逐筆比對批次現量後一次套用
    ///
    /// 任一批次在規劃後被動過（數量不符或已不存在）即回傳
    /// `ConcurrentModification`，且不套用任何扣帳。耗盡的批次自清單移除。
    pub fn apply(batches: &mut Vec<Batch>, draws: &[BatchDraw]) -> Result<()> {
        // 先全數驗證，確保全有或全無
        for draw in draws {
            match batches.iter().find(|b| b.id == draw.batch_id) {
                None => {
                    return Err(PlanError::ConcurrentModification(format!(
                        "批次 {} 已不存在",
                        draw.batch_id
                    )))
                }
                Some(batch) if batch.quantity != draw.expected_quantity => {
                    return Err(PlanError::ConcurrentModification(format!(
                        "批次 {} 數量已由 {} 變為 {}",
                        draw.batch_id, draw.expected_quantity, batch.quantity
                    )))
                }
                Some(_) => {}
            }
        }

        for draw in draws {
            if let Some(batch) = batches.iter_mut().find(|b| b.id == draw.batch_id) {
                batch.consume(draw.quantity)?;
            }
        }

        batches.retain(|b| !b.is_exhausted());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn batch(quantity: i64, day: u32) -> Batch {
        Batch::new(
            "CHEM-A".to_string(),
            Decimal::from(quantity),
            NaiveDate::from_ymd_opt(2025, 11, day).unwrap(),
        )
    }

    #[test]
    fn test_plan_consumes_oldest_first() {
        // 舊批 3 全吃，新批 3 吃 2
        let batches = vec![batch(3, 1), batch(3, 10)];

        let draws = FifoConsumption::plan("CHEM-A", &batches, Decimal::from(5)).unwrap();

        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].batch_id, batches[0].id);
        assert_eq!(draws[0].quantity, Decimal::from(3));
        assert_eq!(draws[1].batch_id, batches[1].id);
        assert_eq!(draws[1].quantity, Decimal::from(2));
    }

    #[test]
    fn test_plan_insufficient_reports_total_available() {
        let batches = vec![batch(1, 1), batch(3, 5)];

        let result = FifoConsumption::plan("CHEM-A", &batches, Decimal::from(5));

        match result {
            Err(PlanError::InsufficientStock {
                chemical_id,
                required,
                available,
            }) => {
                assert_eq!(chemical_id, "CHEM-A");
                assert_eq!(required, Decimal::from(5));
                assert_eq!(available, Decimal::from(4));
            }
            other => panic!("預期 InsufficientStock，得到 {other:?}"),
        }
    }

    #[test]
    fn test_plan_exact_fit_drains_batch() {
        let batches = vec![batch(5, 1)];

        let draws = FifoConsumption::plan("CHEM-A", &batches, Decimal::from(5)).unwrap();

        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].quantity, Decimal::from(5));
    }

    #[test]
    fn test_apply_updates_and_removes_exhausted() {
        let mut batches = vec![batch(3, 1), batch(3, 10)];
        let draws = FifoConsumption::plan("CHEM-A", &batches, Decimal::from(5)).unwrap();

        FifoConsumption::apply(&mut batches, &draws).unwrap();

        // 舊批耗盡移除，新批剩 1
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].quantity, Decimal::from(1));
        assert_eq!(
            batches[0].received_date,
            NaiveDate::from_ymd_opt(2025, 11, 10).unwrap()
        );
    }

    #[test]
    fn test_apply_rejects_stale_plan() {
        let mut batches = vec![batch(10, 1)];
        let draws = FifoConsumption::plan("CHEM-A", &batches, Decimal::from(4)).unwrap();

        // 規劃後批次被別的訂單動過
        batches[0].consume(Decimal::from(2)).unwrap();

        let result = FifoConsumption::apply(&mut batches, &draws);
        assert!(matches!(result, Err(PlanError::ConcurrentModification(_))));
        // 全無套用：數量停留在被動過的 8
        assert_eq!(batches[0].quantity, Decimal::from(8));
    }

    #[test]
    fn test_apply_rejects_missing_batch() {
        let mut batches = vec![batch(10, 1)];
        let draws = FifoConsumption::plan("CHEM-A", &batches, Decimal::from(4)).unwrap();

        batches.clear();

        let result = FifoConsumption::apply(&mut batches, &draws);
        assert!(matches!(result, Err(PlanError::ConcurrentModification(_))));
    }
}
