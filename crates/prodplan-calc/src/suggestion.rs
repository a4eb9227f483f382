//! 自動生產建議引擎

use prodplan_core::{Batch, Formula, Product};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::availability::{AvailabilityChecker, AvailabilityReport};
use crate::scaling::{RequirementScaler, ScaledRequirement};

/// 生產建議（只計算不落單）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// 配方ID
    pub formula_id: Uuid,

    /// 配方名稱
    pub formula_name: String,

    /// 連結的成品ID
    pub product_id: String,

    /// 成品現有庫存
    pub current_stock: Decimal,

    /// 成品補貨警戒線
    pub reorder_threshold: Decimal,

    /// 庫存缺口（排序依據，大者優先）
    pub deficit: Decimal,

    /// 建議生產數量
    pub quantity_planned: Decimal,

    /// 換算後的原料需求
    pub requirements: Vec<ScaledRequirement>,

    /// 原料可用性報告
    pub availability: AvailabilityReport,

    /// 原料是否足以完工（false 仍回傳，由操作員決定是否先採購）
    pub feasible: bool,
}

/// 自動建議引擎
pub struct SuggestionEngine;

impl SuggestionEngine {
    /// 掃描所有連結成品的配方，產生補貨生產建議
    ///
    /// 純快照計算：不建立訂單、不扣庫存。庫存已達警戒線的成品不出現在
    /// 建議中；原料不足的建議保留並標記 `feasible: false`。
    pub fn compute_plan(
        formulas: &[Formula],
        products: &[Product],
        batches: &[Batch],
    ) -> Vec<Suggestion> {
        tracing::debug!(
            "自動建議掃描：配方 {} 筆，成品 {} 筆，批次 {} 筆",
            formulas.len(),
            products.len(),
            batches.len()
        );

        let product_map: HashMap<&str, &Product> =
            products.iter().map(|p| (p.id.as_str(), p)).collect();

        let mut suggestions: Vec<Suggestion> = formulas
            .par_iter()
            .filter_map(|formula| Self::suggest_for(formula, &product_map, batches))
            .collect();

        // 缺口大者排前；缺口相同時依成品ID穩定排序
        suggestions.sort_by(|a, b| {
            b.deficit
                .cmp(&a.deficit)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });

        tracing::debug!("自動建議數量: {}", suggestions.len());

        suggestions
    }

    /// 單一配方的建議計算
    fn suggest_for(
        formula: &Formula,
        product_map: &HashMap<&str, &Product>,
        batches: &[Batch],
    ) -> Option<Suggestion> {
        let product_id = formula.product_id.as_deref()?;
        let product = product_map.get(product_id)?;

        let deficit = product.deficit();
        if deficit <= Decimal::ZERO {
            return None;
        }

        // 建議量 = 缺口，但不得低於設定的最小生產批量
        let quantity_planned = match product.min_production_qty {
            Some(min) if min > deficit => min,
            _ => deficit,
        };

        let requirements = RequirementScaler::scale(formula, quantity_planned).ok()?;
        let availability = AvailabilityChecker::check(&requirements, batches);
        let feasible = availability.sufficient;

        Some(Suggestion {
            formula_id: formula.id,
            formula_name: formula.name.clone(),
            product_id: product_id.to_string(),
            current_stock: product.stock,
            reorder_threshold: product.reorder_threshold,
            deficit,
            quantity_planned,
            requirements,
            availability,
            feasible,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use prodplan_core::Ingredient;

    fn formula_for(name: &str, product_id: &str, per_batch: i64) -> Formula {
        // 標準產量 10，每批需要 CHEM-A per_batch
        Formula::new(
            name.to_string(),
            Decimal::from(10),
            "L".to_string(),
            vec![Ingredient::new(
                "CHEM-A".to_string(),
                Decimal::from(per_batch),
            )],
        )
        .unwrap()
        .with_product_id(product_id.to_string())
    }

    fn product_with_stock(id: &str, stock: i64, threshold: i64) -> Product {
        Product::new(id.to_string(), format!("品項 {id}"))
            .with_stock(Decimal::from(stock))
            .with_reorder_threshold(Decimal::from(threshold))
    }

    fn batch(quantity: i64) -> Batch {
        Batch::new(
            "CHEM-A".to_string(),
            Decimal::from(quantity),
            NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
        )
    }

    #[test]
    fn test_no_suggestion_for_stocked_product() {
        // 庫存 50 >= 警戒線 30：不得出現建議
        let formulas = vec![formula_for("F1", "PROD-001", 2)];
        let products = vec![product_with_stock("PROD-001", 50, 30)];

        let plan = SuggestionEngine::compute_plan(&formulas, &products, &[]);

        assert!(plan.is_empty());
    }

    #[test]
    fn test_suggestion_quantity_equals_deficit() {
        let formulas = vec![formula_for("F1", "PROD-001", 2)];
        let products = vec![product_with_stock("PROD-001", 10, 35)];

        let plan =
            SuggestionEngine::compute_plan(&formulas, &products, &[batch(100)]);

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].deficit, Decimal::from(25));
        assert_eq!(plan[0].quantity_planned, Decimal::from(25));
        // 25 * 2 / 10 = 5
        assert_eq!(plan[0].requirements[0].quantity_required, Decimal::from(5));
        assert!(plan[0].feasible);
    }

    #[test]
    fn test_min_production_qty_floors_suggestion() {
        let formulas = vec![formula_for("F1", "PROD-001", 2)];
        let products = vec![product_with_stock("PROD-001", 28, 30)
            .with_min_production_qty(Decimal::from(15))];

        let plan =
            SuggestionEngine::compute_plan(&formulas, &products, &[batch(100)]);

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].deficit, Decimal::from(2));
        assert_eq!(plan[0].quantity_planned, Decimal::from(15));
    }

    #[test]
    fn test_infeasible_suggestion_still_returned() {
        // 需要 5 kg，批次只有 4 kg：建議保留但標記不可行
        let formulas = vec![formula_for("F1", "PROD-001", 2)];
        let products = vec![product_with_stock("PROD-001", 5, 30)];

        let plan = SuggestionEngine::compute_plan(&formulas, &products, &[batch(4)]);

        assert_eq!(plan.len(), 1);
        assert!(!plan[0].feasible);
        assert!(!plan[0].availability.sufficient);
    }

    #[test]
    fn test_suggestions_ordered_by_deficit() {
        let formulas = vec![
            formula_for("F1", "PROD-001", 2),
            formula_for("F2", "PROD-002", 2),
            formula_for("F3", "PROD-003", 2),
        ];
        let products = vec![
            product_with_stock("PROD-001", 25, 30), // 缺 5
            product_with_stock("PROD-002", 0, 40),  // 缺 40
            product_with_stock("PROD-003", 10, 30), // 缺 20
        ];

        let plan =
            SuggestionEngine::compute_plan(&formulas, &products, &[batch(1000)]);

        let order: Vec<&str> = plan.iter().map(|s| s.product_id.as_str()).collect();
        assert_eq!(order, vec!["PROD-002", "PROD-003", "PROD-001"]);
    }

    #[test]
    fn test_formula_without_linked_product_skipped() {
        let formula = Formula::new(
            "Unlinked".to_string(),
            Decimal::from(10),
            "L".to_string(),
            vec![Ingredient::new("CHEM-A".to_string(), Decimal::from(2))],
        )
        .unwrap();

        let plan = SuggestionEngine::compute_plan(
            &[formula],
            &[product_with_stock("PROD-001", 0, 30)],
            &[],
        );

        assert!(plan.is_empty());
    }
}
