//! 配方需求換算

use prodplan_core::{Formula, PlanError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rounding::round_quantity;

/// 換算後的單一原料需求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledRequirement {
    /// 原料ID
    pub chemical_id: String,

    /// 計劃數量下的需求量
    pub quantity_required: Decimal,
}

/// 配方需求換算器
pub struct RequirementScaler;

impl RequirementScaler {
    /// 依計劃數量等比換算配方成分
    ///
    /// 每項成分：`required = quantity_required * (quantity_planned / standard_yield)`，
    /// 結果依統一捨入策略處理。純計算，無副作用。
    pub fn scale(
        formula: &Formula,
        quantity_planned: Decimal,
    ) -> prodplan_core::Result<Vec<ScaledRequirement>> {
        if quantity_planned <= Decimal::ZERO {
            return Err(PlanError::InvalidQuantity(quantity_planned));
        }
        if formula.standard_yield <= Decimal::ZERO {
            return Err(PlanError::InvalidYield(formula.standard_yield));
        }

        let requirements = formula
            .ingredients
            .iter()
            .map(|ingredient| ScaledRequirement {
                chemical_id: ingredient.chemical_id.clone(),
                quantity_required: round_quantity(
                    ingredient.quantity_required * quantity_planned / formula.standard_yield,
                ),
            })
            .collect();

        Ok(requirements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodplan_core::Ingredient;

    fn cleaner_x() -> Formula {
        // Cleaner-X：標準產量 10 L，每批用 CHEM-A 2 kg
        Formula::new(
            "Cleaner-X".to_string(),
            Decimal::from(10),
            "L".to_string(),
            vec![Ingredient::new("CHEM-A".to_string(), Decimal::from(2))],
        )
        .unwrap()
    }

    #[test]
    fn test_scale_proportionally() {
        // 計劃 25 L：2 kg * 25 / 10 = 5 kg
        let requirements =
            RequirementScaler::scale(&cleaner_x(), Decimal::from(25)).unwrap();

        assert_eq!(requirements.len(), 1);
        assert_eq!(requirements[0].chemical_id, "CHEM-A");
        assert_eq!(requirements[0].quantity_required, Decimal::from(5));
    }

    #[test]
    fn test_scale_identity() {
        // 以標準產量換算應該回到配方的基準用量
        let formula = Formula::new(
            "Degreaser".to_string(),
            Decimal::from(20),
            "L".to_string(),
            vec![
                Ingredient::new("CHEM-A".to_string(), Decimal::from(3)),
                Ingredient::new("CHEM-B".to_string(), Decimal::new(75, 1)), // 7.5
            ],
        )
        .unwrap();

        let requirements =
            RequirementScaler::scale(&formula, formula.standard_yield).unwrap();

        for (requirement, ingredient) in requirements.iter().zip(&formula.ingredients) {
            assert_eq!(requirement.quantity_required, ingredient.quantity_required);
        }
    }

    #[test]
    fn test_scale_rounds_deterministically() {
        // 1 kg * 1 / 3 = 0.333...，捨入到 0.333
        let formula = Formula::new(
            "Thirds".to_string(),
            Decimal::from(3),
            "L".to_string(),
            vec![Ingredient::new("CHEM-A".to_string(), Decimal::from(1))],
        )
        .unwrap();

        let first = RequirementScaler::scale(&formula, Decimal::ONE).unwrap();
        let second = RequirementScaler::scale(&formula, Decimal::ONE).unwrap();

        assert_eq!(first[0].quantity_required, Decimal::new(333, 3));
        assert_eq!(first, second);
    }

    #[test]
    fn test_scale_rejects_nonpositive_quantity() {
        let formula = cleaner_x();

        assert!(matches!(
            RequirementScaler::scale(&formula, Decimal::ZERO),
            Err(PlanError::InvalidQuantity(_))
        ));
        assert!(matches!(
            RequirementScaler::scale(&formula, Decimal::from(-5)),
            Err(PlanError::InvalidQuantity(_))
        ));
    }
}
