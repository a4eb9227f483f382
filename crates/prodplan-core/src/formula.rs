//! 配方模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::{PlanError, Result};

/// 配方成分（每一個標準產量批次所需的原料用量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// 原料ID
    pub chemical_id: String,

    /// 標準產量下的需求量
    pub quantity_required: Decimal,
}

impl Ingredient {
    /// 創建新的成分
    pub fn new(chemical_id: String, quantity_required: Decimal) -> Self {
        Self {
            chemical_id,
            quantity_required,
        }
    }
}

/// 配方（原料轉換為成品的工藝定義）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formula {
    /// 配方ID
    pub id: Uuid,

    /// 配方名稱
    pub name: String,

    /// 連結的成品ID
    pub product_id: Option<String>,

    /// 標準產量（不變量：> 0）
    pub standard_yield: Decimal,

    /// 產量單位
    pub yield_unit: String,

    /// 成分清單（不變量：非空、原料不重複）
    pub ingredients: Vec<Ingredient>,
}

impl Formula {
    /// 創建新的配方（驗證標準產量與成分清單）
    pub fn new(
        name: String,
        standard_yield: Decimal,
        yield_unit: String,
        ingredients: Vec<Ingredient>,
    ) -> Result<Self> {
        if standard_yield <= Decimal::ZERO {
            return Err(PlanError::InvalidYield(standard_yield));
        }
        if ingredients.is_empty() {
            return Err(PlanError::EmptyFormula);
        }

        let mut seen = HashSet::new();
        for ingredient in &ingredients {
            if !seen.insert(ingredient.chemical_id.clone()) {
                return Err(PlanError::DuplicateIngredient(
                    ingredient.chemical_id.clone(),
                ));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            product_id: None,
            standard_yield,
            yield_unit,
            ingredients,
        })
    }

    /// 建構器模式：連結成品
    pub fn with_product_id(mut self, product_id: String) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// 查找指定原料的成分
    pub fn ingredient(&self, chemical_id: &str) -> Option<&Ingredient> {
        self.ingredients
            .iter()
            .find(|i| i.chemical_id == chemical_id)
    }

    /// 檢查配方是否連結成品
    pub fn has_linked_product(&self) -> bool {
        self.product_id.is_some()
    }
}
