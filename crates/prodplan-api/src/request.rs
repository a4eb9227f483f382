//! 請求 schema

use prodplan_core::Ingredient;
use prodplan_ledger::PurchaseReceiptItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 邊界請求（以 `op` 欄位標記操作）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// 配方清單
    ListFormulas,

    /// 建立配方
    CreateFormula {
        name: String,
        #[serde(default)]
        product_id: Option<String>,
        standard_yield: Decimal,
        yield_unit: String,
        ingredients: Vec<Ingredient>,
    },

    /// 刪除配方
    DeleteFormula { formula_id: Uuid },

    /// 生產訂單清單
    ListProductionOrders,

    /// 建立生產訂單
    CreateProductionOrder {
        formula_id: Uuid,
        quantity_planned: Decimal,
    },

    /// 完工生產訂單（實際產出未提供時以計劃數量入庫）
    CompleteProductionOrder {
        order_id: Uuid,
        #[serde(default)]
        quantity_produced: Option<Decimal>,
    },

    /// 自動生產建議
    GetAutoProductionPlan,

    /// 採購單收貨
    ReceivePurchaseOrder {
        po_id: String,
        items: Vec<PurchaseReceiptItem>,
    },

    /// 登錄原料主檔
    RegisterChemical {
        id: String,
        name: String,
        unit: String,
        #[serde(default)]
        reorder_threshold: Decimal,
    },

    /// 登錄成品主檔
    RegisterProduct {
        id: String,
        name: String,
        #[serde(default)]
        stock: Decimal,
        #[serde(default)]
        reorder_threshold: Decimal,
        #[serde(default)]
        formula_id: Option<Uuid>,
        #[serde(default)]
        min_production_qty: Option<Decimal>,
    },

    /// 原料主檔清單
    ListChemicals,

    /// 批次清單（可依原料過濾）
    ListBatches {
        #[serde(default)]
        chemical_id: Option<String>,
    },

    /// 下單前可行性試算
    CheckFeasibility {
        formula_id: Uuid,
        quantity_planned: Decimal,
    },
}

impl Request {
    /// 操作名稱（日誌用）
    pub fn op_name(&self) -> &'static str {
        match self {
            Request::ListFormulas => "list_formulas",
            Request::CreateFormula { .. } => "create_formula",
            Request::DeleteFormula { .. } => "delete_formula",
            Request::ListProductionOrders => "list_production_orders",
            Request::CreateProductionOrder { .. } => "create_production_order",
            Request::CompleteProductionOrder { .. } => "complete_production_order",
            Request::GetAutoProductionPlan => "get_auto_production_plan",
            Request::ReceivePurchaseOrder { .. } => "receive_purchase_order",
            Request::RegisterChemical { .. } => "register_chemical",
            Request::RegisterProduct { .. } => "register_product",
            Request::ListChemicals => "list_chemicals",
            Request::ListBatches { .. } => "list_batches",
            Request::CheckFeasibility { .. } => "check_feasibility",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_request_roundtrip() {
        let raw = r#"{
            "op": "create_production_order",
            "formula_id": "6f1f9a3e-2a68-4b7e-9c3d-0a4f8f0b2d11",
            "quantity_planned": "25"
        }"#;

        let request: Request = serde_json::from_str(raw).unwrap();
        match &request {
            Request::CreateProductionOrder {
                quantity_planned, ..
            } => assert_eq!(*quantity_planned, Decimal::from(25)),
            other => panic!("預期 CreateProductionOrder，得到 {other:?}"),
        }
        assert_eq!(request.op_name(), "create_production_order");
    }

    #[test]
    fn test_optional_fields_default() {
        // 未提供 quantity_produced 時應解析為 None
        let raw = r#"{
            "op": "complete_production_order",
            "order_id": "6f1f9a3e-2a68-4b7e-9c3d-0a4f8f0b2d11"
        }"#;

        let request: Request = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            request,
            Request::CompleteProductionOrder {
                quantity_produced: None,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_op_rejected() {
        let raw = r#"{ "op": "drop_database" }"#;
        assert!(serde_json::from_str::<Request>(raw).is_err());
    }
}
