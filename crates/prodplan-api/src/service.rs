//! 請求分派服務

use prodplan_core::{Chemical, Formula, PlanError, Product};
use prodplan_ledger::Ledger;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::request::Request;
use crate::response::{error_code, Response};

/// 序列化後的回覆信封
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JsonReply {
    Ok { data: Response },
    Error { code: String, message: String },
}

/// 生產計劃服務：一進一出的請求/回應分派器
///
/// 無串流、無掛起操作；所有請求同步完成。
#[derive(Debug, Default)]
pub struct PlanningService {
    ledger: Ledger,
}

impl PlanningService {
    /// 創建空帳本的服務
    pub fn new() -> Self {
        Self::default()
    }

    /// 以既有帳本創建服務
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self { ledger }
    }

    /// 獲取帳本引用
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// 分派單一請求
    pub fn handle(&self, request: Request) -> prodplan_core::Result<Response> {
        tracing::debug!("處理請求: {}", request.op_name());

        match request {
            Request::ListFormulas => Ok(Response::Formulas {
                formulas: self.ledger.list_formulas(),
            }),

            Request::CreateFormula {
                name,
                product_id,
                standard_yield,
                yield_unit,
                ingredients,
            } => {
                let mut formula = Formula::new(name, standard_yield, yield_unit, ingredients)?;
                if let Some(product_id) = product_id {
                    formula = formula.with_product_id(product_id);
                }
                Ok(Response::Formula {
                    formula: self.ledger.add_formula(formula),
                })
            }

            Request::DeleteFormula { formula_id } => {
                self.ledger.remove_formula(formula_id)?;
                Ok(Response::Ack)
            }

            Request::ListProductionOrders => Ok(Response::Orders {
                orders: self.ledger.list_orders(),
            }),

            Request::CreateProductionOrder {
                formula_id,
                quantity_planned,
            } => Ok(Response::Order {
                order: self.ledger.create_order(formula_id, quantity_planned)?,
            }),

            Request::CompleteProductionOrder {
                order_id,
                quantity_produced,
            } => Ok(Response::Order {
                order: self.ledger.complete_order(order_id, quantity_produced)?,
            }),

            Request::GetAutoProductionPlan => Ok(Response::Suggestions {
                suggestions: self.ledger.auto_plan(),
            }),

            Request::ReceivePurchaseOrder { po_id, items } => Ok(Response::Batches {
                batches: self.ledger.receive_purchase_order(&po_id, &items)?,
            }),

            Request::RegisterChemical {
                id,
                name,
                unit,
                reorder_threshold,
            } => {
                if reorder_threshold < Decimal::ZERO {
                    return Err(PlanError::InvalidQuantity(reorder_threshold));
                }
                let chemical =
                    Chemical::new(id, name, unit).with_reorder_threshold(reorder_threshold);
                Ok(Response::Chemical {
                    chemical: self.ledger.register_chemical(chemical),
                })
            }

            Request::RegisterProduct {
                id,
                name,
                stock,
                reorder_threshold,
                formula_id,
                min_production_qty,
            } => {
                if stock < Decimal::ZERO {
                    return Err(PlanError::InvalidQuantity(stock));
                }
                if reorder_threshold < Decimal::ZERO {
                    return Err(PlanError::InvalidQuantity(reorder_threshold));
                }
                let mut product = Product::new(id, name)
                    .with_stock(stock)
                    .with_reorder_threshold(reorder_threshold);
                if let Some(formula_id) = formula_id {
                    product = product.with_formula_id(formula_id);
                }
                if let Some(min) = min_production_qty {
                    product = product.with_min_production_qty(min);
                }
                Ok(Response::Product {
                    product: self.ledger.register_product(product),
                })
            }

            Request::ListChemicals => Ok(Response::Chemicals {
                chemicals: self.ledger.list_chemicals(),
            }),

            Request::ListBatches { chemical_id } => Ok(Response::Batches {
                batches: self.ledger.list_batches(chemical_id.as_deref()),
            }),

            Request::CheckFeasibility {
                formula_id,
                quantity_planned,
            } => Ok(Response::Availability {
                report: self.ledger.check_feasibility(formula_id, quantity_planned)?,
            }),
        }
    }

    /// JSON 邊界入口：解析、分派、序列化，一律回傳信封
    ///
    /// 解析失敗以 `bad_request` 回報，不觸及帳本。
    pub fn handle_json(&self, raw: &str) -> String {
        let reply = match serde_json::from_str::<Request>(raw) {
            Ok(request) => match self.handle(request) {
                Ok(data) => JsonReply::Ok { data },
                Err(error) => Self::error_reply(&error),
            },
            Err(error) => JsonReply::Error {
                code: "bad_request".to_string(),
                message: error.to_string(),
            },
        };

        serde_json::to_string(&reply).unwrap_or_else(|error| {
            format!(
                r#"{{"status":"error","code":"serialization","message":"{}"}}"#,
                error
            )
        })
    }

    fn error_reply(error: &PlanError) -> JsonReply {
        tracing::warn!("請求失敗: {}", error);
        JsonReply::Error {
            code: error_code(error).to_string(),
            message: error.to_string(),
        }
    }
}
