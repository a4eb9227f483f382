//! 庫存帳與生產訂單生命週期

use chrono::{NaiveDate, Utc};
use prodplan_calc::{
    AvailabilityChecker, AvailabilityReport, RequirementScaler, Suggestion, SuggestionEngine,
};
use prodplan_core::{
    Batch, Chemical, Formula, PlanError, Product, ProductionOrder, Result,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::consumption::{BatchDraw, FifoConsumption};

/// 採購收貨明細（一筆明細產生一個批次）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReceiptItem {
    /// 原料ID
    pub chemical_id: String,

    /// 收貨數量
    pub quantity: Decimal,

    /// 收貨日期（預設為當天）
    #[serde(default)]
    pub received_date: Option<NaiveDate>,

    /// 有效期限
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,

    /// 批號（未提供時以採購單號追溯）
    #[serde(default)]
    pub lot_code: Option<String>,
}

impl PurchaseReceiptItem {
    /// 創建新的收貨明細
    pub fn new(chemical_id: String, quantity: Decimal) -> Self {
        Self {
            chemical_id,
            quantity,
            received_date: None,
            expiry_date: None,
            lot_code: None,
        }
    }

    /// 建構器模式：設置收貨日期
    pub fn with_received_date(mut self, date: NaiveDate) -> Self {
        self.received_date = Some(date);
        self
    }

    /// 建構器模式：設置有效期限
    pub fn with_expiry_date(mut self, date: NaiveDate) -> Self {
        self.expiry_date = Some(date);
        self
    }

    /// 建構器模式：設置批號
    pub fn with_lot_code(mut self, lot_code: String) -> Self {
        self.lot_code = Some(lot_code);
        self
    }
}

/// 帳本內部狀態（單一寫入者，鎖內維護不變量）
#[derive(Debug, Default)]
struct LedgerState {
    chemicals: HashMap<String, Chemical>,
    /// 每原料一條批次清單，恆依收貨日期排序（同日依收貨順序）
    batches: HashMap<String, Vec<Batch>>,
    products: HashMap<String, Product>,
    formulas: HashMap<Uuid, Formula>,
    orders: HashMap<Uuid, ProductionOrder>,
}

/// 庫存帳：原料批次、成品庫存、配方與生產訂單的交易入口
///
/// 讀取是快照（可能過時）；寫入序列化，完工在單一臨界區內
/// 重新驗證可用性後全有或全無地套用。
#[derive(Debug, Default)]
pub struct Ledger {
    state: RwLock<LedgerState>,
}

impl Ledger {
    /// 創建空的帳本
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== 主檔維護 =====

    /// 登錄（或覆寫）原料主檔
    pub fn register_chemical(&self, chemical: Chemical) -> Chemical {
        let mut state = self.write();
        state
            .chemicals
            .insert(chemical.id.clone(), chemical.clone());
        chemical
    }

    /// 登錄（或覆寫）成品主檔
    pub fn register_product(&self, product: Product) -> Product {
        let mut state = self.write();
        state.products.insert(product.id.clone(), product.clone());
        product
    }

    /// 原料主檔清單（依ID排序）
    pub fn list_chemicals(&self) -> Vec<Chemical> {
        let state = self.read();
        let mut chemicals: Vec<Chemical> = state.chemicals.values().cloned().collect();
        chemicals.sort_by(|a, b| a.id.cmp(&b.id));
        chemicals
    }

    /// 成品主檔清單（依ID排序）
    pub fn list_products(&self) -> Vec<Product> {
        let state = self.read();
        let mut products: Vec<Product> = state.products.values().cloned().collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        products
    }

    /// 查詢單一成品快照
    pub fn product(&self, product_id: &str) -> Option<Product> {
        self.read().products.get(product_id).cloned()
    }

    // ===== 配方 =====

    /// 登錄配方（配方於建構時已完成驗證）
    pub fn add_formula(&self, formula: Formula) -> Formula {
        let mut state = self.write();
        tracing::debug!("登錄配方: {} ({})", formula.name, formula.id);
        state.formulas.insert(formula.id, formula.clone());
        formula
    }

    /// 刪除配方
    ///
    /// 仍被未完工訂單引用的配方不可刪除，否則完工時無法重新換算。
    pub fn remove_formula(&self, formula_id: Uuid) -> Result<()> {
        let mut state = self.write();
        if !state.formulas.contains_key(&formula_id) {
            return Err(PlanError::FormulaNotFound(formula_id));
        }
        let in_use = state
            .orders
            .values()
            .any(|o| o.formula_id == formula_id && o.is_planned());
        if in_use {
            return Err(PlanError::FormulaInUse(formula_id));
        }
        state.formulas.remove(&formula_id);
        Ok(())
    }

    /// 配方清單（依名稱排序）
    pub fn list_formulas(&self) -> Vec<Formula> {
        let state = self.read();
        let mut formulas: Vec<Formula> = state.formulas.values().cloned().collect();
        formulas.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        formulas
    }

    /// 查詢單一配方快照
    pub fn formula(&self, formula_id: Uuid) -> Option<Formula> {
        self.read().formulas.get(&formula_id).cloned()
    }

    // ===== 採購收貨 =====

    /// 採購單收貨：逐明細建立批次
    ///
    /// 先整單驗證再入帳；任一明細無效時整單不落帳。
    pub fn receive_purchase_order(
        &self,
        po_id: &str,
        items: &[PurchaseReceiptItem],
    ) -> Result<Vec<Batch>> {
        let mut state = self.write();

        for item in items {
            if item.quantity <= Decimal::ZERO {
                return Err(PlanError::InvalidQuantity(item.quantity));
            }
            if !state.chemicals.contains_key(&item.chemical_id) {
                return Err(PlanError::ChemicalNotFound(item.chemical_id.clone()));
            }
        }

        let today = Utc::now().date_naive();
        let mut created = Vec::with_capacity(items.len());

        for item in items {
            let received = item.received_date.unwrap_or(today);
            let mut batch = Batch::new(item.chemical_id.clone(), item.quantity, received)
                .with_lot_code(
                    item.lot_code
                        .clone()
                        .unwrap_or_else(|| po_id.to_string()),
                );
            if let Some(expiry) = item.expiry_date {
                batch = batch.with_expiry_date(expiry);
            }

            let shelf = state.batches.entry(item.chemical_id.clone()).or_default();
            shelf.push(batch.clone());
            shelf.sort_by_key(|b| b.received_date);

            created.push(batch);
        }

        tracing::info!("採購單 {} 收貨：{} 個批次入帳", po_id, created.len());

        Ok(created)
    }

    /// 批次清單（可依原料過濾；依原料、收貨日期排序）
    pub fn list_batches(&self, chemical_id: Option<&str>) -> Vec<Batch> {
        let state = self.read();
        let mut batches: Vec<Batch> = match chemical_id {
            Some(id) => state.batches.get(id).cloned().unwrap_or_default(),
            None => state.batches.values().flatten().cloned().collect(),
        };
        batches.sort_by(|a, b| {
            a.chemical_id
                .cmp(&b.chemical_id)
                .then(a.received_date.cmp(&b.received_date))
        });
        batches
    }

    /// 指定原料的可用量（批次加總）
    pub fn available(&self, chemical_id: &str) -> Decimal {
        let state = self.read();
        state
            .batches
            .get(chemical_id)
            .map(|shelf| shelf.iter().map(|b| b.quantity).sum())
            .unwrap_or(Decimal::ZERO)
    }

    // ===== 生產訂單生命週期 =====

    /// 建立生產訂單（Planned 狀態）
    ///
    /// 只驗證配方存在與數量為正；不預留也不扣庫存，
    /// 原料不足在此不擋單，完工時才擋。
    pub fn create_order(
        &self,
        formula_id: Uuid,
        quantity_planned: Decimal,
    ) -> Result<ProductionOrder> {
        if quantity_planned <= Decimal::ZERO {
            return Err(PlanError::InvalidQuantity(quantity_planned));
        }

        let mut state = self.write();
        if !state.formulas.contains_key(&formula_id) {
            return Err(PlanError::FormulaNotFound(formula_id));
        }

        let order = ProductionOrder::new(formula_id, quantity_planned);
        tracing::info!(
            "建立生產訂單 {}：配方 {}，計劃數量 {}",
            order.id,
            formula_id,
            quantity_planned
        );
        state.orders.insert(order.id, order.clone());

        Ok(order)
    }

    /// 完工生產訂單
    ///
    /// 在單一寫鎖臨界區內：以當前配方重新換算需求、依 FIFO 規劃扣帳、
    /// 比對後一次提交，再將實際產出入庫。任一原料不足即整單失敗，
    /// 批次與成品庫存皆不變。實際產出未提供時以計劃數量入庫。
    pub fn complete_order(
        &self,
        order_id: Uuid,
        quantity_produced: Option<Decimal>,
    ) -> Result<ProductionOrder> {
        let mut state = self.write();

        let order = state
            .orders
            .get(&order_id)
            .ok_or(PlanError::OrderNotFound(order_id))?;
        if order.is_completed() {
            return Err(PlanError::AlreadyCompleted(order_id));
        }
        let formula_id = order.formula_id;
        let quantity_planned = order.quantity_planned;

        let produced = quantity_produced.unwrap_or(quantity_planned);
        if produced <= Decimal::ZERO {
            return Err(PlanError::InvalidQuantity(produced));
        }

        let formula = state
            .formulas
            .get(&formula_id)
            .ok_or(PlanError::FormulaNotFound(formula_id))?;
        let product_id = formula.product_id.clone();

        // 完工時點重新換算，不沿用建單時的快照
        let requirements = RequirementScaler::scale(formula, quantity_planned)?;

        if let Some(pid) = &product_id {
            if !state.products.contains_key(pid) {
                return Err(PlanError::ProductNotFound(pid.clone()));
            }
        }

        // 規劃階段：逐原料計算 FIFO 扣帳，任何不足都在落帳前擋下
        let mut planned_draws: Vec<(String, Vec<BatchDraw>)> =
            Vec::with_capacity(requirements.len());
        for requirement in &requirements {
            if !state.chemicals.contains_key(&requirement.chemical_id) {
                return Err(PlanError::ChemicalNotFound(requirement.chemical_id.clone()));
            }
            let shelf = state
                .batches
                .get(&requirement.chemical_id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let draws = FifoConsumption::plan(
                &requirement.chemical_id,
                shelf,
                requirement.quantity_required,
            )?;
            planned_draws.push((requirement.chemical_id.clone(), draws));
        }

        // 提交階段：同一臨界區內比對後套用
        for (chemical_id, draws) in &planned_draws {
            if draws.is_empty() {
                continue;
            }
            let shelf = state
                .batches
                .get_mut(chemical_id)
                .ok_or_else(|| PlanError::ChemicalNotFound(chemical_id.clone()))?;
            FifoConsumption::apply(shelf, draws)?;
        }

        if let Some(pid) = &product_id {
            if let Some(product) = state.products.get_mut(pid) {
                product.receive(produced);
            }
        }

        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or(PlanError::OrderNotFound(order_id))?;
        order.complete(produced)?;
        let completed = order.clone();

        tracing::info!(
            "生產訂單 {} 完工：計劃 {}，實際 {}",
            order_id,
            quantity_planned,
            produced
        );

        Ok(completed)
    }

    /// 生產訂單清單（依建立時間排序）
    pub fn list_orders(&self) -> Vec<ProductionOrder> {
        let state = self.read();
        let mut orders: Vec<ProductionOrder> = state.orders.values().cloned().collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        orders
    }

    /// 查詢單一訂單快照
    pub fn order(&self, order_id: Uuid) -> Option<ProductionOrder> {
        self.read().orders.get(&order_id).cloned()
    }

    // ===== 計劃查詢 =====

    /// 自動生產建議（非阻塞快照計算）
    pub fn auto_plan(&self) -> Vec<Suggestion> {
        let state = self.read();
        let formulas: Vec<Formula> = state.formulas.values().cloned().collect();
        let products: Vec<Product> = state.products.values().cloned().collect();
        let batches: Vec<Batch> = state.batches.values().flatten().cloned().collect();
        drop(state);

        SuggestionEngine::compute_plan(&formulas, &products, &batches)
    }

    /// 下單前的可行性試算（提示用，不擋建單）
    pub fn check_feasibility(
        &self,
        formula_id: Uuid,
        quantity_planned: Decimal,
    ) -> Result<AvailabilityReport> {
        let state = self.read();
        let formula = state
            .formulas
            .get(&formula_id)
            .ok_or(PlanError::FormulaNotFound(formula_id))?;
        let requirements = RequirementScaler::scale(formula, quantity_planned)?;
        let batches: Vec<Batch> = state.batches.values().flatten().cloned().collect();

        Ok(AvailabilityChecker::check(&requirements, &batches))
    }
}
