//! 清潔劑小型工廠示例：登錄 → 收貨 → 下單 → 完工

use prodplan::{
    Chemical, Formula, Ingredient, Ledger, Product, PurchaseReceiptItem,
};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 清潔劑工廠生產流程示例 ===\n");

    let ledger = Ledger::new();

    // 主檔
    ledger.register_chemical(
        Chemical::new(
            "CHEM-A".to_string(),
            "過氧化氫".to_string(),
            "kg".to_string(),
        )
        .with_reorder_threshold(Decimal::from(5)),
    );
    ledger.register_product(
        Product::new("PROD-001".to_string(), "Cleaner-X".to_string())
            .with_reorder_threshold(Decimal::from(30)),
    );

    // 配方：10 L Cleaner-X 用 2 kg CHEM-A
    let formula = ledger.add_formula(
        Formula::new(
            "Cleaner-X".to_string(),
            Decimal::from(10),
            "L".to_string(),
            vec![Ingredient::new("CHEM-A".to_string(), Decimal::from(2))],
        )?
        .with_product_id("PROD-001".to_string()),
    );
    println!("配方: {} (標準產量 {} {})", formula.name, formula.standard_yield, formula.yield_unit);

    // 採購收貨：兩個批次
    let batches = ledger.receive_purchase_order(
        "PO-001",
        &[
            PurchaseReceiptItem::new("CHEM-A".to_string(), Decimal::from(3)),
            PurchaseReceiptItem::new("CHEM-A".to_string(), Decimal::from(3))
                .with_lot_code("LOT-B7".to_string()),
        ],
    )?;
    println!("收貨批次: {} 筆，CHEM-A 可用 {} kg", batches.len(), ledger.available("CHEM-A"));

    // 下單前試算
    let report = ledger.check_feasibility(formula.id, Decimal::from(25))?;
    for line in &report.lines {
        println!(
            "  需求 {}: 需要 {}，可用 {}，缺口 {}",
            line.chemical_id, line.required, line.available, line.shortfall
        );
    }

    // 建單與完工
    let order = ledger.create_order(formula.id, Decimal::from(25))?;
    println!("\n建立生產訂單 {}，計劃 {} L", order.id, order.quantity_planned);

    let completed = ledger.complete_order(order.id, None)?;
    println!(
        "完工: 實際產出 {} L，成品庫存 {}，CHEM-A 剩餘 {} kg",
        completed
            .quantity_produced
            .unwrap_or(Decimal::ZERO),
        ledger
            .product("PROD-001")
            .map(|p| p.stock)
            .unwrap_or(Decimal::ZERO),
        ledger.available("CHEM-A")
    );

    Ok(())
}
