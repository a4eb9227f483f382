//! 自動補貨建議示例

use prodplan::{Chemical, Formula, Ingredient, Ledger, Product, PurchaseReceiptItem};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 自動生產建議示例 ===\n");

    let ledger = Ledger::new();

    ledger.register_chemical(Chemical::new(
        "CHEM-A".to_string(),
        "過氧化氫".to_string(),
        "kg".to_string(),
    ));
    ledger.register_chemical(Chemical::new(
        "CHEM-B".to_string(),
        "檸檬酸".to_string(),
        "kg".to_string(),
    ));

    // 三個成品：兩個低於警戒線，一個庫存充足
    ledger.register_product(
        Product::new("PROD-001".to_string(), "Cleaner-X".to_string())
            .with_stock(Decimal::from(5))
            .with_reorder_threshold(Decimal::from(30)),
    );
    ledger.register_product(
        Product::new("PROD-002".to_string(), "除油劑".to_string())
            .with_stock(Decimal::from(2))
            .with_reorder_threshold(Decimal::from(40))
            .with_min_production_qty(Decimal::from(50)),
    );
    ledger.register_product(
        Product::new("PROD-003".to_string(), "玻璃清潔劑".to_string())
            .with_stock(Decimal::from(90))
            .with_reorder_threshold(Decimal::from(30)),
    );

    for (name, product_id, chemical_id, per_batch) in [
        ("Cleaner-X", "PROD-001", "CHEM-A", 2),
        ("Degreaser", "PROD-002", "CHEM-B", 4),
        ("Glass", "PROD-003", "CHEM-A", 1),
    ] {
        ledger.add_formula(
            Formula::new(
                name.to_string(),
                Decimal::from(10),
                "L".to_string(),
                vec![Ingredient::new(
                    chemical_id.to_string(),
                    Decimal::from(per_batch),
                )],
            )?
            .with_product_id(product_id.to_string()),
        );
    }

    // CHEM-A 充足，CHEM-B 偏少（除油劑的建議會標記不可行）
    ledger.receive_purchase_order(
        "PO-001",
        &[
            PurchaseReceiptItem::new("CHEM-A".to_string(), Decimal::from(100)),
            PurchaseReceiptItem::new("CHEM-B".to_string(), Decimal::from(10)),
        ],
    )?;

    let plan = ledger.auto_plan();
    println!("建議 {} 筆（缺口大者優先）:\n", plan.len());

    for suggestion in &plan {
        println!(
            "- {}（成品 {}）：庫存 {} / 警戒線 {}，建議生產 {} L，可行: {}",
            suggestion.formula_name,
            suggestion.product_id,
            suggestion.current_stock,
            suggestion.reorder_threshold,
            suggestion.quantity_planned,
            if suggestion.feasible { "是" } else { "否" }
        );
        for line in &suggestion.availability.lines {
            if line.shortfall > Decimal::ZERO {
                println!(
                    "    缺料 {}: 需要 {}，可用 {}，缺 {}",
                    line.chemical_id, line.required, line.available, line.shortfall
                );
            }
        }
    }

    Ok(())
}
