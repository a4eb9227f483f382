//! # ProdPlan Ledger
//!
//! 庫存帳與生產訂單生命週期模組

pub mod consumption;
pub mod ledger;

// Re-export 主要類型
pub use consumption::{BatchDraw, FifoConsumption};
pub use ledger::{Ledger, PurchaseReceiptItem};
