//! 數量捨入策略

use rust_decimal::{Decimal, RoundingStrategy};

/// 數量的自然精度（小數 3 位）
pub const QUANTITY_DP: u32 = 3;

/// 依統一策略捨入數量：四捨五入（半值進位）到小數 3 位
///
/// 換算必須走同一個捨入入口，重複換算才有確定性。
pub fn round_quantity(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(QUANTITY_DP, RoundingStrategy::MidpointAwayFromZero)
}
