// ==========================================
// 变体库存指示器 - 库存分类引擎
// ==========================================
// 职责: 将匹配到的变体记录归一为库存状态
// 红线: 规则按序评估,首条命中即返回
// 红线: 预订信号优先于显式库存标志 —
//       等待补货的变体始终按可购买口径展示
// ==========================================

use crate::domain::types::StockState;
use crate::domain::variation::VariationRecord;
use tracing::trace;

// ==========================================
// StockClassifier - 库存分类引擎
// ==========================================
pub struct StockClassifier {
    // 无状态引擎,不需要注入依赖
}

impl StockClassifier {
    pub fn new() -> Self {
        Self {}
    }

    /// 归一库存状态
    ///
    /// # 规则(按序,首条命中生效)
    /// 1. 无记录 → Unknown
    /// 2. 预订信号(backorders_allowed 或标记片段)→ Backorder
    /// 3. max_quantity 存在 → 阈值 > 0 且数量 ≤ 阈值时 LowStock,否则 InStock(带数量)
    /// 4. is_in_stock 且 is_purchasable → InStock(不带数量)
    /// 5. 其余 → OutOfStock
    ///
    /// # 参数
    /// - record: 匹配到的变体记录(None = 零命中)
    /// - low_stock_threshold: 低库存阈值;0 表示关闭低库存档
    pub fn classify(
        &self,
        record: Option<&VariationRecord>,
        low_stock_threshold: u32,
    ) -> StockState {
        let state = match record {
            None => StockState::Unknown,
            Some(record) => {
                if record.has_backorder_signal() {
                    StockState::Backorder
                } else if let Some(quantity) = record.max_quantity {
                    if low_stock_threshold > 0 && quantity <= low_stock_threshold {
                        StockState::LowStock(quantity)
                    } else {
                        StockState::InStock(Some(quantity))
                    }
                } else if record.is_in_stock && record.is_purchasable {
                    StockState::InStock(None)
                } else {
                    StockState::OutOfStock
                }
            }
        };

        trace!(state = %state, threshold = low_stock_threshold, "库存分类完成");
        state
    }
}

impl Default for StockClassifier {
    fn default() -> Self {
        Self::new()
    }
}
