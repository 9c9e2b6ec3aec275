// ==========================================
// 变体库存指示器 - 选项排序引擎
// ==========================================
// 职责: 按可购买性对非占位选项计算目标展示顺序
// 红线: 稳定排序,同档保持输入相对顺序(确定性与可测性要求)
// 红线: 全部可购买时还原初始顺序,而非稳定排序结果
// ==========================================

use crate::domain::dropdown::OptionRecord;
use crate::domain::types::StockOrderPolicy;
use tracing::debug;

// ==========================================
// OptionOrderer - 选项排序引擎
// ==========================================
pub struct OptionOrderer {
    // 无状态引擎,不需要注入依赖
}

impl OptionOrderer {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算非占位选项的目标展示顺序
    ///
    /// # 规则
    /// - 占位选项不在输入内,恒定占据 0 号位(由调用方保证)
    /// - Disabled 策略: 输入顺序原样保留
    /// - InStockFirst / OutOfStockFirst: 按可购买性稳定分档
    /// - 全部可购买 → 返回 original_order(自然顺序),不采用分档结果
    /// - 选中值按值保留,排序不影响选中(选项只移位不重建)
    ///
    /// # 参数
    /// - options: 非占位选项,按当前展示顺序
    /// - policy: 排序策略
    /// - original_order: 初始化时的自然顺序
    /// - current_selection: 当前选中值(仅诊断用,选中按值自动保留)
    ///
    /// # 返回
    /// 非占位选项的值顺序
    pub fn reorder(
        &self,
        options: &[&OptionRecord],
        policy: StockOrderPolicy,
        original_order: &[String],
        current_selection: Option<&str>,
    ) -> Vec<String> {
        if let Some(selected) = current_selection {
            if !selected.is_empty() && !options.iter().any(|option| option.value == selected) {
                debug!(selected = selected, "选中值不在选项集内,无法保留");
            }
        }

        if policy == StockOrderPolicy::Disabled {
            return options.iter().map(|option| option.value.clone()).collect();
        }

        if options.iter().all(|option| option.is_available()) {
            debug!(policy = %policy, "全部选项可购买,还原初始顺序");
            return original_order.to_vec();
        }

        let mut sorted: Vec<&OptionRecord> = options.to_vec();
        // sort_by 为稳定排序,同档相对顺序不变
        sorted.sort_by(|a, b| {
            let a_rank = Self::rank(a, policy);
            let b_rank = Self::rank(b, policy);
            a_rank.cmp(&b_rank)
        });

        sorted.into_iter().map(|option| option.value.clone()).collect()
    }

    /// 策略下的档位: 0 在前, 1 在后
    fn rank(option: &OptionRecord, policy: StockOrderPolicy) -> u8 {
        let available = option.is_available();
        match policy {
            StockOrderPolicy::InStockFirst => {
                if available {
                    0
                } else {
                    1
                }
            }
            StockOrderPolicy::OutOfStockFirst => {
                if available {
                    1
                } else {
                    0
                }
            }
            StockOrderPolicy::Disabled => 0,
        }
    }
}

impl Default for OptionOrderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::StockState;

    fn option(value: &str, state: Option<StockState>) -> OptionRecord {
        OptionRecord {
            value: value.to_string(),
            original_label: value.to_string(),
            current_state: state,
            enabled: true,
            is_placeholder: false,
        }
    }

    fn values(order: &[String]) -> Vec<&str> {
        order.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_disabled_policy_preserves_input_order() {
        let orderer = OptionOrderer::new();
        let a = option("a", Some(StockState::OutOfStock));
        let b = option("b", Some(StockState::InStock(None)));
        let original = vec!["a".to_string(), "b".to_string()];

        let order = orderer.reorder(&[&a, &b], StockOrderPolicy::Disabled, &original, None);
        assert_eq!(values(&order), ["a", "b"]);
    }

    #[test]
    fn test_in_stock_first_stable_partition() {
        // [A(可购), B(不可购), C(可购)] → [A, C, B],同档保持相对顺序
        let orderer = OptionOrderer::new();
        let a = option("a", Some(StockState::InStock(Some(5))));
        let b = option("b", Some(StockState::OutOfStock));
        let c = option("c", Some(StockState::Backorder));
        let original = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let order = orderer.reorder(
            &[&a, &b, &c],
            StockOrderPolicy::InStockFirst,
            &original,
            None,
        );
        assert_eq!(values(&order), ["a", "c", "b"]);
    }

    #[test]
    fn test_out_of_stock_first() {
        let orderer = OptionOrderer::new();
        let a = option("a", Some(StockState::InStock(None)));
        let b = option("b", Some(StockState::Unknown));
        let c = option("c", Some(StockState::LowStock(2)));
        let original = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let order = orderer.reorder(
            &[&a, &b, &c],
            StockOrderPolicy::OutOfStockFirst,
            &original,
            None,
        );
        assert_eq!(values(&order), ["b", "a", "c"]);
    }

    #[test]
    fn test_all_available_restores_original_order() {
        // 输入顺序为上一轮分档结果 [c, a, b],全部可购买 → 还原 [a, b, c]
        let orderer = OptionOrderer::new();
        let a = option("a", Some(StockState::InStock(None)));
        let b = option("b", Some(StockState::LowStock(1)));
        let c = option("c", Some(StockState::Backorder));
        let original = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let order = orderer.reorder(
            &[&c, &a, &b],
            StockOrderPolicy::InStockFirst,
            &original,
            Some("b"),
        );
        assert_eq!(values(&order), ["a", "b", "c"]);
    }

    #[test]
    fn test_neutral_state_counts_as_available() {
        // 中性状态(未评估)按可购买处理
        let orderer = OptionOrderer::new();
        let a = option("a", None);
        let b = option("b", None);
        let original = vec!["a".to_string(), "b".to_string()];

        let order = orderer.reorder(&[&b, &a], StockOrderPolicy::InStockFirst, &original, None);
        assert_eq!(values(&order), ["a", "b"]);
    }
}
