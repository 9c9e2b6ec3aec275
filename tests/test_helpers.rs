// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供变体记录、下拉框、表单快照等测试数据构造
// ==========================================

#![allow(dead_code)]

use std::collections::BTreeMap;

use variation_stock_indicator::{Dropdown, FormSnapshot, IndicatorSettings, VariationRecord};

/// 创建测试用变体记录
///
/// # 参数
/// - attrs: (属性名, 属性值) 列表;空值为通配符
/// - is_in_stock / is_purchasable: 库存标志
/// - max_quantity: 最大可购数量
/// - backorders_allowed: 是否允许预订
pub fn create_test_record(
    attrs: &[(&str, &str)],
    is_in_stock: bool,
    is_purchasable: bool,
    max_quantity: Option<u32>,
    backorders_allowed: bool,
) -> VariationRecord {
    let attributes: BTreeMap<String, String> = attrs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    VariationRecord {
        attributes,
        is_in_stock,
        is_purchasable,
        max_quantity,
        backorders_allowed,
        availability_markup: String::new(),
    }
}

/// 颜色 + 尺码 两属性商品的变体记录
pub fn color_size_record(
    color: &str,
    size: &str,
    is_in_stock: bool,
    max_quantity: Option<u32>,
    backorders_allowed: bool,
) -> VariationRecord {
    create_test_record(
        &[("attribute_color", color), ("attribute_size", size)],
        is_in_stock,
        is_in_stock || backorders_allowed,
        max_quantity,
        backorders_allowed,
    )
}

/// 标准尺码下拉框: 占位 + small/medium/large
pub fn size_dropdown() -> Dropdown {
    Dropdown::from_options(&[
        (String::new(), "Choose an option".to_string()),
        ("small".to_string(), "Small".to_string()),
        ("medium".to_string(), "Medium".to_string()),
        ("large".to_string(), "Large".to_string()),
    ])
}

/// 颜色 + 尺码 商品的表单快照(尺码为最后一个属性)
pub fn color_size_snapshot(product_id: u64, color: &str, size: &str) -> FormSnapshot {
    FormSnapshot::new(
        product_id,
        vec![
            ("attribute_color".to_string(), color.to_string()),
            ("attribute_size".to_string(), size.to_string()),
        ],
    )
}

/// 默认配置的便捷变体
pub fn settings_with(
    disable_out_of_stock: bool,
    stock_order: variation_stock_indicator::StockOrderPolicy,
    low_stock_threshold: u32,
) -> IndicatorSettings {
    IndicatorSettings {
        disable_out_of_stock,
        stock_order,
        low_stock_threshold,
        ..IndicatorSettings::default()
    }
}
