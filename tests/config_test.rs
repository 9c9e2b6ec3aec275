// ==========================================
// 指示器配置集成测试
// ==========================================
// 测试目标: 验证配置净化与文案回退在公开 API 上的行为
// ==========================================

use std::collections::HashMap;

use serde_json::json;
use variation_stock_indicator::{
    IndicatorSettings, StockOrderPolicy, TemplateEngine, TemplateKey,
};

#[test]
fn test_kv_ingestion_end_to_end() {
    // 管理端存储形态 → 类型化配置 → 文案引擎
    let mut values = HashMap::new();
    values.insert("disable_out_of_stock".to_string(), "no".to_string());
    values.insert("stock_order".to_string(), "out_of_stock_first".to_string());
    values.insert("low_stock_threshold".to_string(), "3".to_string());
    values.insert("text_x_in_stock".to_string(), "{stock} pcs ready".to_string());

    let settings = IndicatorSettings::from_kv(&values);
    assert!(!settings.disable_out_of_stock);
    assert_eq!(settings.stock_order, StockOrderPolicy::OutOfStockFirst);
    assert_eq!(settings.low_stock_threshold, 3);

    let templates = TemplateEngine::new(settings.templates.clone());
    assert_eq!(templates.render(TemplateKey::XInStock, Some(8)), "8 pcs ready");
}

#[test]
fn test_json_payload_ingestion() {
    // 页面载荷形态(wc_ajax_object 注入的结构)
    let payload = json!({
        "ajax_url": "/wp-admin/admin-ajax.php",
        "disable_out_of_stock": "yes",
        "stock_order": "in_stock_first",
        "low_stock_threshold": 5,
        "strings": {
            "in_stock": "In stock",
            "out_of_stock": "Out of stock",
            "on_backorder": "On backorder",
            "x_in_stock": "{stock} in stock",
            "low_stock": "Only {stock} left in stock"
        }
    });

    let settings = IndicatorSettings::from_json(&payload);
    assert!(settings.disable_out_of_stock);
    assert_eq!(settings.stock_order, StockOrderPolicy::InStockFirst);
    assert_eq!(settings.low_stock_threshold, 5);
    assert_eq!(settings.templates.len(), 5);

    // 未知键(ajax_url)被忽略,不影响其余配置
    let templates = TemplateEngine::new(settings.templates.clone());
    assert_eq!(
        templates.render(TemplateKey::LowStock, Some(2)),
        "Only 2 left in stock"
    );
}

#[test]
fn test_malformed_configuration_never_fails() {
    // 畸形配置一律回落默认值
    let payload = json!({
        "disable_out_of_stock": 42,
        "stock_order": "sideways",
        "low_stock_threshold": "plenty",
        "strings": "not a map"
    });

    let settings = IndicatorSettings::from_json(&payload);
    assert!(settings.disable_out_of_stock);
    assert_eq!(settings.stock_order, StockOrderPolicy::Disabled);
    assert_eq!(settings.low_stock_threshold, 10);
    assert!(settings.templates.is_empty());
}

#[test]
fn test_zero_threshold_round_trip() {
    // 阈值 0(关闭低库存档)合法通过净化
    let mut values = HashMap::new();
    values.insert("low_stock_threshold".to_string(), "0".to_string());
    let settings = IndicatorSettings::from_kv(&values);
    assert_eq!(settings.low_stock_threshold, 0);
}
