// ==========================================
// 变体库存指示器 - 演示入口
// ==========================================
// 用途: 以静态数据源驱动一个会话,回放一段信号序列,
//       打印每轮渲染指令(宿主适配器的终端版)
// ==========================================

use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;

use variation_stock_indicator::domain::dropdown::RenderBatch;
use variation_stock_indicator::engine::RenderSink;
use variation_stock_indicator::{
    logging, Dropdown, FormSnapshot, IndicatorSettings, StaticVariationSource, StockOrderPolicy,
    VariationRecord, VariationSession,
};

/// 终端渲染接收方: 按目标位置打印选项
struct ConsoleSink;

impl RenderSink for ConsoleSink {
    fn apply(&self, batch: &RenderBatch) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("---- 渲染批次 {} ----", batch.pass_id);
        for instruction in &batch.instructions {
            println!(
                "  [{}] {:<28} value={:<8} enabled={}",
                instruction.target_position,
                instruction.display_label,
                if instruction.value.is_empty() {
                    "(占位)"
                } else {
                    instruction.value.as_str()
                },
                instruction.enabled
            );
        }
        if let Some(value) = &batch.auto_select {
            println!("  自动选中建议: {}", value);
        }
        Ok(())
    }
}

fn record(
    color: &str,
    size: &str,
    is_in_stock: bool,
    max_quantity: Option<u32>,
    backorders_allowed: bool,
) -> VariationRecord {
    let mut attributes = BTreeMap::new();
    attributes.insert("attribute_color".to_string(), color.to_string());
    attributes.insert("attribute_size".to_string(), size.to_string());
    VariationRecord {
        attributes,
        is_in_stock,
        is_purchasable: is_in_stock || backorders_allowed,
        max_quantity,
        backorders_allowed,
        availability_markup: String::new(),
    }
}

fn snapshot(color: &str, size: &str) -> FormSnapshot {
    FormSnapshot::new(
        1001,
        vec![
            ("attribute_color".to_string(), color.to_string()),
            ("attribute_size".to_string(), size.to_string()),
        ],
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("变体库存指示器 - 演示会话");
    tracing::info!("系统版本: {}", variation_stock_indicator::VERSION);
    tracing::info!("==================================================");

    // 红色系变体: S 低库存 / M 充足 / L 缺货 / XL 可预订
    let source = Arc::new(StaticVariationSource::new(
        1001,
        vec![
            record("red", "small", true, Some(2), false),
            record("red", "medium", true, Some(40), false),
            record("red", "large", false, None, false),
            record("red", "xlarge", false, None, true),
            record("", "small", true, None, false),
        ],
    ));

    let dropdown = Dropdown::from_options(&[
        (String::new(), "Choose an option".to_string()),
        ("small".to_string(), "Small".to_string()),
        ("medium".to_string(), "Medium".to_string()),
        ("large".to_string(), "Large".to_string()),
        ("xlarge".to_string(), "XLarge".to_string()),
    ]);

    let settings = IndicatorSettings {
        stock_order: StockOrderPolicy::InStockFirst,
        ..IndicatorSettings::default()
    };

    let session = VariationSession::new(1001, settings, dropdown, source)
        .with_sink(Arc::new(ConsoleSink));

    // 信号1: 前置属性未选 → 重置轮
    println!("\n== 信号1: 颜色未选 ==");
    session.selection_changed(&snapshot("", "")).await?;

    // 信号2: 颜色选定 → 拉取 + 解析轮
    println!("\n== 信号2: 颜色=red ==");
    session.selection_changed(&snapshot("red", "")).await?;

    // 信号3: 尺码也选定 → 缓存命中,直接解析
    println!("\n== 信号3: 颜色=red, 尺码=medium ==");
    session.selection_changed(&snapshot("red", "medium")).await?;

    // 信号4: 颜色清空 → 重置轮
    println!("\n== 信号4: 颜色清空 ==");
    session.selection_changed(&snapshot("", "medium")).await?;

    tracing::info!("演示结束");
    Ok(())
}
