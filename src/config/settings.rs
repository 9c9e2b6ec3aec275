// ==========================================
// 变体库存指示器 - 指示器配置
// ==========================================
// 职责: 配置的类型化定义、默认值与净化规则
// 来源: 宿主在初始化时提供的键值表或 JSON 载荷
// 红线: 配置畸形一律回落默认值,不报错、不中断
// ==========================================

use crate::domain::types::{StockOrderPolicy, TemplateKey};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

// ==========================================
// 配置键定义
// ==========================================
pub mod settings_keys {
    /// 缺货选项是否禁止选择
    pub const DISABLE_OUT_OF_STOCK: &str = "disable_out_of_stock";
    /// 排序策略
    pub const STOCK_ORDER: &str = "stock_order";
    /// 低库存阈值
    pub const LOW_STOCK_THRESHOLD: &str = "low_stock_threshold";
    /// 键值表中文案覆写键的前缀(text_in_stock 等)
    pub const TEXT_PREFIX: &str = "text_";
    /// JSON 载荷中的文案表键
    pub const STRINGS: &str = "strings";
}

/// 低库存阈值默认值
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

// ==========================================
// IndicatorSettings - 指示器配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorSettings {
    /// 为真时,不可购买选项置为不可选;为假时仍可选但显示状态后缀
    pub disable_out_of_stock: bool,
    /// 最后一个属性下拉框的排序策略
    pub stock_order: StockOrderPolicy,
    /// 低库存阈值;0 表示关闭低库存档
    pub low_stock_threshold: u32,
    /// 文案覆写(留空回退内置默认值)
    pub templates: HashMap<TemplateKey, String>,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            disable_out_of_stock: true,
            stock_order: StockOrderPolicy::Disabled,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            templates: HashMap::new(),
        }
    }
}

impl IndicatorSettings {
    /// 从字符串键值表构建(管理端存储形态)
    ///
    /// # 规则
    /// - disable_out_of_stock: "yes"/"no" 复选框语义,缺失默认 "yes"
    /// - stock_order: 非法取值净化为 disabled
    /// - low_stock_threshold: 非负整数,负数取绝对值,无法解析回落默认值
    /// - text_* 键按文案键收集,未知键忽略
    pub fn from_kv(values: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        let disable_out_of_stock = values
            .get(settings_keys::DISABLE_OUT_OF_STOCK)
            .map(|value| Self::parse_flag(value))
            .unwrap_or(defaults.disable_out_of_stock);

        let stock_order = values
            .get(settings_keys::STOCK_ORDER)
            .map(|value| Self::parse_policy(value))
            .unwrap_or(defaults.stock_order);

        let low_stock_threshold = values
            .get(settings_keys::LOW_STOCK_THRESHOLD)
            .map(|value| Self::parse_threshold(value))
            .unwrap_or(defaults.low_stock_threshold);

        let mut templates = HashMap::new();
        for (key, value) in values {
            let Some(text_key) = key.strip_prefix(settings_keys::TEXT_PREFIX) else {
                continue;
            };
            match TemplateKey::from_str(text_key) {
                Ok(template_key) => {
                    templates.insert(template_key, value.clone());
                }
                Err(_) => {
                    debug!(key = key.as_str(), "忽略未知文案配置键");
                }
            }
        }

        Self {
            disable_out_of_stock,
            stock_order,
            low_stock_threshold,
            templates,
        }
    }

    /// 从 JSON 对象构建(注入页面的载荷形态)
    ///
    /// # 载荷示例
    /// ```json
    /// {
    ///   "disable_out_of_stock": "yes",
    ///   "stock_order": "in_stock_first",
    ///   "low_stock_threshold": 10,
    ///   "strings": { "in_stock": "In stock", "low_stock": "Only {stock} left" }
    /// }
    /// ```
    pub fn from_json(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(object) = value.as_object() else {
            debug!("配置载荷不是 JSON 对象,使用默认配置");
            return defaults;
        };

        let disable_out_of_stock = match object.get(settings_keys::DISABLE_OUT_OF_STOCK) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(text)) => Self::parse_flag(text),
            _ => defaults.disable_out_of_stock,
        };

        let stock_order = match object.get(settings_keys::STOCK_ORDER) {
            Some(Value::String(text)) => Self::parse_policy(text),
            _ => defaults.stock_order,
        };

        let low_stock_threshold = match object.get(settings_keys::LOW_STOCK_THRESHOLD) {
            Some(Value::Number(number)) => number
                .as_u64()
                .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
                .or_else(|| number.as_i64().map(|n| n.unsigned_abs().min(u64::from(u32::MAX)) as u32))
                .unwrap_or(defaults.low_stock_threshold),
            Some(Value::String(text)) => Self::parse_threshold(text),
            _ => defaults.low_stock_threshold,
        };

        let mut templates = HashMap::new();
        if let Some(Value::Object(strings)) = object.get(settings_keys::STRINGS) {
            for (key, text) in strings {
                let (Ok(template_key), Some(text)) = (TemplateKey::from_str(key), text.as_str())
                else {
                    debug!(key = key.as_str(), "忽略未知文案载荷键");
                    continue;
                };
                templates.insert(template_key, text.to_string());
            }
        }

        Self {
            disable_out_of_stock,
            stock_order,
            low_stock_threshold,
            templates,
        }
    }

    /// "yes"/"no" 复选框取值
    fn parse_flag(value: &str) -> bool {
        value.trim().eq_ignore_ascii_case("yes")
    }

    /// 排序策略,非法取值净化为 disabled
    fn parse_policy(value: &str) -> StockOrderPolicy {
        StockOrderPolicy::from_str(value).unwrap_or_else(|reason| {
            debug!(reason = reason.as_str(), "排序策略净化为 disabled");
            StockOrderPolicy::Disabled
        })
    }

    /// 非负整数阈值;负数取绝对值,无法解析回落默认值
    fn parse_threshold(value: &str) -> u32 {
        let trimmed = value.trim();
        if let Ok(parsed) = trimmed.parse::<u32>() {
            return parsed;
        }
        if let Ok(parsed) = trimmed.parse::<i64>() {
            return parsed.unsigned_abs().min(u64::from(u32::MAX)) as u32;
        }
        debug!(value = trimmed, "低库存阈值无法解析,使用默认值");
        DEFAULT_LOW_STOCK_THRESHOLD
    }
}
