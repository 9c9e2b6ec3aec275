// ==========================================
// 变体库存指示器 - 文案渲染引擎
// ==========================================
// 职责: 按文案键解析展示文本,支持配置覆写与内置默认值回退
// 红线: 永不失败,配置缺失/畸形一律回退默认值
// 红线: 装饰文本始终从 original_label 重新拼接,
//       不在已装饰文本上二次追加
// ==========================================

use crate::domain::dropdown::LABEL_SEPARATOR;
use crate::domain::types::{StockState, TemplateKey};
use crate::i18n;
use std::collections::HashMap;

/// 数量合并标签
pub const STOCK_MERGE_TAG: &str = "{stock}";

// ==========================================
// TemplateEngine - 文案渲染引擎
// ==========================================
pub struct TemplateEngine {
    /// 配置覆写(留空视为未配置)
    overrides: HashMap<TemplateKey, String>,
}

impl TemplateEngine {
    /// # 参数
    /// - overrides: 文案键 → 配置文本;空白文本按未配置处理
    pub fn new(overrides: HashMap<TemplateKey, String>) -> Self {
        Self { overrides }
    }

    /// 渲染文案
    ///
    /// # 规则
    /// - 覆写存在且非空白 → 用覆写,否则用内置默认值(locales/)
    /// - quantity 提供且模板含 {stock} → 以十进制数量替换全部出现
    /// - 模板不含 {stock} 时忽略 quantity
    pub fn render(&self, key: TemplateKey, quantity: Option<u32>) -> String {
        let template = match self.overrides.get(&key) {
            Some(text) if !text.trim().is_empty() => text.clone(),
            _ => Self::default_text(key),
        };

        match quantity {
            Some(qty) if template.contains(STOCK_MERGE_TAG) => {
                template.replace(STOCK_MERGE_TAG, &qty.to_string())
            }
            _ => template,
        }
    }

    /// 按库存状态装饰基础文本
    ///
    /// # 返回
    /// `original_label + " - " + 状态文案`
    pub fn decorate_label(&self, original_label: &str, state: StockState) -> String {
        let suffix = self.render(state.template_key(), state.quantity());
        format!("{}{}{}", original_label, LABEL_SEPARATOR, suffix)
    }

    /// 内置默认文案(随当前语言环境)
    fn default_text(key: TemplateKey) -> String {
        i18n::t(&format!("stock_text.{}", key.as_str()))
    }
}
