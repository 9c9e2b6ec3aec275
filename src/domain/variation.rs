// ==========================================
// 变体库存指示器 - 变体领域模型
// ==========================================
// 职责: 服务端变体记录与表单快照的实体定义
// 红线: 变体记录一次拉取后不可变,仅由会话缓存独占持有
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 预订提示的标记片段
///
/// 变体的 availability_html 中出现该片段时,视为可预订的兜底信号
pub const BACKORDER_MARKUP_CLASS: &str = "available-on-backorder";

// ==========================================
// AttributeSelection - 属性选择
// ==========================================
// 属性名 → 已选值;空字符串表示"未选择"
// 生命周期: 每轮计算由表单快照重建,不跨轮保留
pub type AttributeSelection = BTreeMap<String, String>;

// ==========================================
// VariationRecord - 变体记录
// ==========================================
// 用途: 服务端定义的一个具体变体组合及其库存数据
// 对齐: WooCommerce get_available_variations 响应字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationRecord {
    // ===== 属性组合 =====
    /// 属性名 → 属性值;空字符串为通配符(匹配该属性的任意取值)
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    // ===== 库存标志 =====
    #[serde(default)]
    pub is_in_stock: bool,
    #[serde(default)]
    pub is_purchasable: bool,

    // ===== 库存数量 =====
    /// 最大可购数量;None 表示不跟踪数量
    #[serde(rename = "max_qty", default)]
    pub max_quantity: Option<u32>,

    // ===== 预订信息 =====
    #[serde(default)]
    pub backorders_allowed: bool,
    /// 可用性展示片段(不透明字符串,仅扫描预订标记)
    #[serde(rename = "availability_html", default)]
    pub availability_markup: String,
}

impl VariationRecord {
    /// 是否带有预订信号
    ///
    /// # 规则
    /// - backorders_allowed 为真,或
    /// - availability_markup 含 "available-on-backorder" 片段
    pub fn has_backorder_signal(&self) -> bool {
        self.backorders_allowed || self.availability_markup.contains(BACKORDER_MARKUP_CLASS)
    }
}

// ==========================================
// FormSnapshot - 表单快照
// ==========================================
// 用途: "属性变更"信号的载荷,按展示顺序携带全部属性下拉框的当前值
// 生命周期: 瞬态;会话仅保留最近一份用于取回"解析时刻的最新选择"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    /// 商品标识(拉取变体数据用)
    pub product_id: u64,
    /// (属性名, 当前值) 按展示顺序;最后一项即"最后一个属性"
    pub attributes: Vec<(String, String)>,
}

impl FormSnapshot {
    pub fn new(product_id: u64, attributes: Vec<(String, String)>) -> Self {
        Self {
            product_id,
            attributes,
        }
    }

    /// 最后一个属性的名称
    pub fn last_attribute_name(&self) -> Option<&str> {
        self.attributes.last().map(|(name, _)| name.as_str())
    }

    /// 最后一个属性的当前选中值(空字符串 = 未选)
    pub fn last_attribute_value(&self) -> &str {
        self.attributes
            .last()
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// 前置属性是否已全部选择
    ///
    /// # 规则
    /// 最后一个属性之前的每个属性都必须有非空值
    pub fn prior_attributes_complete(&self) -> bool {
        let count = self.attributes.len();
        if count == 0 {
            return false;
        }
        self.attributes[..count - 1]
            .iter()
            .all(|(_, value)| !value.is_empty())
    }

    /// 提取前置属性选择(不含最后一个属性)
    ///
    /// # 返回
    /// - Some(selection): 前置属性全部已选
    /// - None: 存在未选的前置属性
    pub fn prior_selection(&self) -> Option<AttributeSelection> {
        if !self.prior_attributes_complete() {
            return None;
        }
        let count = self.attributes.len();
        Some(
            self.attributes[..count - 1]
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    }
}
