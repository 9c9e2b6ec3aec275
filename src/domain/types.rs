// ==========================================
// 变体库存指示器 - 领域类型定义
// ==========================================
// 职责: 库存状态、排序策略、会话阶段、文案键的统一定义
// 红线: 库存状态为派生值,每轮计算重新推导,不落任何存储
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 库存状态 (Stock State)
// ==========================================
// 由 StockClassifier 派生,规则优先级见 classifier 模块
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockState {
    /// 有货(None 表示不跟踪库存数量)
    InStock(Option<u32>),
    /// 低库存(数量必然存在)
    LowStock(u32),
    /// 可预订(缺货但商家允许下单)
    Backorder,
    /// 缺货
    OutOfStock,
    /// 无匹配变体(按缺货口径展示)
    Unknown,
}

impl StockState {
    /// 是否按"可购买"口径参与排序
    ///
    /// # 规则
    /// - InStock / LowStock / Backorder → 可购买展示
    /// - OutOfStock / Unknown → 不可购买展示
    pub fn is_available(&self) -> bool {
        matches!(
            self,
            StockState::InStock(_) | StockState::LowStock(_) | StockState::Backorder
        )
    }

    /// 该状态对应的文案键
    ///
    /// # 规则
    /// - InStock(Some(_)) → XInStock(带数量文案)
    /// - InStock(None) → InStock
    /// - Unknown → OutOfStock(无匹配变体按缺货文案展示)
    pub fn template_key(&self) -> TemplateKey {
        match self {
            StockState::InStock(Some(_)) => TemplateKey::XInStock,
            StockState::InStock(None) => TemplateKey::InStock,
            StockState::LowStock(_) => TemplateKey::LowStock,
            StockState::Backorder => TemplateKey::OnBackorder,
            StockState::OutOfStock | StockState::Unknown => TemplateKey::OutOfStock,
        }
    }

    /// 提取状态携带的库存数量
    pub fn quantity(&self) -> Option<u32> {
        match self {
            StockState::InStock(qty) => *qty,
            StockState::LowStock(qty) => Some(*qty),
            _ => None,
        }
    }
}

impl fmt::Display for StockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockState::InStock(Some(qty)) => write!(f, "IN_STOCK({})", qty),
            StockState::InStock(None) => write!(f, "IN_STOCK"),
            StockState::LowStock(qty) => write!(f, "LOW_STOCK({})", qty),
            StockState::Backorder => write!(f, "BACKORDER"),
            StockState::OutOfStock => write!(f, "OUT_OF_STOCK"),
            StockState::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ==========================================
// 排序策略 (Stock Order Policy)
// ==========================================
// 作用范围: 仅最后一个属性下拉框
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockOrderPolicy {
    Disabled,
    InStockFirst,
    OutOfStockFirst,
}

impl StockOrderPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockOrderPolicy::Disabled => "disabled",
            StockOrderPolicy::InStockFirst => "in_stock_first",
            StockOrderPolicy::OutOfStockFirst => "out_of_stock_first",
        }
    }
}

impl Default for StockOrderPolicy {
    fn default() -> Self {
        StockOrderPolicy::Disabled
    }
}

impl std::str::FromStr for StockOrderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disabled" => Ok(StockOrderPolicy::Disabled),
            "in_stock_first" | "in-stock-first" => Ok(StockOrderPolicy::InStockFirst),
            "out_of_stock_first" | "out-of-stock-first" => Ok(StockOrderPolicy::OutOfStockFirst),
            other => Err(format!("未知排序策略: {}", other)),
        }
    }
}

impl fmt::Display for StockOrderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 会话阶段 (Session Phase)
// ==========================================
// 依据: VariationSession 状态机
// AwaitingAttributes 为重置过程中的瞬时阶段,结束后回落 Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Idle,               // 空闲,等待信号
    AwaitingAttributes, // 前置属性未选全
    Fetching,           // 变体数据请求中
    Resolving,          // 逐选项解析中
    Done,               // 本轮完成
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "IDLE"),
            SessionPhase::AwaitingAttributes => write!(f, "AWAITING_ATTRIBUTES"),
            SessionPhase::Fetching => write!(f, "FETCHING"),
            SessionPhase::Resolving => write!(f, "RESOLVING"),
            SessionPhase::Done => write!(f, "DONE"),
        }
    }
}

// ==========================================
// 文案键 (Template Key)
// ==========================================
// 五个可配置文案,留空回退内置默认值(见 locales/)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKey {
    InStock,
    OutOfStock,
    OnBackorder,
    XInStock,
    LowStock,
}

impl TemplateKey {
    /// 全部文案键(配置遍历用)
    pub const ALL: [TemplateKey; 5] = [
        TemplateKey::InStock,
        TemplateKey::OutOfStock,
        TemplateKey::OnBackorder,
        TemplateKey::XInStock,
        TemplateKey::LowStock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKey::InStock => "in_stock",
            TemplateKey::OutOfStock => "out_of_stock",
            TemplateKey::OnBackorder => "on_backorder",
            TemplateKey::XInStock => "x_in_stock",
            TemplateKey::LowStock => "low_stock",
        }
    }
}

impl std::str::FromStr for TemplateKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in_stock" => Ok(TemplateKey::InStock),
            "out_of_stock" => Ok(TemplateKey::OutOfStock),
            "on_backorder" => Ok(TemplateKey::OnBackorder),
            "x_in_stock" => Ok(TemplateKey::XInStock),
            "low_stock" => Ok(TemplateKey::LowStock),
            other => Err(format!("未知文案键: {}", other)),
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
