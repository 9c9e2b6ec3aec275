// ==========================================
// 变体库存指示器 - 领域层
// ==========================================
// 职责: 实体与类型定义,不含业务规则
// ==========================================

pub mod dropdown;
pub mod types;
pub mod variation;

// 重导出核心类型
pub use dropdown::{Dropdown, OptionRecord, RenderBatch, RenderInstruction, LABEL_SEPARATOR};
pub use types::{SessionPhase, StockOrderPolicy, StockState, TemplateKey};
pub use variation::{
    AttributeSelection, FormSnapshot, VariationRecord, BACKORDER_MARKUP_CLASS,
};
