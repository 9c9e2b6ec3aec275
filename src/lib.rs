// ==========================================
// 变体库存指示器 - 核心库
// ==========================================
// 系统定位: 可配置商品最后一个属性下拉框的
//           实时库存标注与排序引擎(DOM 无关)
// 技术栈: Rust + tokio
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据层 - 变体记录拉取与载荷解码
pub mod repository;

// 引擎层 - 业务规则与会话编排
pub mod engine;

// 配置层 - 指示器配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{SessionPhase, StockOrderPolicy, StockState, TemplateKey};

// 领域实体
pub use domain::{
    AttributeSelection, Dropdown, FormSnapshot, OptionRecord, RenderBatch, RenderInstruction,
    VariationRecord,
};

// 引擎
pub use engine::{
    NoOpRenderSink, OptionOrderer, PassOutcome, RenderSink, StockClassifier, TemplateEngine,
    VariationMatcher, VariationSession,
};

// 配置
pub use config::IndicatorSettings;

// 数据层
pub use repository::{RepositoryError, RepositoryResult, StaticVariationSource, VariationSource};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "变体库存指示器";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
