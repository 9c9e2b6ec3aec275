// ==========================================
// 变体库存指示器 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎与会话编排
// 红线: 引擎不触碰 DOM,所有规则可解释(日志携带决策字段)
// ==========================================

pub mod classifier;
pub mod events;
pub mod matcher;
pub mod orderer;
pub mod session;
pub mod template;

// 重导出核心引擎
pub use classifier::StockClassifier;
pub use events::{NoOpRenderSink, OptionalRenderSink, RenderSink};
pub use matcher::VariationMatcher;
pub use orderer::OptionOrderer;
pub use session::{PassOutcome, SessionError, SessionResult, VariationSession};
pub use template::{TemplateEngine, STOCK_MERGE_TAG};
