// ==========================================
// 变体库存指示器 - 渲染输出事件
// ==========================================
// 职责: 定义渲染指令下发 trait,实现依赖倒置
// 说明: Engine 层定义 trait,宿主适配层实现(DOM/模拟终端等)
// 红线: 核心不做任何 DOM 操作,只产出指令批次
// ==========================================

use crate::domain::dropdown::RenderBatch;
use std::error::Error;
use std::sync::Arc;

// ==========================================
// 渲染下发 Trait
// ==========================================

/// 渲染指令接收方
///
/// Engine 层定义,宿主适配层实现
///
/// # 实现说明
/// - 适配器按 target_position 重排选项元素、更新文本与可选态
/// - auto_select 存在时选中该值并回发一次"属性变更"信号
pub trait RenderSink: Send + Sync {
    /// 应用一个渲染批次
    ///
    /// # 返回
    /// - `Ok(())`: 应用成功
    /// - `Err`: 应用失败(由会话吸收并记录,不向上传播)
    fn apply(&self, batch: &RenderBatch) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作渲染接收方
///
/// 用于不需要下发渲染的场景(如单元测试)
#[derive(Debug, Clone, Default)]
pub struct NoOpRenderSink;

impl RenderSink for NoOpRenderSink {
    fn apply(&self, batch: &RenderBatch) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            pass_id = %batch.pass_id,
            instructions = batch.instructions.len(),
            "NoOpRenderSink: 跳过渲染下发"
        );
        Ok(())
    }
}

/// 可选的渲染接收方包装
///
/// 简化 Option<Arc<dyn RenderSink>> 的使用
pub struct OptionalRenderSink {
    inner: Option<Arc<dyn RenderSink>>,
}

impl OptionalRenderSink {
    /// 创建带接收方的实例
    pub fn with_sink(sink: Arc<dyn RenderSink>) -> Self {
        Self { inner: Some(sink) }
    }

    /// 创建空实例(不下发渲染)
    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 下发批次(如果有接收方)
    pub fn apply(&self, batch: &RenderBatch) -> Result<(), Box<dyn Error + Send + Sync>> {
        match &self.inner {
            Some(sink) => sink.apply(batch),
            None => {
                tracing::debug!(
                    pass_id = %batch.pass_id,
                    "OptionalRenderSink: 未配置接收方,跳过下发"
                );
                Ok(())
            }
        }
    }

    /// 检查是否配置了接收方
    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for OptionalRenderSink {
    fn default() -> Self {
        Self::none()
    }
}
