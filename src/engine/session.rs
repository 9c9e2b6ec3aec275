// ==========================================
// 变体库存指示器 - 会话编排器
// ==========================================
// 用途: 协调 匹配 → 分类 → 文案 → 排序 的单轮解析流程
// ==========================================
// 状态机: Idle → (AwaitingAttributes | Fetching | Resolving) → Done
// 红线: 同一表单实例同时至多一轮解析(协作式互斥标记)
// 红线: 拉取在途期间的信号只合并不排队,解析采用
//       解析时刻的最新选择
// 红线: 所有失败就地吸收,不向终端用户暴露错误
// ==========================================

use crate::config::IndicatorSettings;
use crate::domain::dropdown::{Dropdown, OptionRecord, RenderBatch, RenderInstruction};
use crate::domain::types::SessionPhase;
use crate::domain::variation::{FormSnapshot, VariationRecord};
use crate::engine::classifier::StockClassifier;
use crate::engine::events::{OptionalRenderSink, RenderSink};
use crate::engine::matcher::VariationMatcher;
use crate::engine::orderer::OptionOrderer;
use crate::engine::template::TemplateEngine;
use crate::repository::variation_source::VariationSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// 会话层错误类型
// ==========================================

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("会话状态锁获取失败: {0}")]
    Lock(String),
}

/// Result 类型别名
pub type SessionResult<T> = Result<T, SessionError>;

// ==========================================
// PassOutcome - 单轮处理结果
// ==========================================

/// 一次信号处理的结果
#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    /// 解析进行中,信号被丢弃(再入保护)
    Dropped,
    /// 拉取在途,信号已合并(解析时取最新选择)
    Coalesced,
    /// 记录集已缓存,本次未触发解析
    Cached,
    /// 前置属性未选全,选项已重置为中性
    Reset(RenderBatch),
    /// 完整解析轮产出
    Resolved(RenderBatch),
    /// 拉取失败,本轮静默放弃(后续信号可重试)
    FetchFailed,
}

// ==========================================
// SessionState - 会话可变状态
// ==========================================
struct SessionState {
    phase: SessionPhase,
    dropdown: Dropdown,
    /// 记录集缓存;一经写入,页面生命周期内不变
    records: Option<Vec<VariationRecord>>,
    /// 最近一次信号携带的表单快照
    latest_snapshot: Option<FormSnapshot>,
}

// ==========================================
// ResolvingMarker - 协作式互斥标记
// ==========================================
// 析构时释放,提前返回与 panic 的退出路径均被覆盖
struct ResolvingMarker<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ResolvingMarker<'a> {
    fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }
}

impl Drop for ResolvingMarker<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

// ==========================================
// VariationSession - 会话编排器
// ==========================================
// 每个表单实例一个会话,依赖全部显式注入,无进程级单例
pub struct VariationSession<S>
where
    S: VariationSource,
{
    session_id: Uuid,
    product_id: u64,
    settings: IndicatorSettings,
    source: Arc<S>,
    sink: OptionalRenderSink,
    matcher: VariationMatcher,
    classifier: StockClassifier,
    orderer: OptionOrderer,
    templates: TemplateEngine,
    /// 再入保护标记;非锁 — 单逻辑线程内的协作式互斥
    resolving: AtomicBool,
    state: Mutex<SessionState>,
}

impl<S> VariationSession<S>
where
    S: VariationSource,
{
    /// 创建新的会话实例
    ///
    /// # 参数
    /// - product_id: 商品标识
    /// - settings: 已净化的指示器配置
    /// - dropdown: 最后一个属性下拉框模型(初始化时捕获基础文本)
    /// - source: 变体数据拉取能力
    pub fn new(
        product_id: u64,
        settings: IndicatorSettings,
        dropdown: Dropdown,
        source: Arc<S>,
    ) -> Self {
        let templates = TemplateEngine::new(settings.templates.clone());
        Self {
            session_id: Uuid::new_v4(),
            product_id,
            settings,
            source,
            sink: OptionalRenderSink::none(),
            matcher: VariationMatcher::new(),
            classifier: StockClassifier::new(),
            orderer: OptionOrderer::new(),
            templates,
            resolving: AtomicBool::new(false),
            state: Mutex::new(SessionState {
                phase: SessionPhase::Idle,
                dropdown,
                records: None,
                latest_snapshot: None,
            }),
        }
    }

    /// 注入渲染接收方
    pub fn with_sink(mut self, sink: Arc<dyn RenderSink>) -> Self {
        self.sink = OptionalRenderSink::with_sink(sink);
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// 当前会话阶段
    pub fn phase(&self) -> SessionResult<SessionPhase> {
        Ok(self.lock_state()?.phase)
    }

    /// 记录集是否已缓存
    pub fn has_records(&self) -> SessionResult<bool> {
        Ok(self.lock_state()?.records.is_some())
    }

    /// 选项当前快照(初始顺序)
    pub fn current_options(&self) -> SessionResult<Vec<OptionRecord>> {
        Ok(self.lock_state()?.dropdown.options().to_vec())
    }

    /// 处理"属性变更"信号
    ///
    /// # 流程
    /// 1. 再入保护: Resolving 中的信号丢弃
    /// 2. 记录最新快照;Fetching 中的信号合并
    /// 3. 前置属性未选全 → 重置轮
    /// 4. 记录集未缓存 → 发起至多一次在途拉取
    /// 5. 以解析时刻的最新选择执行解析轮
    #[instrument(skip(self, snapshot), fields(session_id = %self.session_id, product_id = self.product_id))]
    pub async fn selection_changed(&self, snapshot: &FormSnapshot) -> SessionResult<PassOutcome> {
        // ==========================================
        // 步骤1: 再入保护
        // ==========================================
        if self.resolving.load(Ordering::SeqCst) {
            debug!("解析进行中,信号丢弃");
            return Ok(PassOutcome::Dropped);
        }

        // ==========================================
        // 步骤2: 记录最新快照 / 拉取在途合并
        // ==========================================
        {
            let mut state = self.lock_state()?;
            state.latest_snapshot = Some(snapshot.clone());
            if state.phase == SessionPhase::Fetching {
                debug!("拉取在途,信号合并");
                return Ok(PassOutcome::Coalesced);
            }
        }

        // ==========================================
        // 步骤3: 前置属性完整性
        // ==========================================
        if snapshot.prior_selection().is_none() {
            debug!("前置属性未选全,执行重置轮");
            return self.reset_pass();
        }

        // ==========================================
        // 步骤4: 记录集获取
        // ==========================================
        let need_fetch = {
            let mut state = self.lock_state()?;
            if state.records.is_some() {
                false
            } else {
                state.phase = SessionPhase::Fetching;
                true
            }
        };

        if need_fetch {
            info!("发起变体数据拉取");
            match self.source.fetch_variations(self.product_id).await {
                Ok(records) => {
                    let mut state = self.lock_state()?;
                    // 缓存一经写入不再覆盖(内联数据可能先到)
                    if state.records.is_none() {
                        info!(count = records.len(), "变体数据拉取成功,缓存就位");
                        state.records = Some(records);
                    }
                }
                Err(err) => {
                    // 本轮静默放弃,回到 Idle 允许后续信号重试拉取
                    warn!(error = %err, "变体数据拉取失败,本轮放弃");
                    let mut state = self.lock_state()?;
                    state.phase = SessionPhase::Idle;
                    return Ok(PassOutcome::FetchFailed);
                }
            }
        }

        // ==========================================
        // 步骤5: 解析轮(取解析时刻的最新选择)
        // ==========================================
        self.resolve_with_latest()
    }

    /// 处理"变体数据就绪"信号(页面内联数据等场景)
    ///
    /// # 规则
    /// - 缓存为空时写入;已缓存则忽略重复载荷
    /// - 拉取在途时仅缓存,解析交由拉取完成路径
    /// - 存在可解析的最新选择时立即执行一轮解析
    pub fn variations_loaded(&self, records: Vec<VariationRecord>) -> SessionResult<PassOutcome> {
        let resolvable = {
            let mut state = self.lock_state()?;
            if state.records.is_some() {
                debug!("记录集已缓存,忽略重复载荷");
            } else {
                info!(count = records.len(), "内联变体数据就位");
                state.records = Some(records);
            }

            state.phase != SessionPhase::Fetching
                && state
                    .latest_snapshot
                    .as_ref()
                    .map_or(false, |snapshot| snapshot.prior_selection().is_some())
        };

        if resolvable {
            self.resolve_with_latest()
        } else {
            Ok(PassOutcome::Cached)
        }
    }

    // ==========================================
    // 内部流程
    // ==========================================

    fn lock_state(&self) -> SessionResult<MutexGuard<'_, SessionState>> {
        self.state
            .lock()
            .map_err(|err| SessionError::Lock(err.to_string()))
    }

    /// 重置轮: 全部非占位选项回到中性状态
    ///
    /// # 规则
    /// 文本回到基础文本、恢复可选、排序口径视为可购买;
    /// 不触发拉取、不调用匹配引擎、不重排
    fn reset_pass(&self) -> SessionResult<PassOutcome> {
        let batch = {
            let mut state = self.lock_state()?;
            state.phase = SessionPhase::AwaitingAttributes;
            state.dropdown.reset();
            let instructions = state.dropdown.reset_instructions();
            state.phase = SessionPhase::Idle;
            RenderBatch::new(instructions, None)
        };

        debug!(pass_id = %batch.pass_id, "重置轮完成");
        self.deliver(&batch);
        Ok(PassOutcome::Reset(batch))
    }

    /// 解析轮: 逐选项 匹配 → 分类 → 文案,随后排序并产出渲染指令
    fn resolve_with_latest(&self) -> SessionResult<PassOutcome> {
        // 协作式互斥标记;ResolvingMarker 在所有退出路径上释放
        if self.resolving.swap(true, Ordering::SeqCst) {
            debug!("解析进行中,信号丢弃");
            return Ok(PassOutcome::Dropped);
        }
        let _marker = ResolvingMarker::new(&self.resolving);

        let mut state = self.lock_state()?;

        let Some(snapshot) = state.latest_snapshot.clone() else {
            state.phase = SessionPhase::Idle;
            return Ok(PassOutcome::Cached);
        };

        // 拉取期间选择可能已退化为不完整 → 按重置轮处理
        let Some(prior) = snapshot.prior_selection() else {
            drop(state);
            debug!("最新选择已不完整,转重置轮");
            return self.reset_pass();
        };

        if state.records.is_none() {
            state.phase = SessionPhase::Idle;
            warn!("记录集缺失,无法解析");
            return Ok(PassOutcome::FetchFailed);
        }

        state.phase = SessionPhase::Resolving;

        let last_attribute = snapshot
            .last_attribute_name()
            .unwrap_or_default()
            .to_string();
        let current_selection = snapshot.last_attribute_value().to_string();
        let threshold = self.settings.low_stock_threshold;
        let disable_out_of_stock = self.settings.disable_out_of_stock;

        // ==========================================
        // 步骤A: 逐选项 匹配 → 分类
        // ==========================================
        {
            let SessionState {
                dropdown, records, ..
            } = &mut *state;
            let records = records.as_deref().unwrap_or(&[]);

            for value in dropdown.original_order() {
                let candidate = self
                    .matcher
                    .build_candidate(&prior, &last_attribute, &value);
                let matched = self.matcher.find_match(&candidate, records);
                let stock_state = self.classifier.classify(matched, threshold);

                if let Some(option) = dropdown.option_mut(&value) {
                    option.current_state = Some(stock_state);
                    option.enabled = stock_state.is_available() || !disable_out_of_stock;
                }
                debug!(option = value.as_str(), state = %stock_state, "选项解析完成");
            }
        }

        // ==========================================
        // 步骤B: 排序(稳定分档 / 全可购买还原自然顺序)
        // ==========================================
        let order = {
            let ordered = state.dropdown.ordered_options();
            self.orderer.reorder(
                &ordered,
                self.settings.stock_order,
                &state.dropdown.original_order(),
                if current_selection.is_empty() {
                    None
                } else {
                    Some(&current_selection)
                },
            )
        };
        state.dropdown.set_current_order(order);

        // ==========================================
        // 步骤C: 渲染指令(文本始终从基础文本重新拼接)
        // ==========================================
        let mut instructions = Vec::with_capacity(state.dropdown.current_order().len());
        for (position, value) in state.dropdown.current_order().iter().enumerate() {
            let Some(option) = state.dropdown.option(value) else {
                continue;
            };
            let display_label = match (option.is_placeholder, option.current_state) {
                (false, Some(stock_state)) => self
                    .templates
                    .decorate_label(&option.original_label, stock_state),
                _ => option.original_label.clone(),
            };
            instructions.push(RenderInstruction {
                value: option.value.clone(),
                display_label,
                enabled: option.enabled,
                target_position: position,
            });
        }

        // ==========================================
        // 步骤D: 唯一可选项自动选中建议
        // ==========================================
        let auto_select = if disable_out_of_stock && current_selection.is_empty() {
            let enabled = state.dropdown.enabled_values();
            if enabled.len() == 1 {
                enabled.into_iter().next()
            } else {
                None
            }
        } else {
            None
        };

        state.phase = SessionPhase::Done;
        drop(state);

        let batch = RenderBatch::new(instructions, auto_select);
        info!(
            pass_id = %batch.pass_id,
            options = batch.instructions.len(),
            auto_select = batch.auto_select.as_deref().unwrap_or(""),
            "解析轮完成"
        );
        self.deliver(&batch);
        Ok(PassOutcome::Resolved(batch))
    }

    /// 下发渲染批次;下发失败就地吸收
    fn deliver(&self, batch: &RenderBatch) {
        if let Err(err) = self.sink.apply(batch) {
            warn!(pass_id = %batch.pass_id, error = %err, "渲染下发失败");
        }
    }
}
