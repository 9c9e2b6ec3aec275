// ==========================================
// 变体库存指示器 - 下拉框领域模型
// ==========================================
// 职责: 最后一个属性下拉框的选项模型与渲染指令
// 红线: original_label 初始化时捕获一次,后续轮次只读,
//       绝不从已装饰文本反推基础文本
// 红线: 占位选项恒定位于 0 号位,不参与匹配/分类/排序/禁用
// ==========================================

use crate::domain::types::StockState;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 基础文本与库存文案之间的分隔符
pub const LABEL_SEPARATOR: &str = " - ";

// ==========================================
// OptionRecord - 下拉选项
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    /// 选项值(下拉框内唯一;占位选项为空字符串)
    pub value: String,
    /// 初始化时捕获的基础文本
    pub original_label: String,
    /// 当前库存状态;None 表示中性(未评估或已重置)
    pub current_state: Option<StockState>,
    /// 是否可选
    pub enabled: bool,
    /// 是否为占位选项("请选择"条目)
    pub is_placeholder: bool,
}

impl OptionRecord {
    /// 排序口径的可购买性
    ///
    /// # 规则
    /// 中性状态(None)按可购买处理,避免残留禁用
    pub fn is_available(&self) -> bool {
        self.current_state.map_or(true, |state| state.is_available())
    }
}

// ==========================================
// Dropdown - 最后一个属性下拉框
// ==========================================
// 持有: 选项集合(初始顺序)+ 当前展示顺序
// 初始顺序用于"全部可购买时还原自然顺序"
#[derive(Debug, Clone)]
pub struct Dropdown {
    options: Vec<OptionRecord>,
    current_order: Vec<String>,
}

impl Dropdown {
    /// 从 (值, 文本) 对构建下拉框模型
    ///
    /// # 规则
    /// - 空值条目为占位选项,移至 0 号位(其余顺序不变)
    /// - 基础文本取分隔符之前的部分(表单重绑定时文本可能已带库存后缀)
    pub fn from_options(pairs: &[(String, String)]) -> Self {
        let mut options: Vec<OptionRecord> = pairs
            .iter()
            .map(|(value, label)| OptionRecord {
                value: value.clone(),
                original_label: label
                    .split(LABEL_SEPARATOR)
                    .next()
                    .unwrap_or_default()
                    .to_string(),
                current_state: None,
                enabled: true,
                is_placeholder: value.is_empty(),
            })
            .collect();

        if let Some(pos) = options.iter().position(|option| option.is_placeholder) {
            if pos != 0 {
                let placeholder = options.remove(pos);
                options.insert(0, placeholder);
            }
        }

        let current_order = options.iter().map(|option| option.value.clone()).collect();
        Self {
            options,
            current_order,
        }
    }

    /// 初始顺序的全部选项
    pub fn options(&self) -> &[OptionRecord] {
        &self.options
    }

    /// 按值查找选项
    pub fn option(&self, value: &str) -> Option<&OptionRecord> {
        self.options.iter().find(|option| option.value == value)
    }

    /// 按值查找选项(可变)
    pub fn option_mut(&mut self, value: &str) -> Option<&mut OptionRecord> {
        self.options.iter_mut().find(|option| option.value == value)
    }

    /// 非占位选项的初始顺序值列表
    pub fn original_order(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| !option.is_placeholder)
            .map(|option| option.value.clone())
            .collect()
    }

    /// 当前展示顺序(含占位选项)
    pub fn current_order(&self) -> &[String] {
        &self.current_order
    }

    /// 记录最近一轮输出的展示顺序
    ///
    /// # 参数
    /// - order: 非占位选项的值顺序(占位选项自动补在 0 号位)
    pub fn set_current_order(&mut self, order: Vec<String>) {
        let mut full = Vec::with_capacity(order.len() + 1);
        if let Some(placeholder) = self.options.iter().find(|option| option.is_placeholder) {
            full.push(placeholder.value.clone());
        }
        full.extend(order);
        self.current_order = full;
    }

    /// 按当前展示顺序返回非占位选项
    pub fn ordered_options(&self) -> Vec<&OptionRecord> {
        self.current_order
            .iter()
            .filter_map(|value| self.option(value))
            .filter(|option| !option.is_placeholder)
            .collect()
    }

    /// 非占位且可选的选项值列表
    pub fn enabled_values(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| !option.is_placeholder && option.enabled)
            .map(|option| option.value.clone())
            .collect()
    }

    /// 重置全部非占位选项为中性状态
    ///
    /// # 规则
    /// 文本回到 original_label、恢复可选、状态清为中性;
    /// 展示顺序保持当前值(重置不重排)
    pub fn reset(&mut self) {
        for option in &mut self.options {
            if option.is_placeholder {
                continue;
            }
            option.current_state = None;
            option.enabled = true;
        }
    }

    /// 重置轮次的渲染指令(当前顺序 + 基础文本 + 全部可选)
    pub fn reset_instructions(&self) -> Vec<RenderInstruction> {
        self.current_order
            .iter()
            .enumerate()
            .filter_map(|(position, value)| {
                self.option(value).map(|option| RenderInstruction {
                    value: option.value.clone(),
                    display_label: option.original_label.clone(),
                    enabled: true,
                    target_position: position,
                })
            })
            .collect()
    }
}

// ==========================================
// RenderInstruction - 渲染指令
// ==========================================
// 核心不触碰 DOM;每轮输出指令元组交由宿主适配器应用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderInstruction {
    pub value: String,
    pub display_label: String,
    pub enabled: bool,
    pub target_position: usize,
}

// ==========================================
// RenderBatch - 单轮渲染批次
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderBatch {
    /// 轮次标识(日志关联用)
    pub pass_id: Uuid,
    pub instructions: Vec<RenderInstruction>,
    /// 唯一剩余可选项的自动选中建议(仅在开启缺货禁用且当前无选中时给出)
    pub auto_select: Option<String>,
}

impl RenderBatch {
    pub fn new(instructions: Vec<RenderInstruction>, auto_select: Option<String>) -> Self {
        Self {
            pass_id: Uuid::new_v4(),
            instructions,
            auto_select,
        }
    }

    /// 按值取指令(测试与适配器便捷方法)
    pub fn instruction(&self, value: &str) -> Option<&RenderInstruction> {
        self.instructions
            .iter()
            .find(|instruction| instruction.value == value)
    }
}
