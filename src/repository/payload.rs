// ==========================================
// 变体库存指示器 - 变体载荷解码
// ==========================================
// 职责: AJAX 响应信封与变体字段映射(原始载荷 → 领域记录)
// 红线: 字段宽容解码 — max_qty 在线上可能是数字/数字串/
//       空串/false/null,非数字形态一律映射为"不跟踪数量"
// ==========================================

use crate::domain::variation::VariationRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

// ==========================================
// AjaxEnvelope - 响应信封
// ==========================================
// 对齐: { "success": bool, "data": [...] } 结构
#[derive(Debug, Deserialize)]
struct AjaxEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Value,
}

// ==========================================
// RawVariationRecord - 解码中间结构体
// ==========================================
// 用途: 载荷管道中间产物(信封拆解 → 字段映射 → 领域记录)
// 生命周期: 仅在解码流程内
#[derive(Debug, Deserialize)]
struct RawVariationRecord {
    #[serde(default)]
    attributes: BTreeMap<String, String>,
    #[serde(default)]
    is_in_stock: bool,
    #[serde(default)]
    is_purchasable: bool,
    #[serde(default)]
    max_qty: Value,
    #[serde(default)]
    backorders_allowed: bool,
    #[serde(default)]
    availability_html: String,
}

impl From<RawVariationRecord> for VariationRecord {
    fn from(raw: RawVariationRecord) -> Self {
        VariationRecord {
            attributes: raw.attributes,
            is_in_stock: raw.is_in_stock,
            is_purchasable: raw.is_purchasable,
            max_quantity: map_quantity(&raw.max_qty),
            backorders_allowed: raw.backorders_allowed,
            availability_markup: raw.availability_html,
        }
    }
}

/// 解码完整 AJAX 响应文本
///
/// # 规则
/// - success=false → RequestRejected(data 携带的错误文本作为原因)
/// - data 不是数组 → DecodeError
pub fn decode_envelope(raw: &str) -> RepositoryResult<Vec<VariationRecord>> {
    let envelope: AjaxEnvelope = serde_json::from_str(raw)?;
    if !envelope.success {
        let reason = envelope
            .data
            .as_str()
            .unwrap_or("success=false")
            .to_string();
        return Err(RepositoryError::RequestRejected(reason));
    }
    decode_records(&envelope.data)
}

/// 解码变体记录数组(信封已拆或页面内联数据)
pub fn decode_records(value: &Value) -> RepositoryResult<Vec<VariationRecord>> {
    let Some(entries) = value.as_array() else {
        return Err(RepositoryError::DecodeError(format!(
            "变体数据应为数组,实际为 {}",
            json_type_name(value)
        )));
    };

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        let raw: RawVariationRecord = serde_json::from_value(entry.clone())?;
        records.push(VariationRecord::from(raw));
    }

    debug!(count = records.len(), "变体载荷解码完成");
    Ok(records)
}

/// max_qty 字段映射
///
/// # 规则
/// - 非负数字 / 非负数字串 → Some(数量)
/// - ""/false/null/负数/其余形态 → None(不跟踪数量)
fn map_quantity(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
