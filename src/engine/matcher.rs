// ==========================================
// 变体库存指示器 - 变体匹配引擎
// ==========================================
// 职责: 在变体记录集中为一个完整候选组合找到首个一致记录
// 红线: 无状态、无副作用、不排序、不校验记录集唯一性
// 红线: 待评估属性名显式传参,不读任何环境态
// ==========================================

use crate::domain::variation::{AttributeSelection, VariationRecord};
use tracing::trace;

// ==========================================
// VariationMatcher - 变体匹配引擎
// ==========================================
pub struct VariationMatcher {
    // 无状态引擎,不需要注入依赖
}

impl VariationMatcher {
    pub fn new() -> Self {
        Self {}
    }

    /// 构建候选组合: 前置属性选择 + 最后一个属性的候选值
    ///
    /// # 参数
    /// - prior: 前置属性选择(均为非空值)
    /// - last_attribute: 最后一个属性名(显式传入)
    /// - candidate_value: 该属性的候选取值
    pub fn build_candidate(
        &self,
        prior: &AttributeSelection,
        last_attribute: &str,
        candidate_value: &str,
    ) -> AttributeSelection {
        let mut candidate = prior.clone();
        candidate.insert(last_attribute.to_string(), candidate_value.to_string());
        candidate
    }

    /// 在记录集中查找首个与候选组合一致的变体
    ///
    /// # 规则
    /// 候选中每个非空值属性,记录对应取值须为通配(空串)或完全相等;
    /// 候选中空值属性不构成约束;按给定顺序返回首个命中,零命中返回 None
    ///
    /// # 说明
    /// 记录集不一致时可能多记录命中 — 首个命中即采纳,
    /// 解析器每次只测试一个完整组合,无需唯一性校验
    pub fn find_match<'a>(
        &self,
        candidate: &AttributeSelection,
        records: &'a [VariationRecord],
    ) -> Option<&'a VariationRecord> {
        let matched = records
            .iter()
            .find(|record| Self::record_matches(candidate, record));

        trace!(
            candidate = ?candidate,
            matched = matched.is_some(),
            "变体匹配完成"
        );
        matched
    }

    /// 单条记录与候选组合的一致性判定
    ///
    /// 记录中缺失候选约束的属性键 → 该记录不命中
    /// (候选未引用的记录属性不参与判定)
    fn record_matches(candidate: &AttributeSelection, record: &VariationRecord) -> bool {
        candidate
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .all(|(name, value)| {
                record
                    .attributes
                    .get(name)
                    .map_or(false, |record_value| {
                        record_value.is_empty() || record_value == value
                    })
            })
    }
}

impl Default for VariationMatcher {
    fn default() -> Self {
        Self::new()
    }
}
