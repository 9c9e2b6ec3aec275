// ==========================================
// 变体库存指示器 - 变体数据源 Trait
// ==========================================
// 职责: 定义变体记录的异步拉取能力(不包含实现)
// 红线: 会话对一个表单实例至多发起一次在途拉取,
//       成功后结果缓存、页面生命周期内不再拉取
// ==========================================

use crate::domain::variation::VariationRecord;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// VariationSource Trait
// ==========================================
// 用途: 外部拉取能力的接口(AJAX/HTTP/静态数据等)
// 实现者: 宿主适配层;crate 内置 StaticVariationSource 供测试与演示
#[async_trait]
pub trait VariationSource: Send + Sync {
    /// 拉取指定商品的全部变体记录
    ///
    /// # 参数
    /// - product_id: 商品标识
    ///
    /// # 返回
    /// - Ok(records): 变体记录集(给定顺序即匹配顺序)
    /// - Err: 拉取失败(由会话吸收,本轮静默放弃)
    async fn fetch_variations(&self, product_id: u64) -> RepositoryResult<Vec<VariationRecord>>;
}
