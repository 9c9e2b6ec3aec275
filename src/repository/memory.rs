// ==========================================
// 变体库存指示器 - 内存变体数据源
// ==========================================
// 职责: 以静态记录集实现 VariationSource(测试与演示用)
// ==========================================

use crate::domain::variation::VariationRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::variation_source::VariationSource;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

// ==========================================
// StaticVariationSource - 静态数据源
// ==========================================
pub struct StaticVariationSource {
    product_id: u64,
    records: Vec<VariationRecord>,
    fetch_count: AtomicUsize,
}

impl StaticVariationSource {
    /// # 参数
    /// - product_id: 数据集所属商品;其他商品的拉取按无效商品拒绝
    /// - records: 变体记录集(给定顺序即匹配顺序)
    pub fn new(product_id: u64, records: Vec<VariationRecord>) -> Self {
        Self {
            product_id,
            records,
            fetch_count: AtomicUsize::new(0),
        }
    }

    /// 已发生的拉取次数(拉取至多一次的断言用)
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VariationSource for StaticVariationSource {
    async fn fetch_variations(&self, product_id: u64) -> RepositoryResult<Vec<VariationRecord>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if product_id != self.product_id {
            return Err(RepositoryError::InvalidProduct(product_id));
        }
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record() -> VariationRecord {
        VariationRecord {
            attributes: BTreeMap::new(),
            is_in_stock: true,
            is_purchasable: true,
            max_quantity: Some(2),
            backorders_allowed: false,
            availability_markup: String::new(),
        }
    }

    #[tokio::test]
    async fn test_static_source_returns_records() {
        let source = StaticVariationSource::new(42, vec![record()]);
        let records = source.fetch_variations(42).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_static_source_rejects_unknown_product() {
        let source = StaticVariationSource::new(42, vec![record()]);
        let err = source.fetch_variations(7).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidProduct(7)));
    }
}
