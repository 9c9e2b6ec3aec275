// ==========================================
// 变体库存指示器 - 数据层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 数据层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 传输错误 =====
    #[error("变体数据请求失败: {0}")]
    FetchFailed(String),

    // ===== 响应错误 =====
    #[error("变体数据响应被拒绝: {0}")]
    RequestRejected(String),

    #[error("变体数据解析失败: {0}")]
    DecodeError(String),

    // ===== 业务错误 =====
    #[error("无效的商品: product_id={0}")]
    InvalidProduct(u64),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::DecodeError(err.to_string())
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
