//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{RepositoryError, SearchError};
use crate::domain::RoyaltyError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: i64,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 资源冲突（重复）
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 仓储错误（原样保留）
    #[error(transparent)]
    Repository(RepositoryError),

    /// 外部检索服务错误（原样保留）
    #[error(transparent)]
    ExternalService(#[from] SearchError),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: i64) -> Self {
        Self::NotFound { resource_type, id }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(msg) => Self::Conflict(msg),
            other => Self::Repository(other),
        }
    }
}

impl From<RoyaltyError> for ApplicationError {
    fn from(err: RoyaltyError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_repository_error_kept_as_source() {
        let err = ApplicationError::from(RepositoryError::DatabaseError("disk I/O error".into()));

        assert!(matches!(
            &err,
            ApplicationError::Repository(RepositoryError::DatabaseError(msg)) if msg == "disk I/O error"
        ));
        assert_eq!(err.to_string(), "Database error: disk I/O error");
    }

    #[test]
    fn test_duplicate_becomes_conflict() {
        let err = ApplicationError::from(RepositoryError::Duplicate("isbn 123".into()));
        assert!(matches!(err, ApplicationError::Conflict(msg) if msg == "isbn 123"));
    }

    #[test]
    fn test_search_error_kept_as_source() {
        let err = ApplicationError::from(SearchError::Timeout);

        assert!(matches!(err, ApplicationError::ExternalService(SearchError::Timeout)));
        assert_eq!(err.to_string(), "Request timeout");
        assert!(err.source().is_none());
    }
}
