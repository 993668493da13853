//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{
    CacheError, ReaderError, RelayError, RepositoryError, TranslationError,
};
use crate::domain::passage::PassageError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 状态无效
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建状态无效错误
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// 创建外部服务错误
    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalServiceError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::NotFound {
                resource_type: "Record",
                id,
            },
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

impl From<PassageError> for ApplicationError {
    fn from(err: PassageError) -> Self {
        match err {
            PassageError::NotFound(id) => Self::NotFound {
                resource_type: "Passage",
                id,
            },
            PassageError::Malformed(msg) => Self::RepositoryError(msg),
            other => Self::ValidationError(other.to_string()),
        }
    }
}

impl From<ReaderError> for ApplicationError {
    fn from(err: ReaderError) -> Self {
        match err {
            ReaderError::NotFound(id) => Self::NotFound {
                resource_type: "Reader",
                id,
            },
            ReaderError::AlreadyExists(id) => {
                Self::InvalidState(format!("Reader already exists: {}", id))
            }
        }
    }
}

impl From<TranslationError> for ApplicationError {
    fn from(err: TranslationError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<RelayError> for ApplicationError {
    fn from(err: RelayError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<CacheError> for ApplicationError {
    fn from(err: CacheError) -> Self {
        Self::StorageError(err.to_string())
    }
}
