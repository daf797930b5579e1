//! 错误类型定义

use thiserror::Error;

/// 构造函数失败时使用的错误类型
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        #[from]
        source: serde_json::Error,
    },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册注入点: {type_name}")]
    NotRegistered { type_name: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ConstructionFailed { type_name: String, source: BoxError },

    #[error("依赖解析失败: {receiver} 的第 {position} 个参数 {role} 没有注册提供者")]
    UnresolvedParameter {
        receiver: String,
        role: String,
        position: usize,
    },

    #[error("循环依赖检测到: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("解析深度超过上限 {max_depth}: {type_name}")]
    DepthExceeded { type_name: String, max_depth: usize },

    #[error("类型转换失败: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl DependencyError {
    /// 创建组件创建失败错误
    pub fn construction_failed(type_name: impl Into<String>, source: BoxError) -> Self {
        Self::ConstructionFailed {
            type_name: type_name.into(),
            source,
        }
    }

    /// 是否为“未注册注入点”
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Self::NotRegistered { .. })
    }

    /// 是否属于构建失败
    ///
    /// 缺少提供者的参数按构建失败处理，不会产生参数个数错乱的实例。
    pub fn is_construction_failure(&self) -> bool {
        matches!(
            self,
            Self::ConstructionFailed { .. } | Self::UnresolvedParameter { .. }
        )
    }
}

/// 构造参数错误类型
///
/// 在接收者构造函数内部提取参数时产生，可以通过 `?` 转换为 [`BoxError`]。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("参数位置超出范围: {position}, 参数个数: {len}")]
    OutOfRange { position: usize, len: usize },

    #[error("参数已被取走或未提供: 位置 {position}")]
    Missing { position: usize },

    #[error("参数类型不匹配: 位置 {position}, 期望 {expected}, 实际 {actual}")]
    TypeMismatch {
        position: usize,
        expected: String,
        actual: String,
    },
}

/// 声明错误类型
///
/// 注册表填充阶段发现的问题。出错的声明会被记录并跳过，其余声明继续注册。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("未知的角色: {name}")]
    UnknownRole { name: String },

    #[error("角色 {role} 没有名为 {provider} 的提供者")]
    UnknownProvider { role: String, provider: String },

    #[error("角色名称 {name} 匹配多个角色: {candidates}")]
    AmbiguousRole { name: String, candidates: String },

    #[error("接收者 {type_name} 声明了多个注入构造函数")]
    DuplicateInjectionPoint { type_name: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
