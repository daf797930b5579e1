//! 组件解析器抽象接口
//!
//! 提供依赖解析和组件实例化的能力

use crate::instance::Instance;
use infrastructure_common::{DependencyError, TypeInfo};
use serde::{Deserialize, Serialize};
use std::any::TypeId;

/// 组件解析器 trait
///
/// 负责解析组件依赖并创建组件实例
pub trait ComponentResolver: Send + Sync {
    /// 构建指定接收者类型的新实例
    ///
    /// 未注册时 `NotRegistered` 只能携带 `TypeId` 的调试表示；
    /// 需要可读类型名称时使用 [`ComponentResolver::resolve`]。
    fn build_instance(&self, type_id: TypeId) -> Result<Instance, DependencyError>;

    /// 检查是否可以构建指定类型
    fn can_build(&self, type_id: TypeId) -> bool;

    /// 构建指定类型的新实例并还原为具体类型
    fn resolve<T>(&self) -> Result<T, DependencyError>
    where
        T: Send + Sync + 'static,
        Self: Sized,
    {
        let instance = self.build_instance(TypeId::of::<T>()).map_err(|error| {
            // 擦除路径只知道 TypeId，这里补上可读的类型名称
            if error.is_not_registered() {
                DependencyError::NotRegistered {
                    type_name: std::any::type_name::<T>().to_string(),
                }
            } else {
                error
            }
        })?;
        instance
            .downcast::<T>()
            .map(|typed| *typed)
            .map_err(|_| DependencyError::TypeMismatch {
                expected: std::any::type_name::<T>().to_string(),
                actual: "<erased instance>".to_string(),
            })
    }
}

/// 解析模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// 单层解析：提供者只通过零参数工厂创建
    #[default]
    Shallow,
    /// 递归解析：提供者自身的注入点也会被解析
    Recursive,
}

/// 解析选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// 解析模式
    pub mode: ResolutionMode,
    /// 最大递归深度，仅在递归模式下生效
    pub max_depth: usize,
}

impl ResolveOptions {
    /// 递归解析选项
    pub fn recursive() -> Self {
        Self {
            mode: ResolutionMode::Recursive,
            ..Self::default()
        }
    }

    /// 设置最大递归深度
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 是否启用递归解析
    pub fn is_recursive(&self) -> bool {
        self.mode == ResolutionMode::Recursive
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            mode: ResolutionMode::Shallow,
            max_depth: 32,
        }
    }
}

/// 解析上下文
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// 当前解析链，用于检测循环依赖
    pub resolution_chain: Vec<TypeInfo>,
    /// 解析选项
    pub options: ResolveOptions,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new(options: ResolveOptions) -> Self {
        Self {
            resolution_chain: Vec::new(),
            options,
        }
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }

    /// 添加类型到解析链
    pub fn push_type(&mut self, type_info: &TypeInfo) -> Result<(), DependencyError> {
        if self.resolution_chain.iter().any(|entry| entry.id == type_info.id) {
            let chain = self
                .resolution_chain
                .iter()
                .map(|entry| entry.name.as_str())
                .chain(std::iter::once(type_info.name.as_str()))
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(DependencyError::CircularDependency {
                dependency_chain: chain,
            });
        }
        if self.options.is_recursive() && self.resolution_chain.len() >= self.options.max_depth {
            return Err(DependencyError::DepthExceeded {
                type_name: type_info.module_path.clone(),
                max_depth: self.options.max_depth,
            });
        }
        self.resolution_chain.push(type_info.clone());
        Ok(())
    }

    /// 从解析链中移除类型
    pub fn pop_type(&mut self) {
        self.resolution_chain.pop();
    }
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self::new(ResolveOptions::default())
    }
}
