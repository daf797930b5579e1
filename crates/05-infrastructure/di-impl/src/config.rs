//! 容器配置
//!
//! 可选的 JSON 配置文件，默认值与单层、后注册优先的行为完全一致。

use crate::injection_registry::DuplicatePolicy;
use di_abstractions::ResolveOptions;
use infrastructure_common::ConfigResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// 默认配置文件路径
pub const CONFIG_FILE: &str = "dicontainer.config";

/// 容器配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 角色名称 -> 提供者类型名称
    pub bindings: BTreeMap<String, String>,
    /// 解析选项
    pub resolution: ResolveOptions,
    /// 重复注入点处理策略
    pub duplicate_injection_points: DuplicatePolicy,
}

impl ContainerConfig {
    /// 从 JSON 文件加载配置
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!("加载容器配置文件: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 尽力加载配置文件
    ///
    /// 文件不存在时静默使用默认配置；读取或解析失败时记录警告并使用默认配置。
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!("容器配置文件不存在, 使用默认配置: {}", path.display());
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|e| {
            warn!("容器配置文件加载失败, 使用默认配置: {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// 绑定角色到指定提供者
    pub fn with_binding(mut self, role: impl Into<String>, provider: impl Into<String>) -> Self {
        self.bindings.insert(role.into(), provider.into());
        self
    }

    /// 设置解析选项
    pub fn with_resolution(mut self, resolution: ResolveOptions) -> Self {
        self.resolution = resolution;
        self
    }

    /// 设置重复注入点处理策略
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_injection_points = policy;
        self
    }
}
