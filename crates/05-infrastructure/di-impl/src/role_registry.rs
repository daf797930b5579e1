//! 角色注册表
//!
//! 角色标识 -> 提供者描述符。同一角色只保留最后登记的提供者。

use di_abstractions::{ProviderDescriptor, RoleId};
use std::collections::HashMap;
use tracing::debug;

/// 角色注册表
#[derive(Debug, Default, Clone)]
pub struct RoleRegistry {
    providers: HashMap<RoleId, ProviderDescriptor>,
}

impl RoleRegistry {
    /// 创建空的角色注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 按扫描顺序登记所有提供者
    pub fn scan(providers: impl IntoIterator<Item = ProviderDescriptor>) -> Self {
        let mut registry = Self::new();
        for provider in providers {
            registry.register(provider);
        }
        registry
    }

    /// 登记提供者，返回被覆盖的旧提供者
    pub fn register(&mut self, provider: ProviderDescriptor) -> Option<ProviderDescriptor> {
        let role = provider.role();
        debug!("注册提供者: {} -> {}", role, provider.provider());

        let previous = self.providers.insert(role, provider);
        if let Some(previous) = &previous {
            debug!("角色 {} 的提供者 {} 被覆盖", role, previous.provider());
        }
        previous
    }

    /// 查找角色的提供者
    pub fn lookup(&self, role: &RoleId) -> Option<&ProviderDescriptor> {
        self.providers.get(role)
    }

    /// 按名称查找已登记的角色，名称匹配多个角色时返回 `None`
    pub fn find_role(&self, name: &str) -> Option<RoleId> {
        match self.find_roles(name).as_slice() {
            [role] => Some(*role),
            _ => None,
        }
    }

    /// 按名称查找所有匹配的角色，按完整类型名称排序
    ///
    /// 不同模块中的同名 trait 会同时匹配简短名称。
    pub fn find_roles(&self, name: &str) -> Vec<RoleId> {
        let mut roles: Vec<RoleId> = self
            .providers
            .keys()
            .copied()
            .filter(|role| role.matches_name(name))
            .collect();
        roles.sort_by_key(|role| role.type_name());
        roles
    }

    /// 所有已登记的角色
    pub fn roles(&self) -> Vec<RoleId> {
        self.providers.keys().copied().collect()
    }

    /// 已登记的角色数量
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
