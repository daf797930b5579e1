//! 全局声明表
//!
//! `component-macros` 生成的代码在程序启动时把声明登记到这里，
//! 全局容器首次使用时读取一次快照。

use crate::declaration::{DeclarationSet, DeclarationSource};
use crate::descriptor::{InjectionPoint, ProviderDescriptor};
use tracing::debug;

/// 全局声明表
static GLOBAL_DECLARATIONS: once_cell::sync::Lazy<parking_lot::RwLock<DeclarationSet>> =
    once_cell::sync::Lazy::new(|| parking_lot::RwLock::new(DeclarationSet::new("global")));

/// 登记提供者声明到全局声明表
pub fn declare_provider(provider: ProviderDescriptor) {
    debug!("声明提供者: {} -> {}", provider.role(), provider.provider());
    GLOBAL_DECLARATIONS.write().add_provider(provider);
}

/// 登记注入点声明到全局声明表
pub fn declare_injection_point(point: InjectionPoint) {
    debug!(
        "声明注入点: {} ({} 个参数)",
        point.receiver(),
        point.parameters().len()
    );
    GLOBAL_DECLARATIONS.write().add_injection_point(point);
}

/// 全局声明表的只读视图
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalDeclarations;

impl GlobalDeclarations {
    /// 当前登记的声明总数
    pub fn len(&self) -> usize {
        GLOBAL_DECLARATIONS.read().len()
    }

    /// 是否没有任何声明
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DeclarationSource for GlobalDeclarations {
    fn name(&self) -> &str {
        "global"
    }

    fn providers(&self) -> Vec<ProviderDescriptor> {
        GLOBAL_DECLARATIONS.read().providers()
    }

    fn injection_points(&self) -> Vec<InjectionPoint> {
        GLOBAL_DECLARATIONS.read().injection_points()
    }
}
