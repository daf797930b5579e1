//! 组件解析器实现
//!
//! 查找接收者的注入点，按参数顺序解析角色，实例化提供者并调用构造函数。

use crate::injection_registry::InjectionPointRegistry;
use crate::role_registry::RoleRegistry;
use di_abstractions::{
    Arguments, ComponentResolver, DependencyError, InjectionPoint, Instance, ProviderDescriptor,
    ResolveContext, ResolveOptions,
};
use std::any::TypeId;
use tracing::debug;

/// 组件解析器实现
///
/// 默认单层解析：提供者只通过零参数工厂创建，不会查询注入点注册表。
/// 递归模式需要通过 [`ResolveOptions`] 显式开启。
#[derive(Debug, Clone, Copy)]
pub struct ComponentResolverImpl<'a> {
    roles: &'a RoleRegistry,
    injection_points: &'a InjectionPointRegistry,
    options: ResolveOptions,
}

impl<'a> ComponentResolverImpl<'a> {
    /// 创建新的组件解析器
    pub fn new(
        roles: &'a RoleRegistry,
        injection_points: &'a InjectionPointRegistry,
        options: ResolveOptions,
    ) -> Self {
        Self {
            roles,
            injection_points,
            options,
        }
    }

    /// 解析选项
    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    fn build_in(
        &self,
        type_id: TypeId,
        context: &mut ResolveContext,
    ) -> Result<Instance, DependencyError> {
        let point = self
            .injection_points
            .lookup(type_id)
            // 擦除路径只有 TypeId，类型名称由 resolve::<T>() 补上
            .ok_or_else(|| DependencyError::NotRegistered {
                type_name: format!("{type_id:?}"),
            })?;

        context.push_type(point.receiver())?;
        let result = self.construct_receiver(point, context);
        context.pop_type();
        result
    }

    fn construct_receiver(
        &self,
        point: &InjectionPoint,
        context: &mut ResolveContext,
    ) -> Result<Instance, DependencyError> {
        let receiver = point.receiver();
        debug!("构建组件: {} (深度 {})", receiver, context.depth());

        let mut arguments = Arguments::with_capacity(point.parameters().len());
        for (position, role) in point.parameters().iter().enumerate() {
            let provider =
                self.roles
                    .lookup(role)
                    .ok_or_else(|| DependencyError::UnresolvedParameter {
                        receiver: receiver.module_path.clone(),
                        role: role.type_name().to_string(),
                        position,
                    })?;
            let value = self.instantiate_provider(provider, context)?;
            arguments.push(*role, value);
        }

        if arguments.is_empty() {
            debug!("组件 {} 使用无参注入构造函数", receiver);
        }

        point
            .construct(arguments)
            .map_err(|source| DependencyError::construction_failed(receiver.module_path.clone(), source))
    }

    fn instantiate_provider(
        &self,
        provider: &ProviderDescriptor,
        context: &mut ResolveContext,
    ) -> Result<Instance, DependencyError> {
        let concrete = provider.provider();

        if context.options.is_recursive()
            && provider.supports_cast()
            && self.injection_points.contains(concrete.id)
        {
            debug!("递归构建提供者: {} -> {}", provider.role(), concrete);
            let instance = self.build_in(concrete.id, context)?;
            if let Some(cast) = provider.cast(instance) {
                return cast.map_err(|source| {
                    DependencyError::construction_failed(concrete.module_path.clone(), source)
                });
            }
        }

        provider
            .instantiate()
            .map_err(|source| DependencyError::construction_failed(concrete.module_path.clone(), source))
    }
}

impl ComponentResolver for ComponentResolverImpl<'_> {
    fn build_instance(&self, type_id: TypeId) -> Result<Instance, DependencyError> {
        let mut context = ResolveContext::new(self.options);
        self.build_in(type_id, &mut context)
    }

    fn can_build(&self, type_id: TypeId) -> bool {
        self.injection_points.contains(type_id)
    }
}
