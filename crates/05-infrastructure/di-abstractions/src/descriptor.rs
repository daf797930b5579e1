//! 提供者与注入点描述符
//!
//! 描述符是声明源交给容器的全部信息：角色由谁提供、接收者用哪个构造函数、
//! 构造函数需要哪些角色。

use crate::instance::{role_instance, Arguments, Instance};
use infrastructure_common::{ArgumentError, BoxError, RoleId, TypeInfo};
use std::sync::Arc;

/// 提供者工厂函数类型（零参数）
pub type ProviderFactoryFn = Arc<dyn Fn() -> Result<Instance, BoxError> + Send + Sync>;

/// 提供者转换函数类型：具体类型实例 -> 角色值
pub type ProviderCastFn = Arc<dyn Fn(Instance) -> Result<Instance, BoxError> + Send + Sync>;

/// 接收者构造函数类型
pub type ReceiverFactoryFn = Arc<dyn Fn(Arguments) -> Result<Instance, BoxError> + Send + Sync>;

/// 提供者描述符
#[derive(Clone)]
pub struct ProviderDescriptor {
    /// 满足的角色
    role: RoleId,
    /// 实例化的具体类型
    provider: TypeInfo,
    /// 零参数工厂
    factory: ProviderFactoryFn,
    /// 递归解析时使用的转换函数
    cast: Option<ProviderCastFn>,
}

impl ProviderDescriptor {
    /// 创建提供者描述符
    ///
    /// `R` 是角色类型，`P` 是具体提供者类型，工厂返回装箱后的角色值。
    pub fn new<R, P, F>(factory: F) -> Self
    where
        R: ?Sized + Send + Sync + 'static,
        P: 'static,
        F: Fn() -> Result<Box<R>, BoxError> + Send + Sync + 'static,
    {
        Self {
            role: RoleId::of::<R>(),
            provider: TypeInfo::of::<P>(),
            factory: Arc::new(move || factory().map(role_instance::<R>)),
            cast: None,
        }
    }

    /// 创建支持递归解析的提供者描述符
    ///
    /// 递归模式下，若具体类型 `P` 自身注册了注入点，容器会先构建 `P`，
    /// 再通过 `cast` 转换为角色值。
    pub fn with_cast<R, P, F, C>(factory: F, cast: C) -> Self
    where
        R: ?Sized + Send + Sync + 'static,
        P: Send + Sync + 'static,
        F: Fn() -> Result<Box<R>, BoxError> + Send + Sync + 'static,
        C: Fn(P) -> Box<R> + Send + Sync + 'static,
    {
        let mut descriptor = Self::new::<R, P, F>(factory);
        descriptor.cast = Some(Arc::new(move |instance: Instance| -> Result<Instance, BoxError> {
            let concrete = instance.downcast::<P>().map_err(|_| ArgumentError::TypeMismatch {
                position: 0,
                expected: std::any::type_name::<P>().to_string(),
                actual: "<unknown>".to_string(),
            })?;
            Ok(role_instance::<R>(cast(*concrete)))
        }));
        descriptor
    }

    /// 满足的角色
    pub fn role(&self) -> RoleId {
        self.role
    }

    /// 具体提供者类型
    pub fn provider(&self) -> &TypeInfo {
        &self.provider
    }

    /// 是否可以参与递归解析
    pub fn supports_cast(&self) -> bool {
        self.cast.is_some()
    }

    /// 调用零参数工厂
    pub fn instantiate(&self) -> Result<Instance, BoxError> {
        (self.factory)()
    }

    /// 把已构建的具体实例转换为角色值
    pub fn cast(&self, concrete: Instance) -> Option<Result<Instance, BoxError>> {
        self.cast.as_ref().map(|cast| cast(concrete))
    }
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("role", &self.role.type_name())
            .field("provider", &self.provider.module_path)
            .field("factory", &"<function>")
            .field("cast", &self.cast.is_some())
            .finish()
    }
}

/// 注入点描述符
#[derive(Clone)]
pub struct InjectionPoint {
    /// 接收者类型
    receiver: TypeInfo,
    /// 有序的参数角色列表
    parameters: Vec<RoleId>,
    /// 构造函数
    factory: ReceiverFactoryFn,
}

impl InjectionPoint {
    /// 创建注入点描述符
    pub fn new<T, F>(parameters: Vec<RoleId>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(Arguments) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        Self {
            receiver: TypeInfo::of::<T>(),
            parameters,
            factory: Arc::new(move |arguments: Arguments| {
                factory(arguments).map(|receiver| Box::new(receiver) as Instance)
            }),
        }
    }

    /// 接收者类型
    pub fn receiver(&self) -> &TypeInfo {
        &self.receiver
    }

    /// 参数角色列表
    pub fn parameters(&self) -> &[RoleId] {
        &self.parameters
    }

    /// 调用构造函数
    pub fn construct(&self, arguments: Arguments) -> Result<Instance, BoxError> {
        (self.factory)(arguments)
    }
}

impl std::fmt::Debug for InjectionPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectionPoint")
            .field("receiver", &self.receiver.module_path)
            .field(
                "parameters",
                &self.parameters.iter().map(RoleId::type_name).collect::<Vec<_>>(),
            )
            .field("factory", &"<function>")
            .finish()
    }
}
