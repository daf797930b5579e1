//! 容器门面
//!
//! 拥有角色注册表和注入点注册表，一次性从声明源填充，之后只读。

use crate::config::{ContainerConfig, CONFIG_FILE};
use crate::injection_registry::InjectionPointRegistry;
use crate::report::PopulationReport;
use crate::resolver::ComponentResolverImpl;
use crate::role_registry::RoleRegistry;
use di_abstractions::{
    ComponentResolver, DeclarationError, DeclarationSource, DependencyResult, GlobalDeclarations,
    Instance, ProviderDescriptor, ResolveOptions,
};
use once_cell::sync::OnceCell;
use std::any::TypeId;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// 全局容器
static GLOBAL_CONTAINER: OnceCell<Container> = OnceCell::new();

/// 依赖注入容器
#[derive(Debug)]
pub struct Container {
    /// 角色注册表
    roles: RoleRegistry,
    /// 注入点注册表
    injection_points: InjectionPointRegistry,
    /// 解析选项
    options: ResolveOptions,
    /// 填充报告
    report: PopulationReport,
}

impl Container {
    /// 创建构建器
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// 获取全局容器
    ///
    /// 首次调用时从全局声明表和 [`CONFIG_FILE`] 填充注册表，并发的首次调用
    /// 只会填充一次。之后每次调用返回同一个容器。
    pub fn get_instance() -> &'static Self {
        GLOBAL_CONTAINER.get_or_init(|| {
            info!("初始化全局容器");
            ContainerBuilder::new()
                .with_source(GlobalDeclarations)
                .with_config(ContainerConfig::load_or_default(CONFIG_FILE))
                .build()
        })
    }

    /// 全局容器是否已初始化
    pub fn is_initialized() -> bool {
        GLOBAL_CONTAINER.get().is_some()
    }

    /// 构建指定类型的新实例
    ///
    /// 类型没有注册注入点时返回 `Ok(None)`；其他失败都作为错误返回。
    pub fn build<T>(&self) -> DependencyResult<Option<T>>
    where
        T: Send + Sync + 'static,
    {
        match self.resolve::<T>() {
            Ok(instance) => Ok(Some(instance)),
            Err(e) if e.is_not_registered() => {
                debug!("类型未注册注入点: {}", std::any::type_name::<T>());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// 构建指定类型的新实例，未注册也作为错误返回
    pub fn resolve<T>(&self) -> DependencyResult<T>
    where
        T: Send + Sync + 'static,
    {
        self.resolver().resolve::<T>()
    }

    /// 按 TypeId 构建类型擦除的实例
    ///
    /// 未注册时错误中的类型名称是 `TypeId` 的调试表示，[`Container::resolve`]
    /// 会换成可读的类型名称。
    pub fn build_instance(&self, type_id: TypeId) -> DependencyResult<Instance> {
        self.resolver().build_instance(type_id)
    }

    /// 是否可以构建指定类型
    pub fn can_build<T: 'static>(&self) -> bool {
        self.injection_points.contains(TypeId::of::<T>())
    }

    /// 获取组件解析器
    pub fn resolver(&self) -> ComponentResolverImpl<'_> {
        ComponentResolverImpl::new(&self.roles, &self.injection_points, self.options)
    }

    /// 角色注册表
    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    /// 注入点注册表
    pub fn injection_points(&self) -> &InjectionPointRegistry {
        &self.injection_points
    }

    /// 解析选项
    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    /// 填充报告
    pub fn report(&self) -> &PopulationReport {
        &self.report
    }
}

/// 容器构建器
pub struct ContainerBuilder {
    sources: Vec<Box<dyn DeclarationSource>>,
    config: ContainerConfig,
}

impl ContainerBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            config: ContainerConfig::default(),
        }
    }

    /// 添加声明源，多个声明源按添加顺序扫描
    pub fn with_source(mut self, source: impl DeclarationSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// 设置容器配置
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 扫描所有声明源并构建容器
    pub fn build(self) -> Container {
        let names: Vec<String> = self.sources.iter().map(|s| s.name().to_string()).collect();
        info!("开始填充容器注册表, 声明源: {:?}", names);

        let mut providers = Vec::new();
        let mut points = Vec::new();
        for source in &self.sources {
            let source_providers = source.providers();
            let source_points = source.injection_points();
            debug!(
                "声明源 {}: {} 个提供者, {} 个注入点",
                source.name(),
                source_providers.len(),
                source_points.len()
            );
            providers.extend(source_providers);
            points.extend(source_points);
        }

        let mut report = PopulationReport::new(names);
        report.providers_declared = providers.len();
        report.injection_points_declared = points.len();

        let mut roles = RoleRegistry::new();
        for provider in &providers {
            if roles.register(provider.clone()).is_some() {
                report.providers_overwritten += 1;
            }
        }
        apply_bindings(&mut roles, &providers, &self.config.bindings, &mut report);

        let (injection_points, rejected) =
            InjectionPointRegistry::scan(self.config.duplicate_injection_points, points);
        for error in rejected {
            warn!("跳过声明: {}", error);
            report.skipped.push(error);
        }

        info!(
            "容器注册表填充完成: {} 个角色, {} 个注入点, 跳过 {} 个声明",
            roles.len(),
            injection_points.len(),
            report.skipped.len()
        );

        Container {
            roles,
            injection_points,
            options: self.config.resolution,
            report,
        }
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 按配置把角色绑定到指定提供者
///
/// 同名提供者有多个声明时取最后一个。角色名称可能匹配多个同名角色，
/// 只有恰好一个角色拥有该提供者时绑定才生效，否则跳过并记录。
fn apply_bindings(
    roles: &mut RoleRegistry,
    providers: &[ProviderDescriptor],
    bindings: &BTreeMap<String, String>,
    report: &mut PopulationReport,
) {
    for (role_name, provider_name) in bindings {
        let candidates = roles.find_roles(role_name);
        if candidates.is_empty() {
            skip_binding(
                report,
                DeclarationError::UnknownRole {
                    name: role_name.clone(),
                },
            );
            continue;
        }

        let matched: Vec<&ProviderDescriptor> = candidates
            .iter()
            .filter_map(|role| {
                providers
                    .iter()
                    .rev()
                    .find(|p| p.role() == *role && p.provider().matches_name(provider_name))
            })
            .collect();

        match matched.as_slice() {
            [provider] => {
                info!("配置绑定: {} -> {}", provider.role(), provider.provider());
                roles.register((*provider).clone());
                report.bindings_applied += 1;
            }
            [] => {
                let role = match candidates.as_slice() {
                    [role] => role.type_name().to_string(),
                    _ => role_name.clone(),
                };
                skip_binding(
                    report,
                    DeclarationError::UnknownProvider {
                        role,
                        provider: provider_name.clone(),
                    },
                );
            }
            _ => {
                let candidates = matched
                    .iter()
                    .map(|provider| provider.role().type_name())
                    .collect::<Vec<_>>()
                    .join(", ");
                skip_binding(
                    report,
                    DeclarationError::AmbiguousRole {
                        name: role_name.clone(),
                        candidates,
                    },
                );
            }
        }
    }
}

fn skip_binding(report: &mut PopulationReport, error: DeclarationError) {
    warn!("跳过配置绑定: {}", error);
    report.skipped.push(error);
}
