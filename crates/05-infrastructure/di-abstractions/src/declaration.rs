//! 声明源抽象接口
//!
//! 声明源向容器提供所有提供者声明和注入点声明，容器据此一次性填充注册表。

use crate::descriptor::{InjectionPoint, ProviderDescriptor};

/// 声明源 trait
pub trait DeclarationSource: Send + Sync {
    /// 声明源名称
    fn name(&self) -> &str;

    /// 所有提供者声明，按扫描顺序排列
    fn providers(&self) -> Vec<ProviderDescriptor>;

    /// 所有注入点声明，按扫描顺序排列
    fn injection_points(&self) -> Vec<InjectionPoint>;
}

/// 显式声明集合
///
/// 通过普通函数调用逐个登记声明，顺序即扫描顺序。
#[derive(Debug, Clone)]
pub struct DeclarationSet {
    name: String,
    providers: Vec<ProviderDescriptor>,
    injection_points: Vec<InjectionPoint>,
}

impl DeclarationSet {
    /// 创建新的声明集合
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            providers: Vec::new(),
            injection_points: Vec::new(),
        }
    }

    /// 添加提供者声明
    pub fn with_provider(mut self, provider: ProviderDescriptor) -> Self {
        self.providers.push(provider);
        self
    }

    /// 添加注入点声明
    pub fn with_injection_point(mut self, point: InjectionPoint) -> Self {
        self.injection_points.push(point);
        self
    }

    /// 登记提供者声明
    pub fn add_provider(&mut self, provider: ProviderDescriptor) {
        self.providers.push(provider);
    }

    /// 登记注入点声明
    pub fn add_injection_point(&mut self, point: InjectionPoint) {
        self.injection_points.push(point);
    }

    /// 声明总数
    pub fn len(&self) -> usize {
        self.providers.len() + self.injection_points.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DeclarationSet {
    fn default() -> Self {
        Self::new("default")
    }
}

impl DeclarationSource for DeclarationSet {
    fn name(&self) -> &str {
        &self.name
    }

    fn providers(&self) -> Vec<ProviderDescriptor> {
        self.providers.clone()
    }

    fn injection_points(&self) -> Vec<InjectionPoint> {
        self.injection_points.clone()
    }
}
