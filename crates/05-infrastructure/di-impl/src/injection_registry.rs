//! 注入点注册表
//!
//! 接收者类型 -> 注入点描述符，每个接收者最多一个注入点。

use di_abstractions::{DeclarationError, InjectionPoint};
use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::collections::HashMap;
use tracing::debug;

/// 同一接收者声明多个注入构造函数时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// 最后扫描到的注入点生效
    #[default]
    LastWins,
    /// 保留第一个注入点，之后的重复声明作为错误报告
    Reject,
}

/// 注入点注册表
#[derive(Debug, Default, Clone)]
pub struct InjectionPointRegistry {
    points: HashMap<TypeId, InjectionPoint>,
    policy: DuplicatePolicy,
}

impl InjectionPointRegistry {
    /// 创建空的注入点注册表
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            points: HashMap::new(),
            policy,
        }
    }

    /// 按扫描顺序登记所有注入点，返回被拒绝的声明
    pub fn scan(
        policy: DuplicatePolicy,
        points: impl IntoIterator<Item = InjectionPoint>,
    ) -> (Self, Vec<DeclarationError>) {
        let mut registry = Self::new(policy);
        let rejected = points
            .into_iter()
            .filter_map(|point| registry.register(point).err())
            .collect();
        (registry, rejected)
    }

    /// 登记注入点
    ///
    /// `LastWins` 策略下返回被覆盖的旧注入点；`Reject` 策略下重复声明返回错误，
    /// 已有的注入点保持不变。
    pub fn register(
        &mut self,
        point: InjectionPoint,
    ) -> Result<Option<InjectionPoint>, DeclarationError> {
        let type_id = point.receiver().id;
        if self.policy == DuplicatePolicy::Reject && self.points.contains_key(&type_id) {
            return Err(DeclarationError::DuplicateInjectionPoint {
                type_name: point.receiver().module_path.clone(),
            });
        }

        debug!(
            "注册注入点: {} ({} 个参数)",
            point.receiver(),
            point.parameters().len()
        );
        Ok(self.points.insert(type_id, point))
    }

    /// 查找接收者的注入点
    pub fn lookup(&self, type_id: TypeId) -> Option<&InjectionPoint> {
        self.points.get(&type_id)
    }

    /// 按类型查找接收者的注入点
    pub fn lookup_type<T: 'static>(&self) -> Option<&InjectionPoint> {
        self.lookup(TypeId::of::<T>())
    }

    /// 是否登记了指定接收者
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.points.contains_key(&type_id)
    }

    /// 重复声明策略
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// 已登记的接收者数量
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
