//! 组件实例与构造参数

use infrastructure_common::{ArgumentError, RoleId};
use std::any::Any;

/// 类型擦除后的组件实例
///
/// 角色值以 `Box<R>` 的形式存放，例如 `Box<dyn Tax>`。
pub type Instance = Box<dyn Any + Send + Sync>;

/// 单个参数槽位
struct ArgumentSlot {
    role: RoleId,
    value: Option<Instance>,
}

/// 接收者构造函数的位置参数列表
///
/// 参数顺序与注入点声明的参数顺序一致，每个位置只能取一次。
#[derive(Default)]
pub struct Arguments {
    slots: Vec<ArgumentSlot>,
}

impl Arguments {
    /// 创建空参数列表
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建指定容量的参数列表
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// 追加一个已解析的角色值
    pub fn push(&mut self, role: RoleId, value: Instance) {
        self.slots.push(ArgumentSlot {
            role,
            value: Some(value),
        });
    }

    /// 参数个数
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// 是否没有参数
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 指定位置参数的角色
    pub fn role(&self, position: usize) -> Option<RoleId> {
        self.slots.get(position).map(|slot| slot.role)
    }

    /// 取出指定位置的角色值
    pub fn take<R>(&mut self, position: usize) -> Result<Box<R>, ArgumentError>
    where
        R: ?Sized + Send + Sync + 'static,
    {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(position)
            .ok_or(ArgumentError::OutOfRange { position, len })?;

        let value = slot.value.take().ok_or(ArgumentError::Missing { position })?;
        match value.downcast::<Box<R>>() {
            Ok(typed) => Ok(*typed),
            Err(original) => {
                // 类型不匹配时放回原值，调用方可以换一种类型再取
                slot.value = Some(original);
                Err(ArgumentError::TypeMismatch {
                    position,
                    expected: std::any::type_name::<R>().to_string(),
                    actual: slot.role.type_name().to_string(),
                })
            }
        }
    }
}

impl std::fmt::Debug for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.slots.iter().map(|slot| {
                (slot.role.type_name(), slot.value.is_some())
            }))
            .finish()
    }
}

/// 把角色值包装为实例
pub fn role_instance<R>(value: Box<R>) -> Instance
where
    R: ?Sized + Send + Sync + 'static,
{
    Box::new(value)
}
