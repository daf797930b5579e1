//! 元数据定义
//!
//! 提供具体类型和抽象角色的标识信息

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型名称（不含模块路径）
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径
    pub module_path: String,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        let full_name = std::any::type_name::<T>();
        Self {
            name: short_type_name(full_name).to_string(),
            id: TypeId::of::<T>(),
            module_path: full_name.to_string(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        &self.name
    }

    /// 按简短名称或完整路径匹配
    pub fn matches_name(&self, name: &str) -> bool {
        self.name == name || self.module_path == name
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.module_path)
    }
}

/// 角色标识
///
/// 标识一个抽象能力，通常是 trait object 类型（例如 `dyn Tax`）。
/// 相等性和哈希只取决于 `TypeId`，名称仅用于诊断和按名查找。
#[derive(Debug, Clone, Copy)]
pub struct RoleId {
    id: TypeId,
    type_name: &'static str,
}

impl RoleId {
    /// 从角色类型获取标识
    pub fn of<R: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<R>(),
            type_name: std::any::type_name::<R>(),
        }
    }

    /// 角色的类型ID
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// 完整类型名称，例如 `dyn account_tax::Tax`
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 简短名称，例如 `Tax`
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.type_name)
    }

    /// 按简短名称或完整名称匹配
    ///
    /// 完整名称允许省略 `dyn ` 前缀。
    pub fn matches_name(&self, name: &str) -> bool {
        self.short_name() == name
            || self.type_name == name
            || self.type_name.strip_prefix("dyn ") == Some(name)
    }
}

impl PartialEq for RoleId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RoleId {}

impl Hash for RoleId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// 去掉模块路径，保留最后一段名称
///
/// 泛型参数内部的路径不参与切分，`Vec<a::B>` 的结果是 `Vec<a::B>`。
fn short_type_name(full_name: &str) -> &str {
    let head_end = full_name.find('<').unwrap_or(full_name.len());
    match full_name[..head_end].rfind("::") {
        Some(index) => &full_name[index + 2..],
        None => full_name.strip_prefix("dyn ").unwrap_or(full_name),
    }
}
