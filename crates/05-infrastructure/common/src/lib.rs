//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn DI 容器各层共享的类型元数据和错误定义。
//!
//! ## 核心类型
//!
//! - [`TypeInfo`] - 具体类型的元数据
//! - [`RoleId`] - 抽象角色标识（通常是 trait object 类型）
//! - [`DependencyError`] - 组件构建错误
//! - [`DeclarationError`] - 注册表填充阶段的声明错误
//!
//! ## 设计原则
//!
//! - 基于 `TypeId` 的编译时类型标识，不依赖运行时反射
//! - 所有失败都以显式的 `Result` 返回给调用方

pub mod errors;
pub mod metadata;

pub use errors::*;
pub use metadata::*;
