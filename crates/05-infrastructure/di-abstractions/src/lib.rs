//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义声明、描述符和依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`ProviderDescriptor`] - 角色提供者描述符
//! - [`InjectionPoint`] - 接收者注入点描述符
//! - [`DeclarationSource`] - 声明源接口
//! - [`ComponentResolver`] - 组件解析器接口

pub mod declaration;
pub mod descriptor;
pub mod global;
pub mod instance;
pub mod resolver;

pub use declaration::*;
pub use descriptor::*;
pub use global::*;
pub use instance::*;
pub use resolver::*;

pub use infrastructure_common::{
    ArgumentError, BoxError, DeclarationError, DependencyError, DependencyResult, RoleId, TypeInfo,
};
