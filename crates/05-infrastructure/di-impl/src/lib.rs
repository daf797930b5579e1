//! # 依赖注入具体实现
//!
//! 提供角色注册表、注入点注册表、解析器以及容器门面。
//!
//! 容器在创建时一次性扫描所有声明源，之后注册表只读，可被多个线程共享。
//! 每次 [`Container::build`] 都会创建新的接收者实例，依赖按构造参数顺序注入。

pub mod config;
pub mod container;
pub mod injection_registry;
pub mod report;
pub mod resolver;
pub mod role_registry;

pub use config::*;
pub use container::*;
pub use injection_registry::*;
pub use report::*;
pub use resolver::*;
pub use role_registry::*;
