//! # Component Macros
//!
//! 这个 crate 提供了用于声明提供者和注入点的过程宏。生成的代码在程序启动时
//! 通过 `ctor` 把声明登记到 `di_abstractions` 的全局声明表，全局容器首次使用时
//! 一次性读取。
//!
//! ## 核心宏
//!
//! - [`provider`] - 声明结构体为某个角色的提供者
//! - [`injectable`] - 声明 impl 块中标记了 `#[inject]` 的构造函数为注入点
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{injectable, provider};
//!
//! pub trait Tax: Send + Sync {
//!     fn add_tax(&self, amount: f64) -> f64;
//! }
//!
//! #[provider(role = dyn Tax)]
//! pub struct BrazilianTax;
//!
//! impl BrazilianTax {
//!     pub fn new() -> Self {
//!         Self
//!     }
//! }
//!
//! pub struct Account {
//!     tax: Box<dyn Tax>,
//! }
//!
//! #[injectable]
//! impl Account {
//!     #[inject]
//!     pub fn new(tax: Box<dyn Tax>) -> Self {
//!         Self { tax }
//!     }
//! }
//! ```
//!
//! 使用这些宏的 crate 需要依赖 `di-abstractions` 和 `ctor`。

use proc_macro::TokenStream;

mod injectable;
mod provider;
mod utils;

/// 提供者声明宏
///
/// # 参数
///
/// - `role = <类型>` - 满足的角色，通常是 `dyn Trait`（必需）
/// - `constructor = ident` - 零参数构造函数（默认为 `new`）
/// - `fallible` - 构造函数返回 `Result<Self, E>`
///
/// # 示例
///
/// ```rust,ignore
/// #[provider(role = dyn Tax, constructor = from_env, fallible)]
/// pub struct RegionalTax {
///     rate: f64,
/// }
/// ```
#[proc_macro_attribute]
pub fn provider(args: TokenStream, input: TokenStream) -> TokenStream {
    match provider::provider_impl(args.into(), input.into()) {
        Ok(expanded) => expanded.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// 注入点声明宏
///
/// 用于固有 impl 块。块中每个标记了 `#[inject]` 的关联函数都被声明为注入点，
/// 参数必须是 `Box<角色类型>`，按参数顺序注入；返回 `Self` 或 `Result<Self, E>`。
///
/// # 示例
///
/// ```rust,ignore
/// #[injectable]
/// impl Account {
///     #[inject]
///     pub fn new(tax: Box<dyn Tax>) -> Self {
///         Self { tax, total: 0.0 }
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn injectable(_args: TokenStream, input: TokenStream) -> TokenStream {
    match injectable::injectable_impl(input.into()) {
        Ok(expanded) => expanded.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
