//! 税费角色与提供者

use component_macros::provider;

/// 税费计算
pub trait Tax: Send + Sync {
    /// 返回金额对应的税费
    fn add_tax(&self, amount: f64) -> f64;
}

/// 巴西税率，统一按 55% 计算
#[provider(role = dyn Tax)]
#[derive(Debug, Default)]
pub struct BrazilianTax;

impl BrazilianTax {
    const RATE: f64 = 0.55;

    pub fn new() -> Self {
        Self
    }
}

impl Tax for BrazilianTax {
    fn add_tax(&self, amount: f64) -> f64 {
        amount * Self::RATE
    }
}
