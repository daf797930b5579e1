//! 账户

use crate::tax::Tax;
use component_macros::injectable;

/// 账户，年度税费由注入的税费角色计算
pub struct Account {
    tax: Box<dyn Tax>,
    total: f64,
}

#[injectable]
impl Account {
    #[inject]
    pub fn new(tax: Box<dyn Tax>) -> Self {
        Self { tax, total: 0.0 }
    }

    pub fn set_total(&mut self, total: f64) {
        self.total = total;
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// 当前总额的年度税费
    pub fn annual_tax(&self) -> f64 {
        self.tax.add_tax(self.total)
    }

    /// 任意金额的税费
    pub fn apply(&self, amount: f64) -> f64 {
        self.tax.add_tax(amount)
    }
}
