//! 注册表填充报告

use di_abstractions::DeclarationError;

/// 注册表填充报告
///
/// 记录一次填充过程中各类声明的数量以及被跳过的声明。
#[derive(Debug, Clone)]
pub struct PopulationReport {
    /// 参与扫描的声明源名称
    pub sources: Vec<String>,
    /// 扫描到的提供者声明数量
    pub providers_declared: usize,
    /// 被后续声明覆盖的提供者数量
    pub providers_overwritten: usize,
    /// 扫描到的注入点声明数量
    pub injection_points_declared: usize,
    /// 生效的配置绑定数量
    pub bindings_applied: usize,
    /// 被跳过的声明
    pub skipped: Vec<DeclarationError>,
    /// 填充完成时间
    pub populated_at: chrono::DateTime<chrono::Utc>,
}

impl PopulationReport {
    /// 创建新的填充报告
    pub fn new(sources: Vec<String>) -> Self {
        Self {
            sources,
            providers_declared: 0,
            providers_overwritten: 0,
            injection_points_declared: 0,
            bindings_applied: 0,
            skipped: Vec::new(),
            populated_at: chrono::Utc::now(),
        }
    }

    /// 是否所有声明都已登记
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
