//! 驱动配置

use notate_eval::Associativity;
use std::path::PathBuf;

/// 转移表来源
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TableSource {
    /// 启动时由文法生成
    #[default]
    Generated,
    /// 从 CSV 文件加载
    Path(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub table: TableSource,
    /// `^` 的结合性
    pub power_associativity: Associativity,
    /// 关闭后跳过文法校验，只做词法分析（`^` 只有这样才能使用）
    pub validate: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            table: TableSource::Generated,
            power_associativity: Associativity::Left,
            validate: true,
        }
    }
}
