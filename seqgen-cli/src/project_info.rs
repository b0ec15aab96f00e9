/// Seqgen CLI 项目信息模块
///
/// seqgen-cli 是面向用户的主程序，项目元数据统一在这里定义；
/// seqgen-core 作为内部库，只提供技术性常量

/// 项目元数据（自动从 seqgen-cli 的 Cargo.toml 同步）
pub mod metadata {
    /// 项目名称（自动从 Cargo.toml 同步）
    pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");

    /// 项目描述（自动从 Cargo.toml 同步）
    pub const PROJECT_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

    /// 项目作者（自动从 Cargo.toml 同步）
    pub const PROJECT_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

    /// 项目许可证（自动从 Cargo.toml 同步）
    pub const PROJECT_LICENSE: &str = env!("CARGO_PKG_LICENSE");

    /// 用户友好的显示名称（手动维护）
    pub mod display {
        pub const FRIENDLY_NAME: &str = "Seqgen";

        pub const CLI_FULL_NAME: &str = "Seqgen CLI";

        pub const DESCRIPTION_LONG: &str = "读取 MySQL 的 CREATE TABLE 语句，推导表之间的一对多、一对一和多对多关系，为 Sequelize v5 / v6 / v7 生成模型定义文件";
    }
}

/// 版本信息
pub mod version_info {
    /// CLI 版本（自动从 Cargo.toml 同步）
    pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

    /// 核心库版本（从 seqgen-core 获取）
    pub const CORE_VERSION: &str = seqgen_core::constants::version::version_info::CORE_VERSION;

    /// 配置格式版本（从 seqgen-core 获取）
    pub const CONFIG_FORMAT_VERSION: &str =
        seqgen_core::constants::version::version_info::CONFIG_FORMAT_VERSION;
}

/// 获取版本信息字符串
pub fn get_version_string() -> String {
    format!(
        "{} v{} (core v{}, 配置格式 {})",
        metadata::display::FRIENDLY_NAME,
        version_info::CLI_VERSION,
        version_info::CORE_VERSION,
        version_info::CONFIG_FORMAT_VERSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string() {
        let version = get_version_string();
        assert!(version.starts_with("Seqgen v"));
        assert!(version.contains(version_info::CORE_VERSION));
        assert_eq!(metadata::PROJECT_NAME, "seqgen-cli");
    }
}
