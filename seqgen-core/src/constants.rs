/// 配置文件相关常量
pub mod config {
    use std::path::{Path, PathBuf};

    /// 默认配置文件名
    pub const CONFIG_FILE_NAME: &str = "seqgen.toml";

    /// 按优先级查找的配置文件名
    pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["seqgen.toml", ".seqgen.toml"];

    /// 默认输出目录名
    pub const OUTPUT_DIR_NAME: &str = "models";

    /// 获取默认输出目录（跨平台）
    pub fn get_default_output_dir() -> PathBuf {
        Path::new(".").join(OUTPUT_DIR_NAME)
    }
}

/// 代码生成相关常量
pub mod generator {
    /// 生成文件的默认扩展名
    pub const DEFAULT_FILE_EXTENSION: &str = "js";

    /// 生成代码引用的默认包名
    pub const DEFAULT_PACKAGE_NAME: &str = "sequelize";

    /// 默认缩进宽度
    pub const DEFAULT_INDENTATION: usize = 4;

    /// 关联别名中连接模型名与外键列名的片段
    pub const RELATED_BY: &str = "_related_by_";

    /// 与模型同名列冲突时使用的反向别名后缀
    pub const FK_SUFFIX: &str = "_fk";

    /// 自引用外键在 "一" 端的别名前缀
    pub const CHILD_PREFIX: &str = "child_";

    /// 未知类型的兜底类型
    pub const FALLBACK_TYPE: &str = "STRING";
}

/// 日志相关常量
pub mod logging {
    /// 默认日志级别
    pub const DEFAULT_LOG_LEVEL: &str = "info";

    /// 指定日志文件的环境变量
    pub const LOG_FILE_ENV: &str = "SEQGEN_LOG_FILE";
}

/// 技术版本信息常量
pub mod version {
    /// 版本信息（仅技术版本，项目信息在 seqgen-cli 中定义）
    pub mod version_info {
        /// 核心库版本（自动同步）
        pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

        /// 配置格式版本
        pub const CONFIG_FORMAT_VERSION: &str = "1.0";
    }
}
