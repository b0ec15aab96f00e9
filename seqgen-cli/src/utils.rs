/// # Seqgen 日志系统使用说明
///
/// 1. **库代码只使用 `tracing` 宏**：`info!()`, `warn!()`, `error!()`, `debug!()`
/// 2. **应用入口控制日志配置**：在 `main.rs` 中调用 `setup_logging()`
/// 3. **用户界面输出与日志分离**：`--dry-run` 的生成结果直接写到标准输出
///
/// ## 日志配置选项
/// - `-v, --verbose`：启用详细日志模式（DEBUG 级别）
/// - `RUST_LOG`：标准的 Rust 日志级别控制
/// - `SEQGEN_LOG_FILE`：日志文件路径，设置后日志输出到文件而非终端
///
/// ```bash
/// # 详细日志输出到终端
/// seqgen -v generate --schema schema.sql
///
/// # 日志输出到文件
/// SEQGEN_LOG_FILE=seqgen.log seqgen generate --schema schema.sql
///
/// # 只看关联推导的调试日志
/// RUST_LOG=seqgen_core::association=debug seqgen inspect --schema schema.sql
/// ```
pub fn setup_logging(verbose: bool) {
    use seqgen_core::constants::logging;
    use tracing_subscriber::{EnvFilter, fmt};

    let default_level = if verbose {
        "debug"
    } else {
        logging::DEFAULT_LOG_LEVEL
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let log_file = std::env::var(logging::LOG_FILE_ENV).ok().map(|path| {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path);
        (path, file)
    });

    match log_file {
        Some((_, Ok(file))) => {
            // 文件输出使用详细格式
            fmt()
                .with_env_filter(env_filter)
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .init();
        }
        other => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_line_number(false)
                .without_time()
                .compact()
                .init();

            if let Some((path, Err(e))) = other {
                tracing::warn!("无法打开日志文件 {}: {}，改为输出到终端", path, e);
            }
        }
    }
}
