use clap::Parser;
use seqgen_cli::{Cli, CliApp, Commands, project_info, run_init, setup_logging};
use seqgen_core::error::GenError;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    debug!("{}", project_info::get_version_string());

    // `init` 命令不需要预先加载配置
    if let Commands::Init { force } = cli.command {
        if let Err(e) = run_init(&cli.config, force) {
            error!("❌ 初始化失败: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    let app = match CliApp::new_with_config(&cli.config) {
        Ok(app) => app,
        Err(e) => {
            if let Some(GenError::ConfigNotFound) = e.downcast_ref::<GenError>() {
                error!("❌ 配置文件 '{}' 未找到。", cli.config.display());
                error!("👉 请先运行 'seqgen init' 命令来创建配置文件。");
            } else {
                error!("❌ 应用初始化失败: {:#}", e);
            }
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run(cli.command) {
        error!("❌ 操作失败: {:#}", e);
        std::process::exit(1);
    }
}
