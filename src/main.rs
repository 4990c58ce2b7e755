use clap::Parser;

use bmp_frames::{cli::Cli, handler::handle_generate};

/// 程序的主入口点
///
/// 初始化日志，解析命令行参数，并将执行交给帧生成处理函数
fn main() -> anyhow::Result<()> {
    // 日志级别由 RUST_LOG 控制，默认只显示警告
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    handle_generate(cli.args)
}
