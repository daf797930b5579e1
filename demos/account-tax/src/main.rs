//! # 账户税费示例
//!
//! 通过宏声明提供者和注入点，从全局容器构建账户并计算税费。

mod account;
mod tax;

use account::Account;
use anyhow::{Context, Result};
use clap::Parser;
use di_impl::Container;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "account-tax")]
#[command(about = "Lorn DI 账户税费示例")]
struct Args {
    /// 账户总额
    #[arg(short, long, default_value_t = 100.0)]
    total: f64,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("启动账户税费示例");

    let container = Container::get_instance();
    let report = container.report();
    info!(
        "容器就绪: {} 个角色, {} 个注入点, 填充于 {}",
        container.roles().len(),
        container.injection_points().len(),
        report.populated_at
    );
    for skipped in &report.skipped {
        warn!("被跳过的声明: {}", skipped);
    }

    let mut account = container
        .build::<Account>()?
        .context("Account 没有注册注入构造函数")?;
    account.set_total(args.total);

    println!(
        "总额 {:.2} 的年度税费: {:.2}",
        account.total(),
        account.annual_tax()
    );
    Ok(())
}
