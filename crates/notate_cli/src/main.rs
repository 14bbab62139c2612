use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use notate_diagnostics::Emitter;
use notate_driver::{DriverConfig, ExprError, Session, TableSource};
use notate_eval::Associativity;
use notate_syntax::TransitionTable;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "notate")]
#[command(about = "中缀表达式校验、转换（后缀/前缀）与求值", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 从 CSV 文件加载转移表（默认由文法生成）
    #[arg(long, global = true, value_name = "FILE")]
    table: Option<PathBuf>,

    /// `^` 使用右结合
    #[arg(long, global = true)]
    right_assoc_power: bool,

    /// 跳过文法校验（允许 `^`）
    #[arg(long, global = true)]
    no_validate: bool,

    /// 关闭彩色输出
    #[arg(long, global = true)]
    no_color: bool,

    /// 日志详细程度（-v info, -vv debug, -vvv trace）
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// 输出后缀与前缀形式
    Convert {
        /// 中缀表达式（省略时从标准输入读取一行）
        expr: Option<String>,
    },

    /// 求值
    Eval {
        /// 中缀表达式（省略时从标准输入读取一行）
        expr: Option<String>,
    },

    /// 只做文法校验
    Check {
        /// 中缀表达式（省略时从标准输入读取一行）
        expr: Option<String>,
    },

    /// 输出由文法生成的转移表（CSV）
    Table {
        /// 输出文件 (默认: 标准输出)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn config(&self) -> DriverConfig {
        DriverConfig {
            table: match &self.table {
                Some(path) => TableSource::Path(path.clone()),
                None => TableSource::Generated,
            },
            power_associativity: if self.right_assoc_power {
                Associativity::Right
            } else {
                Associativity::Left
            },
            validate: !self.no_validate,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let emitter = if cli.no_color {
        colored::control::set_override(false);
        Emitter::without_colors()
    } else {
        Emitter::new()
    };
    let config = cli.config();

    match cli.command {
        Commands::Convert { expr } => cmd_convert(&config, expr, &emitter)?,
        Commands::Eval { expr } => cmd_eval(&config, expr, &emitter)?,
        Commands::Check { expr } => cmd_check(&config, expr, &emitter)?,
        Commands::Table { output } => cmd_table(output)?,
    }

    Ok(())
}

/// RUST_LOG 优先于 -v
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// 未给出表达式时提示并读取一行
fn read_expression(expr: Option<String>) -> Result<String> {
    if let Some(expr) = expr {
        return Ok(expr);
    }

    print!(
        "Enter an infix expression (operators: + - * / % ^, unary minus as ( UMINUS n )): "
    );
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// 建立会话并处理一个表达式；出错时带源码输出诊断并以状态 1 退出
fn run<T>(
    config: &DriverConfig,
    expr: Option<String>,
    emitter: &Emitter,
    step: impl FnOnce(&Session, &str) -> Result<T, ExprError>,
) -> Result<(T, String)> {
    let session = match Session::new(config.clone()) {
        Ok(session) => session,
        Err(err) => {
            err.emit(emitter, None);
            std::process::exit(1);
        }
    };
    if !session.notices().is_empty() {
        emitter.emit_all(session.notices().diagnostics());
    }

    let source = read_expression(expr)?;
    match step(&session, &source) {
        Ok(output) => Ok((output, source)),
        Err(err) => {
            log::debug!("failed with {} error", err.kind());
            err.emit(emitter, Some(&source));
            std::process::exit(1);
        }
    }
}

/// 转换命令
fn cmd_convert(config: &DriverConfig, expr: Option<String>, emitter: &Emitter) -> Result<()> {
    let (conversion, _) = run(config, expr, emitter, Session::convert)?;

    println!("{} {}", "postfix:".bold(), conversion.postfix_text());
    println!("{} {}", "prefix:".bold(), conversion.prefix_text());
    Ok(())
}

/// 求值命令
fn cmd_eval(config: &DriverConfig, expr: Option<String>, emitter: &Emitter) -> Result<()> {
    let (evaluation, _) = run(config, expr, emitter, Session::evaluate)?;

    log::info!("{}", evaluation.postfix);
    log::info!("{}", evaluation.prefix);
    println!("{}", evaluation.value());
    Ok(())
}

/// 检查命令
fn cmd_check(config: &DriverConfig, expr: Option<String>, emitter: &Emitter) -> Result<()> {
    let (_, source) = run(config, expr, emitter, Session::check)?;

    println!("{} {}", "valid:".green().bold(), source.trim());
    Ok(())
}

/// 转移表命令
fn cmd_table(output: Option<PathBuf>) -> Result<()> {
    let csv = TransitionTable::generate()?.to_csv()?;

    match output {
        Some(path) => {
            fs::write(&path, csv)?;
            eprintln!("{} {}", "wrote".green().bold(), path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}
