use clap::Parser;
use order_cleaner::{codec, AppConfig, InputOrder, OrderService, OutputFormat};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// 平台订单清洗: 拆分捆绑 SKU、计算单价、追加赠品行
#[derive(Debug, Parser)]
#[command(name = "order-cleaner", version, about)]
struct Cli {
    /// 订单 JSON 文件 (`-` 为 stdin, 省略则使用内置样例)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 输出格式
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// 输出文件 (省略则写到 stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 紧凑 JSON
    #[arg(long)]
    compact: bool,
}

impl Cli {
    /// 命令行参数覆盖配置
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if self.input.is_some() {
            config.input.path = self.input;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.output.is_some() {
            config.output.path = self.output;
        }
        if self.compact {
            config.output.pretty = false;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 加载配置
    let (config, load_error) = match cli.config.as_deref() {
        Some(path) => (AppConfig::load(Some(path))?, None),
        None => AppConfig::load_or_default(None),
    };
    let config = cli.apply(config);

    // 初始化日志 - 本地时间格式, 输出到 stderr (stdout 只留结果)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Some(e) = load_error {
        tracing::warn!("Failed to load config, using defaults: {}", e);
    }
    info!("Starting order cleaner with config: {:?}", config);

    let orders = load_orders(config.input.path.as_deref())?;
    let service = OrderService::new();

    let cleaned = match service.process_orders(&orders) {
        Ok(cleaned) => cleaned,
        Err(e) => {
            tracing::error!("Error processing orders: {}", e);
            return Err(e.into());
        }
    };

    // 整批成功后才写出
    let writer: Box<dyn Write> = match &config.output.path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    match config.output.format {
        OutputFormat::Json => codec::write_json(&cleaned, writer, config.output.pretty)?,
        OutputFormat::Csv => codec::write_csv(&cleaned, writer)?,
    }

    info!("Wrote {} cleaned order lines", cleaned.len());
    Ok(())
}

fn load_orders(path: Option<&Path>) -> Result<Vec<InputOrder>, Box<dyn std::error::Error>> {
    let orders = match path {
        None => {
            info!("No input given, using built-in sample orders");
            codec::sample_orders()
        }
        Some(path) if path == Path::new("-") => codec::read_orders(io::stdin().lock())?,
        Some(path) => {
            info!("Reading orders from {}", path.display());
            codec::read_orders(BufReader::new(File::open(path)?))?
        }
    };
    Ok(orders)
}
