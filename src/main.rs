use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use fountain_outline::{api, format_outline, Conf, FountainResult, MarkupWriter, WriterOptions};

#[derive(Parser)]
#[command(name = "fountain-outline", version, about = "Fountain 剧本解析、大纲提取与回写")]
struct Cli {
    /// JSON 配置文件
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 日志详细程度 (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 以 JSON 输出元素列表和标题页
    Elements {
        file: PathBuf,
    },
    /// 输出大纲树
    Outline {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutlineFormat::Text)]
        format: OutlineFormat,
    },
    /// 解析后重新写成 Fountain 文本
    Write {
        file: PathBuf,
        /// 不为没有编号的场景生成编号
        #[arg(long)]
        suppress_scene_numbers: bool,
        /// 用地点信息重新拼接场景标题
        #[arg(long)]
        normalize_headings: bool,
    },
    /// 角色、地点和时长统计
    Stats {
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutlineFormat {
    Json,
    Text,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_conf(path: Option<&PathBuf>) -> FountainResult<Conf> {
    match path {
        Some(path) => Conf::load(path),
        None => Ok(Conf::default()),
    }
}

fn run(cli: Cli) -> FountainResult<()> {
    let conf = load_conf(cli.config.as_ref())?;

    match cli.command {
        Command::Elements { file } => {
            let screenplay = api::parse_file(&file, &conf)?;
            println!("{}", api::elements_json(&screenplay)?);
        }
        Command::Outline { file, format } => {
            let outline = api::parse_file(&file, &conf)?.outline();
            match format {
                OutlineFormat::Json => println!("{}", api::outline_json(&outline)?),
                OutlineFormat::Text => print!("{}", format_outline(&outline)),
            }
        }
        Command::Write {
            file,
            suppress_scene_numbers,
            normalize_headings,
        } => {
            let screenplay = api::parse_file(&file, &conf)?;
            let mut options = WriterOptions::from_conf(&conf);
            options.suppress_scene_numbers |= suppress_scene_numbers;
            options.normalize_scene_headings |= normalize_headings;
            print!("{}", MarkupWriter::new(options).write(&screenplay));
        }
        Command::Stats { file } => {
            let screenplay = api::parse_file(&file, &conf)?;
            println!("{}", api::properties_json(&screenplay, &conf)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("错误: {}", e);
            ExitCode::FAILURE
        }
    }
}
