use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use lightmeter_tables::firmware::{generate, inspect};
use lightmeter_tables::GeneratorConfig;

fn cli() -> Command {
    Command::new("lightmeter-tables")
        .version("0.1.0")
        .about("노출계 펌웨어용 압축 룩업 테이블 생성기")
        .subcommand_required(true)
        .subcommand(
            Command::new("generate")
                .about("설정 파일로 C 헤더 생성")
                .arg(
                    Arg::new("config")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("테이블 설정 JSON 경로")
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_name("FILE")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("출력 파일 (없으면 표준 출력)")
                )
        )
        .subcommand(
            Command::new("inspect")
                .about("테이블별 사전 크기, 바이트 수, 복원 검증 결과 출력")
                .arg(
                    Arg::new("config")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("테이블 설정 JSON 경로")
                )
        )
}

fn config_arg(matches: &ArgMatches) -> Result<GeneratorConfig> {
    let path = matches
        .get_one::<PathBuf>("config")
        .context("설정 경로가 필요함")?;
    GeneratorConfig::load(path)
}

fn run_generate(matches: &ArgMatches) -> Result<()> {
    let config = config_arg(matches)?;
    let source = generate(&config)?;

    match matches.get_one::<PathBuf>("output") {
        Some(path) => {
            fs::write(path, &source)
                .with_context(|| format!("출력 파일 쓰기 실패: {}", path.display()))?;
            log::info!("{} 작성 완료", path.display());
        }
        None => print!("{}", source),
    }
    Ok(())
}

fn run_inspect(matches: &ArgMatches) -> Result<()> {
    let config = config_arg(matches)?;
    let reports = inspect(&config)?;

    println!("{:<40} {:>7} {:>7} {:>7} {:>9}", "table", "anchors", "dict", "bytes", "mismatch");
    for r in &reports {
        println!(
            "{:<40} {:>7} {:>7} {:>7} {:>9}",
            r.name, r.anchors, r.dictionary_len, r.byte_size, r.mismatches
        );
    }

    if reports.iter().any(|r| r.mismatches > 0) {
        anyhow::bail!("복원 값이 기준 레벨과 다른 테이블이 있음");
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let matches = cli().get_matches();
    let result = match matches.subcommand() {
        Some(("generate", sub)) => run_generate(sub),
        Some(("inspect", sub)) => run_inspect(sub),
        _ => unreachable!("subcommand_required"),
    };

    if let Err(e) = result {
        eprintln!("오류: {:#}", e);
        process::exit(1);
    }
}
