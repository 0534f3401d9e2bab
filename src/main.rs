// Copyright 2020 TwoCookingMice

use sggx_slab::core::config_loader::load_fit_settings;
use sggx_slab::fitting::ltc_fit::{FitSettings, LtcFitter};
use sggx_slab::io::exr_utils::write_table_exr;
use sggx_slab::io::table_text::write_table_source;

use std::env;
use std::process;

const TABLE_NAME: &str = "ltcParamTableSingleSGGX";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    output_path: String,
    config_path: Option<String>,
    source_path: Option<String>,
    mu_res: Option<usize>,
    alpha_res: Option<usize>,
    threads: Option<usize>,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <output.exr> [--config fit.xml] [--mu-res N] [--alpha-res N] [--threads N] [--source out.inc]",
              program);
    process::exit(1);
}

fn parse_count(flag: &str, value: Option<&String>) -> Result<usize, String> {
    value
        .and_then(|v| v.parse::<usize>().ok())
        .ok_or_else(|| format!("{} expects a non-negative integer", flag))
}

fn parse_path(flag: &str, value: Option<&String>) -> Result<String, String> {
    value.cloned().ok_or_else(|| format!("{} expects a path", flag))
}

/// `args` excludes the program name.
fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs {
        output_path: args.first().cloned().ok_or_else(|| "missing output path".to_string())?,
        ..CliArgs::default()
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                cli.config_path = Some(parse_path("--config", args.get(i))?);
            }
            "--source" => {
                i += 1;
                cli.source_path = Some(parse_path("--source", args.get(i))?);
            }
            "--mu-res" => {
                i += 1;
                cli.mu_res = Some(parse_count("--mu-res", args.get(i))?);
            }
            "--alpha-res" => {
                i += 1;
                cli.alpha_res = Some(parse_count("--alpha-res", args.get(i))?);
            }
            "--threads" => {
                i += 1;
                cli.threads = Some(parse_count("--threads", args.get(i))?);
            }
            other => log::warn!("Ignoring unknown argument: {}.", other),
        }
        i += 1;
    }
    Ok(cli)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("sggx-slab");
    let cli = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{}", msg);
            usage(program)
        }
    };

    let mut settings = match &cli.config_path {
        Some(path) => match load_fit_settings(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                process::exit(1);
            }
        },
        None => FitSettings::default(),
    };
    settings.mu_res = cli.mu_res.unwrap_or(settings.mu_res);
    settings.alpha_res = cli.alpha_res.unwrap_or(settings.alpha_res);
    settings.threads = cli.threads.unwrap_or(settings.threads);
    log::info!("{:?}", settings);

    let table = LtcFitter::new(settings).fit();

    if let Err(e) = write_table_exr(&table, &cli.output_path) {
        log::error!("{}", e);
        process::exit(1);
    }
    if let Some(path) = &cli.source_path {
        if let Err(e) = write_table_source(&table, TABLE_NAME, path) {
            log::error!("{}", e);
            process::exit(1);
        }
    }
}
