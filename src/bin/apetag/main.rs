use anyhow::Result;
use env_logger::{Builder, Env};
use log::error;

mod cli;
mod util;
mod cmd_check;
mod cmd_get;
mod cmd_dump;
mod cmd_meta;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    // Пример: RUST_LOG=debug apetag check --path track.ape
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Check { path, mmap, json } =>
            cmd_check::exec(path, mmap, json),

        cli::Cmd::Get { path, key, mmap, out } =>
            cmd_get::exec(path, key, mmap, out),

        cli::Cmd::Dump { path, mmap, json } =>
            cmd_dump::exec(path, mmap, json),

        cli::Cmd::Meta { path, mmap, json } =>
            cmd_meta::exec(path, mmap, json),
    }
}
