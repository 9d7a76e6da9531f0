use std::path::PathBuf;

use anyhow::Context;
use polyclip::ClipConfig;
use polyclip::replay::{Script, run_script};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let script_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: polyclip <script.json>")?;
    let script = Script::load(&script_path)?;
    let base_dir = script_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();
    let config = ClipConfig::load();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(run_script(&script, &base_dir, &config));

    match report {
        Ok(report) => {
            for path in report.regions.iter().chain(&report.pages) {
                println!("{}", path.display());
            }
            Ok(())
        }
        Err(err) => {
            log::error!("Replay failed: {err:?}");
            Err(err)
        }
    }
}
