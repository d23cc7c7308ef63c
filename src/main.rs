use std::env;

use anyhow::Context;
use log::info;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use line_descent::{
    config::RunFile,
    driver::{Driver, LogSink},
    evaluate, Regressor,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .context("usage: line-descent <run-file.json>")?;

    let run = RunFile::load(&path).with_context(|| format!("cannot load run file '{path}'"))?;
    let regressor = Regressor::new(run.step)?;
    let mut driver = Driver::new(run.points, regressor, run.driver, LogSink);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("received SIGINT");
            ctrl_c.cancel();
        }
    });

    let metrics = driver.run_paced(&cancel).await?;

    let params = driver.params();
    let stats = evaluate(driver.points(), params);
    println!("y = {}x + {}", params.slope, params.intercept);
    println!(
        "x explains y to a certainty of {:.0}%, significance ratio {:.2} ({} step(s))",
        stats.explained_percent().floor(),
        stats.significance_ratio,
        metrics.steps,
    );

    Ok(())
}
