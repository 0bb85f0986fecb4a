mod options;

use anyhow::Result;
use clap::Parser;
use log::debug;
use options::{Cli, Command as CliCmd};
use session::{raster::GridMode, Manifest, Session, Store, StoreConfig, Value};
use std::io::Write;

fn main() -> Result<()> {
    let Cli { dir, config, cmd } = Cli::parse();

    env_logger::init();

    let store = match (config, dir) {
        (Some(config), _) => StoreConfig::from_path(config)?.into_store()?,
        (None, Some(dir)) => Store::new(dir),
        (None, None) => unreachable!("clap requires --dir or --config"),
    };
    debug!("using {store:?}");

    match cmd {
        CliCmd::Inspect { json: false } => display(&store.manifest()?),
        CliCmd::Inspect { json: true } => json(&store.manifest()?),
        CliCmd::Verify { mmap } => verify(&store, mmap),
    }
}

fn display(manifest: &Manifest) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "grids:")?;
    for entry in &manifest.grids {
        let crs = if entry.crs.is_empty() {
            "no crs"
        } else {
            entry.crs.as_str()
        };
        writeln!(
            stdout,
            "  {:24} {} band(s), {} x {}, {}",
            entry.name,
            entry.bands,
            entry.cols,
            entry.rows,
            crs
        )?;
    }
    writeln!(stdout, "plain:")?;
    for (name, type_name) in &manifest.plain {
        writeln!(stdout, "  {name:24} {type_name}")?;
    }
    Ok(())
}

fn json(manifest: &Manifest) -> Result<()> {
    let out = std::io::stdout().lock();
    serde_json::to_writer_pretty(out, manifest)?;
    println!();
    Ok(())
}

fn verify(store: &Store, mmap: bool) -> Result<()> {
    let store = if mmap {
        store.clone().with_grid_mode(GridMode::MemMap)
    } else {
        store.clone()
    };
    let mut session = Session::new();
    let report = store.load(&mut session)?;
    let mut stdout = std::io::stdout().lock();
    for (name, value) in &session {
        match value {
            Value::Grid(grid) => {
                let (cols, rows) = grid.dimensions();
                let ranges: Vec<String> = (0..grid.band_count())
                    .map(|band| match grid.band_range(band) {
                        Some((lo, hi)) => format!("[{lo}, {hi}]"),
                        None => "[empty]".to_owned(),
                    })
                    .collect();
                writeln!(
                    stdout,
                    "  {name:24} grid {cols} x {rows} {}",
                    ranges.join(" ")
                )?;
            }
            Value::Plain(plain) => writeln!(stdout, "  {name:24} {}", plain.type_name())?,
        }
    }
    writeln!(
        stdout,
        "ok: {} grids, {} plain values",
        report.grids.len(),
        report.plain.len()
    )?;
    Ok(())
}
