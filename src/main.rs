use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tinyraster::cli::{self, CliError, Options};
use tinyraster::codec;
use tinyraster::{Engine, Frame, Mesh, RenderMode};

fn save_frame(frame: &Frame, mode: RenderMode, opts: &Options) -> Result<()> {
    let stem = format!("output-{}", mode.name());

    let tga = opts.out_dir.join(format!("{stem}.tga"));
    codec::save(&frame.image, &tga, opts.use_rle)
        .with_context(|| format!("Failed to write {}", tga.display()))?;

    if opts.png {
        let png = opts.out_dir.join(format!("{stem}.png"));
        frame
            .image
            .to_image()
            .save(&png)
            .with_context(|| format!("Failed to write {}", png.display()))?;
        log::info!("saved {}", png.display());
    }
    Ok(())
}

fn run(opts: &Options) -> Result<()> {
    let mut mesh = Mesh::from_obj(&opts.obj).context("Failed to load mesh")?;

    let engine = Engine::new(opts.config).with_seed(opts.seed);
    engine.prepare(&mut mesh);

    if !opts.out_dir.as_os_str().is_empty() && opts.out_dir != Path::new(".") {
        fs::create_dir_all(&opts.out_dir)
            .with_context(|| format!("Failed to create {}", opts.out_dir.display()))?;
    }

    for &mode in &opts.modes {
        let frame = engine.render(&mesh, mode);
        save_frame(&frame, mode, opts)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = match cli::parse_from(std::env::args_os()) {
        Ok(opts) => opts,
        Err(CliError::Args(e)) => e.exit(),
        Err(e) => return Err(e.into()),
    };
    log::debug!("{opts:?}");

    run(&opts)
}
