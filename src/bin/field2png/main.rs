// field2png - Render the node field headlessly to a PNG
//
// Runs the same simulation the page runs, N frames at a fixed seed, and
// writes the last frame. Handy for checking a regime's density and link
// distance at a given viewport without opening a browser.
//
// Usage: cargo run --bin field2png -- --width 1536 --height 864 [--frames 120] [--pointer 700,400]

#[cfg(not(target_arch = "wasm32"))]
mod raster;

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;
    use node_field::{NodeField, Pointer};

    use crate::raster::Raster;

    #[derive(Parser, Debug)]
    #[command(version, about = "Render the node field to a PNG")]
    pub struct Args {
        /// Viewport width in CSS pixels
        #[arg(long, default_value_t = 1536)]
        pub width: u32,

        /// Viewport height in CSS pixels
        #[arg(long, default_value_t = 864)]
        pub height: u32,

        /// Frames to simulate before writing
        #[arg(long, default_value_t = 120)]
        pub frames: u32,

        #[arg(long, default_value_t = 0xDEADBEEF)]
        pub seed: u32,

        /// Pointer position as X,Y (defaults to the origin)
        #[arg(long, value_parser = parse_pointer)]
        pub pointer: Option<Pointer>,

        #[arg(long, short, default_value = "field.png")]
        pub out: PathBuf,
    }

    fn parse_pointer(s: &str) -> Result<Pointer> {
        let (x, y) = s.split_once(',').context("expected X,Y")?;
        Ok(Pointer::new(x.trim().parse()?, y.trim().parse()?))
    }

    pub fn run(args: Args) -> Result<()> {
        if args.width == 0 || args.height == 0 {
            bail!("viewport must be non-empty, got {}x{}", args.width, args.height);
        }

        let mut field = NodeField::new(args.width, args.height, args.seed);
        let regime = field.regime();
        log::info!(
            "{}x{} ({}), {} nodes, link distance {}",
            args.width,
            args.height,
            if regime.is_mobile() { "mobile" } else { "desktop" },
            field.len(),
            regime.max_distance,
        );

        if let Some(p) = args.pointer {
            field.set_pointer(p);
        }

        let mut raster = Raster::new(args.width, args.height);
        for _ in 0..args.frames.max(1) {
            field.tick(&mut raster);
        }

        raster
            .img
            .save(&args.out)
            .with_context(|| format!("writing {}", args.out.display()))?;
        log::info!("wrote {}", args.out.display());
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn pointer_parses() {
            assert_eq!(parse_pointer("700, 400").unwrap(), Pointer::new(700.0, 400.0));
            assert!(parse_pointer("700").is_err());
            assert!(parse_pointer("a,b").is_err());
        }

        #[test]
        fn args_defaults() {
            let args = Args::parse_from(["field2png"]);
            assert_eq!((args.width, args.height, args.frames), (1536, 864, 120));
            assert!(args.pointer.is_none());
        }

        #[test]
        fn empty_viewport_rejected() {
            let args = Args::parse_from(["field2png", "--width", "0"]);
            assert!(run(args).is_err());
        }

        #[test]
        fn writes_png() {
            let out = std::env::temp_dir().join(format!("field2png-{}.png", std::process::id()));
            let args = Args::parse_from([
                "field2png",
                "--width", "320",
                "--height", "240",
                "--frames", "3",
                "--pointer", "160,120",
                "--out", out.to_str().unwrap(),
            ]);
            run(args).unwrap();

            let img = image::open(&out).unwrap();
            assert_eq!((img.width(), img.height()), (320, 240));
            std::fs::remove_file(out).ok();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = cli::run(cli::Args::parse()) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

// Browser builds only want the library
#[cfg(target_arch = "wasm32")]
fn main() {}
