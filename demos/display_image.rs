//! Still image demo.
//!
//! Loads an image file, converts it to 8-bit grayscale, and plays it as a
//! single-frame slideshow.
//!
//! Run with: `cargo run --example display_image --features testutils -- <image> [options]`

mod common;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use common::CommonArgs;
use dmd_host::mock::{DefaultBehavior, MockDriver};
use dmd_host::{assemble_slideshow, load_grayscale_bitmap, HostSession, Image, Result};

/// Still images linger longer than test patterns by default.
const DEFAULT_STILL_FRAME_TIME: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(about = "Display a still image on a DMD")]
struct Args {
    /// Path to the image file to display
    image: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    env_logger::init();
    let args: Args = common::parse_or_exit();

    if let Err(err) = run(&args) {
        eprintln!("Error: {}", err);
        std::process::exit(-1);
    }
}

fn run(args: &Args) -> Result<()> {
    let bitmap = load_grayscale_bitmap(&args.image)?;
    println!(
        "Loaded image: {} ({}x{})",
        args.image.display(),
        bitmap.width(),
        bitmap.height()
    );

    // The demos run against the in-process mock; a driver wrapping the vendor
    // SDK slots in the same way.
    let driver = MockDriver::new(DefaultBehavior);
    let mut session = HostSession::start(Box::new(driver), args.common.connection_config())?;
    let dmd = session.dmd_component()?.clone();

    let config = args.common.slideshow_config(DEFAULT_STILL_FRAME_TIME);
    let mut project =
        assemble_slideshow("display_image", dmd.device_type, vec![bitmap], &config)?;

    let name = args
        .image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let previews: Vec<(dmd_host::ImageId, Image)> = project
        .images()
        .iter()
        .map(|img| {
            let preview = Image::new(img.id(), img.device_type(), img.bitmap().clone())
                .with_name(name.clone());
            (img.id(), preview)
        })
        .collect();
    for (id, preview) in previews {
        project.add_preview_image(preview, id)?;
    }

    common::run_playback(&mut session, &project, &config)
}
