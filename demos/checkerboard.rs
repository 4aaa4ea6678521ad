//! Checkerboard demo.
//!
//! Generates a checkerboard pattern and its tonal inverse at the DMD's full
//! mirror-array size and plays them as a two-frame slideshow.
//!
//! Run with: `cargo run --example checkerboard --features testutils -- [options]`

mod common;

use clap::Parser;
use common::CommonArgs;
use dmd_host::mock::{DefaultBehavior, MockDriver};
use dmd_host::{
    assemble_slideshow, checkerboard_pair, CheckerboardConfig, HostSession, Image, Result,
    DEFAULT_FRAME_TIME,
};

#[derive(Parser)]
#[command(about = "Display a complementary checkerboard pair on a DMD")]
struct Args {
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
    // The demos run against the in-process mock; a driver wrapping the vendor
    // SDK slots in the same way.
    let driver = MockDriver::new(DefaultBehavior);
    let mut session = HostSession::start(Box::new(driver), args.common.connection_config())?;

    let dmd = session.dmd_component()?.clone();
    println!(
        "Using {} component ({}x{})",
        dmd.device_type, dmd.num_columns, dmd.num_rows
    );

    let (board, inverse) =
        checkerboard_pair(dmd.num_columns, dmd.num_rows, &CheckerboardConfig::default())?;

    let config = args.common.slideshow_config(DEFAULT_FRAME_TIME);
    let mut project = assemble_slideshow(
        "checkerboard",
        dmd.device_type,
        vec![board, inverse],
        &config,
    )?;

    // Preview images are display-only metadata for GUI tooling.
    let previews: Vec<(dmd_host::ImageId, Image)> = project
        .images()
        .iter()
        .map(|img| {
            let preview = Image::new(img.id(), img.device_type(), img.bitmap().clone())
                .with_name(format!("checkerboard_{}", img.id()));
            (img.id(), preview)
        })
        .collect();
    for (id, preview) in previews {
        project.add_preview_image(preview, id)?;
    }

    common::run_playback(&mut session, &project, &config)
}
