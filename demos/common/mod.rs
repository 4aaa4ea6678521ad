//! Shared code for the demo programs.

use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use dmd_host::{
    CommInterface, ConnectionConfig, HostSession, PlaybackOptions, PollConfig, Project, Result,
    SequenceId, SlideshowConfig,
};

/// Connection and timing flags shared by both demos.
#[derive(clap::Args)]
pub struct CommonArgs {
    /// Controller IP address
    #[arg(short = 'i', long = "ip", value_name = "IP", default_value = "192.168.200.1")]
    pub ip_address: String,

    /// Sequence repeat count; 0 repeats forever
    #[arg(short = 'r', long = "repeat", value_name = "COUNT", default_value_t = 0)]
    pub repeat_count: u32,

    /// Frame time in milliseconds (each demo has its own default)
    #[arg(short = 'f', long = "frame-time", value_name = "MS")]
    pub frame_time_ms: Option<u64>,

    /// Use the USB3 interface (default is USB2)
    #[arg(long)]
    pub usb3: bool,

    /// Use the Ethernet interface
    #[arg(long)]
    pub eth: bool,

    /// Use the PCIe interface
    #[arg(long)]
    pub pcie: bool,

    /// Device number when more than one controller is attached
    #[arg(short = 'd', long = "device", value_name = "NUM", default_value_t = 0)]
    pub device_number: u8,
}

impl CommonArgs {
    fn interface(&self) -> CommInterface {
        if self.usb3 {
            CommInterface::Usb3
        } else if self.eth {
            CommInterface::Ethernet
        } else if self.pcie {
            CommInterface::Pcie
        } else {
            CommInterface::Usb2
        }
    }

    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig::default()
            .with_ip_address(self.ip_address.clone())
            .with_interface(self.interface())
            .with_device_number(self.device_number)
    }

    /// Slideshow parameters, falling back to the demo's own frame time when
    /// `-f` is absent.
    pub fn slideshow_config(&self, default_frame_time: Duration) -> SlideshowConfig {
        let frame_time = self
            .frame_time_ms
            .map(Duration::from_millis)
            .unwrap_or(default_frame_time);
        SlideshowConfig::default()
            .with_sequence_id(SequenceId(1))
            .with_repeat_count(self.repeat_count)
            .with_frame_time(frame_time)
    }
}

/// Parse arguments; on a usage error print the usage string and exit -1.
///
/// `--help` and `--version` still exit 0.
pub fn parse_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            std::process::exit(0);
        }
        Err(err) => {
            println!("{}", err.render());
            std::process::exit(-1);
        }
    }
}

/// Play the project's sequence to completion.
///
/// With a repeat count of 0 the sequence runs until the user presses Enter;
/// otherwise it plays out on its own. Either way this blocks until the device
/// reports the sequence stopped.
pub fn run_playback(
    session: &mut HostSession,
    project: &Project,
    config: &SlideshowConfig,
) -> Result<()> {
    let options = PlaybackOptions::default().with_sequence_id(config.sequence_id);

    println!(
        "Starting sequence {} with frame time {} ms and repeat count {}",
        config.sequence_id,
        config.frame_time.as_millis(),
        config.repeat_count
    );
    let component = session.play(project, &options)?;

    if config.repeat_count == 0 {
        println!("Sequence repeating forever. Press Enter to stop the sequence");
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        session.stop_sequence(component)?;
    }

    println!("Waiting for the sequence to stop.");
    let drain = PollConfig::default().with_timeout(None);
    session.wait_until_stopped(component, &drain)?;
    Ok(())
}
