//! # Kiosk Receipt CLI
//!
//! Command-line front end for the receipt renderers and print transport.
//!
//! ## Usage
//!
//! ```bash
//! # Print the self-test receipt
//! kiosk-receipt --printer "POS-80" text
//!
//! # Print a text file
//! kiosk-receipt --printer "POS-80" text receipt.txt
//!
//! # Print an HTML fragment from stdin, report the result as JSON
//! kiosk-receipt --printer "POS-80" --json html - < page.html
//!
//! # Render an image to a file instead of printing
//! kiosk-receipt --output logo.bin image logo.png
//!
//! # Print a base64 data URL captured from the kiosk page
//! KIOSK_PRINTER=/dev/usb/lp0 kiosk-receipt image --base64 capture.txt
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use kiosk_receipt::{
    CommandStream, DeviceProvider, KioskError, PrintTransport, render::raster, render_html,
    render_text,
};

/// Kiosk Receipt - ESC/POS receipt printing utility
#[derive(Parser, Debug)]
#[command(name = "kiosk-receipt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Printer name (spooler name on Windows, device path elsewhere)
    #[arg(long, global = true, env = "KIOSK_PRINTER")]
    printer: Option<String>,

    /// Write the ESC/POS stream to FILE instead of printing
    #[arg(long, global = true, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the job result as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print plain text (omit INPUT for the self-test receipt)
    Text {
        /// Text file, or `-` for stdin
        input: Option<PathBuf>,
    },

    /// Print the text content of an HTML fragment
    Html {
        /// HTML file, or `-` for stdin
        input: PathBuf,
    },

    /// Print an image as a raster bitmap
    Image {
        /// Image file, or `-` for stdin
        input: PathBuf,

        /// Maximum width in dots
        #[arg(long, default_value_t = raster::DEFAULT_MAX_WIDTH)]
        max_width: u32,

        /// Input is base64 text, optionally a `data:image/...;base64,` URL
        #[arg(long)]
        base64: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), KioskError> {
    let cli = Cli::parse();

    let stream = match &cli.command {
        Commands::Text { input } => match input {
            Some(path) => {
                let content = read_text(path)?;
                render_text(Some(&content))
            }
            None => render_text(None),
        },
        Commands::Html { input } => render_html(&read_text(input)?),
        Commands::Image {
            input,
            max_width,
            base64,
        } => {
            let bytes = if *base64 {
                raster::decode_data_url(&read_text(input)?)?
            } else {
                read_bytes(input)?
            };
            raster::render_image_bytes(&bytes, *max_width)?
        }
    };
    debug!(bytes = stream.len(), "Rendered stream");

    if let Some(path) = &cli.output {
        std::fs::write(path, stream.as_bytes())?;
        println!("Wrote {} bytes to {}", stream.len(), path.display());
        return Ok(());
    }

    let printer = cli.printer.as_deref().unwrap_or_default();
    print_stream(platform_provider(), printer, &stream, cli.json)
}

fn print_stream<P: DeviceProvider>(
    provider: P,
    printer: &str,
    stream: &CommandStream,
    json: bool,
) -> Result<(), KioskError> {
    let transport = PrintTransport::new(provider);
    let result = transport.send(printer, stream);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.success {
        println!("{}", result.message);
    }

    if result.success {
        info!(printer, "Done");
        Ok(())
    } else {
        Err(KioskError::Print(result.message))
    }
}

#[cfg(windows)]
fn platform_provider() -> kiosk_receipt::SpoolerProvider {
    kiosk_receipt::SpoolerProvider::new()
}

#[cfg(not(windows))]
fn platform_provider() -> kiosk_receipt::FileProvider {
    kiosk_receipt::FileProvider::new()
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, KioskError> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read(path)?)
}

fn read_text(path: &Path) -> Result<String, KioskError> {
    let bytes = read_bytes(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
