//! gphoto-typed binary for inspecting result codes and camera configuration.

use clap::{Parser, Subcommand};
use gphoto_typed::ResultCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "gphoto-typed",
    version,
    about = "Inspect libgphoto2 result codes and camera configuration"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every known libgphoto2 result code
    Codes,
    /// Explain result codes given by number or name
    Decode {
        /// Codes such as -110 or CameraBusy
        #[arg(required = true, allow_negative_numbers = true)]
        codes: Vec<ResultCode>,
    },
    /// Print the configuration tree of the first detected camera
    Config {
        /// Only print the widget with this name
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> gphoto_typed::Result<()> {
    match cli.command {
        Command::Codes => {
            for &code in ResultCode::KNOWN {
                print_code(code);
            }
        }
        Command::Decode { codes } => {
            for code in codes {
                print_code(code);
            }
        }
        Command::Config { name } => print_config(name.as_deref())?,
    }
    Ok(())
}

fn print_code(code: ResultCode) {
    let retry = if code.is_transient() { " [retryable]" } else { "" };
    println!("{code}: {}{retry}", code.description());
}

#[cfg(feature = "native")]
fn print_config(name: Option<&str>) -> gphoto_typed::Result<()> {
    use gphoto_typed::{tree, Camera, Widget};

    let camera = Camera::autodetect()?;
    let config = camera.config()?;
    let root = Widget::new(config.root())?;

    match name {
        Some(name) => println!("{}", tree::find(&root, name)?),
        None => {
            for entry in tree::walk(&root)? {
                println!("{entry}");
            }
        }
    }
    Ok(())
}

#[cfg(not(feature = "native"))]
fn print_config(_name: Option<&str>) -> gphoto_typed::Result<()> {
    Err(gphoto_typed::Error::CameraWrapper(
        "built without the libgphoto2 backend, rebuild with --features native".to_owned(),
    ))
}
