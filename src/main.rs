mod cli;

use anyhow::Result;
use tracing::info;

use griddle::controller::LayoutController;
use griddle::scanner::scan_items;

use cli::{parse_args, ConsoleSurface, USAGE};

fn run() -> Result<i32> {
    let Some(args) = parse_args(std::env::args().skip(1))? else {
        println!("{}", USAGE);
        return Ok(0);
    };

    let (images, items) = scan_items(&args.path, args.scan_config())?;
    info!(images = images.len(), "Loaded images");

    let surface = ConsoleSurface::new(args.width, images, items);
    let mut controller = LayoutController::new(surface, args.options.clone())?;
    if let Some(outcome) = controller.last_outcome() {
        print!("{}", controller.surface().render(outcome));
    }

    for &width in &args.resize {
        controller.surface_mut().set_width(width);
        if controller.resize(width)?.is_none() {
            continue;
        }
        if let Some(outcome) = controller.last_outcome() {
            print!("{}", controller.surface().render(outcome));
        }
    }

    Ok(0)
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("griddle=info".parse().unwrap()),
        )
        .init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}
