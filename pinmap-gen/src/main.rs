use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use pinmap_gen::{load_layout, GenError, GenerateRequest, OutputMode, OutputPlan};

/// Generate pin init code from a pin layout
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pin layout file, or a pin list with --from-pin-list
    #[arg()]
    input: PathBuf,

    /// read INPUT as a pin list written by --pin-list instead of a layout
    #[arg(long, conflicts_with_all = ["variant", "pin_list", "list_variants"])]
    from_pin_list: bool,

    /// build variant to generate; the common map alone if omitted
    #[arg(short = 'b', long)]
    variant: Option<String>,

    /// directory for the generated files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// splice into existing sources between marker comments
    #[arg(long)]
    splice: bool,

    /// header receiving declarations in splice mode (relative to out-dir)
    #[arg(long, default_value = "pins.h")]
    header: PathBuf,

    /// source receiving definitions and init in splice mode (relative to out-dir)
    #[arg(long, default_value = "pins.c")]
    source: PathBuf,

    /// also write the resolved pin list as TOML
    #[arg(long)]
    pin_list: Option<PathBuf>,

    /// print the declared build variants and exit
    #[arg(long)]
    list_variants: bool,

    /// enable debug messages
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter(None, log::LevelFilter::Debug);
    } else {
        builder.filter(None, log::LevelFilter::Info);
    }
    builder.init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), GenError> {
    let mode = if args.splice {
        OutputMode::Splice {
            header: args.out_dir.join(&args.header),
            source: args.out_dir.join(&args.source),
        }
    } else {
        OutputMode::Separate {
            out_dir: args.out_dir.clone(),
        }
    };

    if args.from_pin_list {
        return OutputPlan::from_pin_list(&args.input, &mode)?.write();
    }

    let layout = load_layout(&args.input)?;
    info!(
        "Loaded {} ({} common entries, {} variants)",
        args.input.display(),
        layout.common.len(),
        layout.variants.len()
    );

    if args.list_variants {
        for name in layout.variant_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let request = GenerateRequest {
        layout: &layout,
        variant: args.variant.as_deref(),
        mode,
        pin_list: args.pin_list.clone(),
    };

    OutputPlan::build(&request)?.write()
}
