use argh::FromArgs;
use std::path::PathBuf;
use std::time::Instant;

use kuwahara_image::Image;
use kuwahara_imgproc::filter::kuwahara_with;
use kuwahara_imgproc::parallel::ExecutionStrategy;
use kuwahara_io::functional as F;

#[derive(FromArgs)]
/// Apply the Kuwahara edge-preserving filter to an image
struct Args {
    /// path to the input image
    #[argh(positional)]
    input: PathBuf,

    /// path where the filtered image is written
    #[argh(positional)]
    output: PathBuf,

    /// side length of the filter window, must be odd (default: 9)
    #[argh(option, default = "9")]
    window: usize,

    /// execution strategy: serial, rows, pixels or a thread count (default: rows)
    #[argh(option, default = "String::from(\"rows\")")]
    strategy: String,
}

fn parse_strategy(name: &str) -> Result<ExecutionStrategy, String> {
    match name {
        "serial" => Ok(ExecutionStrategy::Serial),
        "rows" => Ok(ExecutionStrategy::ParallelRows),
        "pixels" => Ok(ExecutionStrategy::ParallelPixels),
        other => match other.parse::<usize>() {
            Ok(n) if n > 0 => Ok(ExecutionStrategy::Fixed(n)),
            _ => Err(format!(
                "invalid strategy '{}', expected serial, rows, pixels or a thread count",
                other
            )),
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    // usage errors are reported before any image is loaded
    if args.window % 2 == 0 || args.window < 3 {
        return Err(format!(
            "window size must be an odd value of at least 3, got {}",
            args.window
        )
        .into());
    }
    let strategy = parse_strategy(&args.strategy)?;

    // read the image
    let image = F::read_image_rgb8(&args.input)?;
    log::info!(
        "loaded {} ({}x{})",
        args.input.display(),
        image.width(),
        image.height()
    );

    let mut filtered = Image::from_size_val(image.size(), 0u8)?;

    let start = Instant::now();
    kuwahara_with(&image, &mut filtered, args.window, strategy)?;
    println!(
        "filtered {}x{} image with window {} in {:?}",
        image.width(),
        image.height(),
        args.window,
        start.elapsed()
    );

    F::write_image_rgb8(&args.output, &filtered)?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}
