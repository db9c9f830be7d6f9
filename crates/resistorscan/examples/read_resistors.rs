use image::ImageReader;
use resistorscan::{ReaderConfig, ResistorReader};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <image.png> [config.json] [out.json]", args[0]);
        std::process::exit(2);
    }

    let image = ImageReader::open(&args[1])?.decode()?.to_rgb8();
    let config = match args.get(2) {
        Some(path) => ReaderConfig::from_json_file(Path::new(path))?,
        None => ReaderConfig::default(),
    };

    let reader = ResistorReader::with_config(config);
    let result = reader.read(&image);

    for reading in &result.readings {
        match (&reading.value, reading.reject) {
            (Some(v), _) => println!(
                "label {:>3}: {} ohm +/-{}% ({:?})",
                reading.label,
                v.ohms,
                v.tolerance_percent,
                reading.band_colors()
            ),
            (None, Some(reason)) => println!("label {:>3}: rejected ({reason})", reading.label),
            (None, None) => {}
        }
    }
    println!(
        "Read {} of {} resistors.",
        result.decoded().count(),
        result.readings.len()
    );

    if let Some(out_path) = args.get(3) {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(out_path, json)?;
        println!("Wrote {out_path}");
    }
    Ok(())
}
