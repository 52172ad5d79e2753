// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;

use crabby_webp::decoder::*;
use crabby_webp::utils::Rgba;
use crabby_webp::*;

use std::fs::File;
use std::io::BufWriter;
use tracing_subscriber::EnvFilter;

fn size_parser(s: &str) -> Result<(u32, u32), String> {
    let values: Result<Vec<_>, _> = s.split('x').map(|x| x.parse::<u32>()).collect();
    match values.as_deref() {
        Ok([width, height]) if *width > 0 && *height > 0 => Ok((*width, *height)),
        _ => Err("Invalid size string. Expecting WIDTHxHEIGHT".into()),
    }
}

fn background_parser(s: &str) -> Result<Background, String> {
    match s {
        "transparent" => Ok(Background::Transparent),
        "container" => Ok(Background::Container),
        _ => {
            let value = u32::from_str_radix(s, 16)
                .ok()
                .filter(|_| s.len() == 8)
                .ok_or("Expecting transparent, container or an RRGGBBAA hex value")?;
            Ok(Background::Color(value.to_be_bytes()))
        }
    }
}

#[derive(Parser)]
struct CommandLineArgs {
    /// Display container and per-frame information instead of rendering
    #[arg(short = 'i', long, default_value = "false")]
    info: bool,

    /// Which frame to render (Default: 0)
    #[arg(long, short = 'I')]
    index: Option<u32>,

    /// Render at WIDTHxHEIGHT instead of the canvas size
    #[arg(long, value_parser = size_parser)]
    size: Option<(u32, u32)>,

    /// Color for frames disposed to the background: transparent (default),
    /// container, or RRGGBBAA
    #[arg(long, value_parser = background_parser)]
    background: Option<Background>,

    /// Input WebP file
    #[arg(allow_hyphen_values = false)]
    input_file: String,

    /// Output PNG file
    #[arg(allow_hyphen_values = false)]
    output_file: Option<String>,
}

fn print_data_as_columns(rows: &[(&str, String)]) {
    let max_col1_width = rows.iter().map(|x| x.0.len()).max().unwrap_or(0);
    for (col1, col2) in rows {
        println!(" * {col1:<max_col1_width$} : {col2}");
    }
}

fn format_color(color: &Rgba) -> String {
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        color[0], color[1], color[2], color[3]
    )
}

fn create_decoder(args: &CommandLineArgs) -> WebpResult<Decoder> {
    let settings = Settings {
        background: args.background.unwrap_or_default(),
        ..Default::default()
    };
    Decoder::open_file(&args.input_file, settings)
}

fn info(args: &CommandLineArgs) -> WebpResult<()> {
    let decoder = create_decoder(args)?;
    let image = decoder.image();
    println!("Image parsed: {}", args.input_file);
    print_data_as_columns(&[
        (
            "Canvas",
            format!("{}x{}", image.canvas_width, image.canvas_height),
        ),
        ("Animated", image.is_animated.to_string()),
        ("Alpha", image.has_alpha.to_string()),
        ("Frames", image.frame_count.to_string()),
        (
            "Loop count",
            if image.loop_count == 0 {
                "infinite".into()
            } else {
                image.loop_count.to_string()
            },
        ),
        ("Duration", format!("{} ms", image.total_duration_ms)),
        ("Background", format_color(&image.background_color)),
        ("File size", format!("{} bytes", image.size_in_bytes)),
    ]);
    for index in 0..image.frame_count {
        let frame = decoder.frame(index)?;
        println!(
            "   * Frame {index}: {}x{} at ({}, {}), {} ms, {}{}{}",
            frame.width,
            frame.height,
            frame.x_offset,
            frame.y_offset,
            frame.duration_ms,
            if frame.blend_with_previous { "blend" } else { "no blend" },
            if frame.has_alpha { ", alpha" } else { "" },
            if frame.is_key_frame() { ", key frame" } else { "" },
        );
    }
    Ok(())
}

fn write_png(filename: &str, width: u32, height: u32, pixels: &[u8]) -> WebpResult<()> {
    let file = File::create(filename).map_err(|err| WebpError::IoError(err.to_string()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().or(Err(WebpError::IoError(
        "Could not write the PNG header".into(),
    )))?;
    writer
        .write_image_data(pixels)
        .or(Err(WebpError::IoError("Could not write PNG image data".into())))?;
    writer.finish().or(Err(WebpError::IoError(
        "Could not finalize the PNG encoder".into(),
    )))?;
    Ok(())
}

fn decode(args: &CommandLineArgs) -> WebpResult<()> {
    let decoder = create_decoder(args)?;
    let image = decoder.image();
    let (width, height) = args
        .size
        .unwrap_or((image.canvas_width, image.canvas_height));
    let target_width = i32::try_from(width).or(Err(WebpError::InvalidArgument))?;
    let target_height = i32::try_from(height).or(Err(WebpError::InvalidArgument))?;
    let stride = target_width
        .checked_mul(4)
        .ok_or(WebpError::InvalidArgument)?;
    let mut pixels = vec![0u8; stride as usize * height as usize];
    let index = args.index.unwrap_or(0);
    decoder.render_nth(index, None, target_width, target_height, stride, &mut pixels)?;
    println!("Frame {index} rendered at {width}x{height}: {}", args.input_file);

    let output_filename = args.output_file.as_deref().unwrap_or_default();
    write_png(output_filename, width, height, &pixels)?;
    println!("Wrote PNG: {output_filename}");
    Ok(())
}

fn validate_args(args: &CommandLineArgs) -> Result<(), String> {
    if !args.info && args.output_file.is_none() {
        return Err("output_file is required when not using --info".into());
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = CommandLineArgs::parse();
    if let Err(err) = validate_args(&args) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
    let res = if args.info { info(&args) } else { decode(&args) };
    match res {
        Ok(_) => std::process::exit(0),
        Err(err) => {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
    }
}
