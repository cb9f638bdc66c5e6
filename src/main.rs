use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use planmarker::draw::{Annotation, Background, PlanCanvas};
use planmarker::{Config, FileRecord};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "planmarker")]
#[command(version, about = "Plan annotation editor for floor-plan images")]
struct Cli {
    /// Use this config file instead of ~/.config/planmarker/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rasterize a file record's background and annotations to a PNG
    Render {
        /// File record (JSON)
        record: PathBuf,
        /// Output PNG
        #[arg(long, short = 'o', value_name = "PNG")]
        output: PathBuf,
    },
    /// Replace a record's content with its annotations drawn in
    Bake {
        /// File record (JSON)
        record: PathBuf,
        /// Write the updated record here instead of stdout
        #[arg(long, short = 'o', value_name = "JSON")]
        output: Option<PathBuf>,
    },
    /// Build a file record with no annotations from an image
    Import {
        /// PNG, JPEG, WebP, GIF or BMP image
        image: PathBuf,
        /// Write the record here instead of stdout
        #[arg(long, short = 'o', value_name = "JSON")]
        output: Option<PathBuf>,
    },
    /// List the annotations stored in a file record
    Inspect {
        /// File record (JSON)
        record: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render { record, output } => {
            let config = load_config(cli.config.as_deref())?;
            let file = read_record(&record)?;
            let mut canvas = paint(&file, &config)?;
            let (_, bytes) = canvas
                .encode("image/png")
                .context("Failed to encode composite")?;
            fs::write(&output, bytes)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            log::info!("Rendered {} annotations to {}", file.annotations.len(), output.display());
        }
        Command::Bake { record, output } => {
            let config = load_config(cli.config.as_deref())?;
            let mut file = read_record(&record)?;
            let mut canvas = paint(&file, &config)?;
            let content = canvas
                .to_data_uri(&file.mime_type)
                .context("Failed to encode composite")?;
            let annotations = file.annotations.clone();
            file.apply_edit(content, annotations);
            write_record(&file, output.as_deref())?;
        }
        Command::Import { image, output } => {
            let file = FileRecord::from_image_file(&image)
                .with_context(|| format!("Failed to import {}", image.display()))?;
            write_record(&file, output.as_deref())?;
        }
        Command::Inspect { record } => {
            let file = read_record(&record)?;
            println!("{} ({})", file.name, file.mime_type);
            match Background::decode(&file.content) {
                Ok(background) => println!("{}x{}", background.width(), background.height()),
                Err(err) => println!("background unreadable: {err}"),
            }
            println!("{} annotations", file.annotations.len());
            for (index, annotation) in file.annotations.iter().enumerate() {
                println!("  {index:>3}  {}", describe(annotation));
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn read_record(path: &Path) -> Result<FileRecord> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    FileRecord::from_json(&json).with_context(|| format!("Invalid file record {}", path.display()))
}

fn write_record(file: &FileRecord, output: Option<&Path>) -> Result<()> {
    let json = file.to_json().context("Failed to serialize file record")?;
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn paint(file: &FileRecord, config: &Config) -> Result<PlanCanvas> {
    let background = Background::decode(&file.content)
        .with_context(|| format!("Failed to decode background of '{}'", file.name))?;
    let mut canvas = PlanCanvas::new(config.render_style());
    canvas
        .repaint(Some(&background), &file.annotations, None)
        .context("Failed to paint composite")?;
    Ok(canvas)
}

fn describe(annotation: &Annotation) -> String {
    match annotation {
        Annotation::Socket { x, y } => format!("socket ({x:.0}, {y:.0})"),
        Annotation::Switch { x, y } => format!("switch ({x:.0}, {y:.0})"),
        Annotation::Lan { x, y } => format!("lan    ({x:.0}, {y:.0})"),
        Annotation::Tv { x, y } => format!("tv     ({x:.0}, {y:.0})"),
        Annotation::Text {
            x,
            y,
            text,
            color,
            font_size,
        } => format!("text   ({x:.0}, {y:.0}) {text:?} {color} {font_size:.0}px"),
        Annotation::Arrow { x, y, x2, y2, .. } => {
            format!("arrow  ({x:.0}, {y:.0}) -> ({x2:.0}, {y2:.0})")
        }
        Annotation::Line { x, y, x2, y2, .. } => {
            format!("line   ({x:.0}, {y:.0}) -> ({x2:.0}, {y2:.0})")
        }
        Annotation::Frame {
            x,
            y,
            width,
            height,
            ..
        } => format!("frame  ({x:.0}, {y:.0}) {width:.0}x{height:.0}"),
    }
}
