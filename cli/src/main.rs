//! tripdoc CLI - itinerary export tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use tripdoc::{
    CaptureRenderer, CommandRenderer, ExportOptions, Exporter, HtmlFilePrinter, Itinerary,
    Orientation, PageGeometry, PaginationPath, PaperSize, Renderer, SurfaceOptions, WriteOptions,
};

#[derive(Parser)]
#[command(name = "tripdoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Export travel itineraries to paginated PDF or a printable page", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export an itinerary to PDF
    Export {
        /// Itinerary JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file or directory (suggested name from the title if a directory)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Use an existing PNG/JPEG capture instead of running a rasterizer
        #[arg(long, value_name = "IMAGE", conflicts_with = "renderer")]
        capture: Option<PathBuf>,

        /// Rasterizer command with {input}, {output}, {width}, {zoom} placeholders
        #[arg(long, value_name = "CMD", env = "TRIPDOC_RENDERER")]
        renderer: Option<String>,

        #[command(flatten)]
        page: PageArgs,

        /// Capture width in CSS pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Capture device-pixel scale
        #[arg(long, default_value = "2.0")]
        scale: f32,

        /// Encode pages on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Write the printable HTML document
    Print {
        /// Itinerary JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (suggested name from the title if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show how a capture of the given size would be paginated
    Plan {
        /// Capture height in pixels
        #[arg(long)]
        height: u32,

        /// Capture width in pixels
        #[arg(long, default_value = "1600")]
        width: u32,

        #[command(flatten)]
        page: PageArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the sample itinerary as JSON
    Init {
        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show itinerary information
    Info {
        /// Itinerary JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct PageArgs {
    /// Paper size (a4, a5, letter, legal)
    #[arg(long, default_value = "a4", value_parser = parse_paper)]
    paper: PaperSize,

    /// Landscape orientation
    #[arg(long)]
    landscape: bool,

    /// Top margin in millimeters
    #[arg(long, default_value = "10")]
    margin: f64,
}

impl PageArgs {
    fn geometry(&self) -> PageGeometry {
        let orientation = if self.landscape {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };
        PageGeometry::paper(self.paper, orientation).with_top_margin(self.margin)
    }
}

fn parse_paper(name: &str) -> Result<PaperSize, String> {
    PaperSize::parse(name).ok_or_else(|| {
        format!(
            "unknown paper size '{}' (expected a4, a5, letter or legal)",
            name
        )
    })
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Export {
            input,
            output,
            capture,
            renderer,
            page,
            width,
            scale,
            sequential,
        }) => {
            let surface = SurfaceOptions::new().with_width(width).with_scale(scale);
            let mut write = WriteOptions::new();
            if sequential {
                write = write.sequential();
            }
            let options = ExportOptions::new()
                .with_geometry(page.geometry())
                .with_surface(surface)
                .with_write_options(write);
            match (capture, renderer) {
                (Some(path), _) => {
                    cmd_export(&input, output.as_deref(), CaptureRenderer::from_path(path), options)
                }
                (None, Some(cmd)) => match CommandRenderer::parse(&cmd) {
                    Ok(r) => cmd_export(&input, output.as_deref(), r, options),
                    Err(e) => Err(e.into()),
                },
                (None, None) => cmd_export(
                    &input,
                    output.as_deref(),
                    CommandRenderer::default(),
                    options,
                ),
            }
        }
        Some(Commands::Print { input, output }) => cmd_print(&input, output.as_deref()),
        Some(Commands::Plan {
            height,
            width,
            page,
            json,
        }) => cmd_plan(width, height, &page.geometry(), json),
        Some(Commands::Init { output }) => cmd_init(output.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: tripdoc <COMMAND>".yellow());
            println!("       tripdoc --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_export<R: Renderer>(
    input: &Path,
    output: Option<&Path>,
    renderer: R,
    options: ExportOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Loading itinerary...");
    let itinerary = Itinerary::from_path(input)?;
    pb.inc(1);

    log::debug!("loaded itinerary '{}' from {}", itinerary.title, input.display());

    pb.set_message(format!("Rendering with {}...", renderer.name()));
    log::debug!("rendering with {}", renderer.name());
    let exporter = Exporter::new(renderer).with_options(options);
    let result = exporter.export(&itinerary)?;
    pb.inc(1);

    pb.set_message("Saving PDF...");
    let path = match output {
        Some(p) if p.is_dir() => p.join(&result.filename),
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(&result.filename),
    };
    log::debug!("writing {} bytes to {}", result.len(), path.display());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &result.pdf)?;
    pb.inc(1);
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} ({} page{})",
        "Saved to".green(),
        path.display(),
        result.page_count(),
        if result.page_count() == 1 { "" } else { "s" }
    );

    Ok(())
}

fn cmd_print(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let itinerary = Itinerary::from_path(input)?;
    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(itinerary.suggested_filename("html")));
    log::debug!("writing print document to {}", path.display());

    tripdoc::print(&itinerary, &HtmlFilePrinter::new(&path))?;
    println!("{} {}", "Saved to".green(), path.display());
    println!("{}", "Open it in a browser to print.".dimmed());

    Ok(())
}

fn cmd_plan(
    width: u32,
    height: u32,
    geometry: &PageGeometry,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let plan = tripdoc::plan(width, height, geometry)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let unit = geometry.unit.label();
    println!("{}", "Pagination Plan".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {} x {} px", "Source".bold(), width, height);
    println!(
        "{}: {} x {} {}",
        "Page".bold(),
        geometry.width,
        geometry.height,
        unit
    );
    match plan.path {
        PaginationPath::SinglePage => {
            println!(
                "{}: single page (scale {:.3})",
                "Path".bold(),
                plan.scale.unwrap_or(1.0)
            );
        }
        PaginationPath::MultiPage => {
            println!(
                "{}: {} rows per page",
                "Path".bold(),
                plan.slice_height_px.unwrap_or_default()
            );
        }
    }
    println!("{}: {}", "Pages".bold(), plan.page_count());
    println!();

    for slice in &plan.slices {
        println!(
            "  {} rows {:>6}..{:<6} at ({:.1}, {:.1}) {:.1} x {:.1} {}",
            format!("#{}", slice.number).as_str().dimmed(),
            slice.source_top,
            slice.source_top + slice.rows,
            slice.placement.x,
            slice.placement.y,
            slice.placement.width,
            slice.placement.height,
            unit
        );
    }

    Ok(())
}

fn cmd_init(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = Itinerary::default().to_json_pretty()?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let itinerary = Itinerary::from_path(input)?;

    println!("{}", "Itinerary Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), itinerary.title);
    println!("{}: {}", "Duration".bold(), itinerary.total_duration);
    println!("{}: {}", "Travellers".bold(), itinerary.travellers);
    if !itinerary.hotel.name.is_empty() {
        println!(
            "{}: {} ({} nights)",
            "Hotel".bold(),
            itinerary.hotel.name,
            itinerary.hotel.stay_nights()
        );
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Days".bold(), itinerary.days.len());
    println!("{}: {}", "Transports".bold(), itinerary.transport_count());
    println!("{}: {}", "Payments".bold(), itinerary.payments.len());
    println!(
        "{}: {}",
        "PDF name".bold(),
        itinerary.suggested_filename("pdf")
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "tripdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Travel itinerary export tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/tripdoc".dimmed());
    println!("License: MIT");
}
