//! # Labelsheet CLI
//!
//! Command-line interface for printing onto label sheets.
//!
//! ## Usage
//!
//! ```bash
//! # List available templates
//! labelsheet templates
//!
//! # Show label boxes for a template, in points
//! labelsheet grid 3x7
//!
//! # Print address blocks (separated by blank lines) from a file
//! labelsheet print 3x7 --input addresses.txt --out labels.ps
//!
//! # Skip the first 5 labels of a partly used sheet, read from stdin
//! cat addresses.txt | labelsheet print L7163 --skip 5 --colour navy
//!
//! # Print an address book, one page per sheet
//! labelsheet book 2x7 people.json --category family --out-dir /tmp
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use labelsheet::{
    Config, LabelError, book,
    emit::emit,
    logging,
    scene::{Colour, NamedColour, RectItem, Scene, blocks},
    sheet::{
        Label, Page, Sheet, compute_grid, compute_preview_grid,
        units::{PAGE_HEIGHT, PAGE_WIDTH, PREVIEW_OFFSET, points_to_mm},
    },
};

/// Labelsheet - Label sheet layout and PostScript output
#[derive(Parser, Debug)]
#[command(name = "labelsheet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with extra templates, colours and defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available templates
    Templates,

    /// Show the label boxes of a template
    Grid {
        /// Template name or product code (defaults to the configured template)
        template: Option<String>,

        /// Scale factor applied to the layout
        #[arg(long, default_value = "1.0")]
        scale: f32,

        /// Show the slot icon grid instead of the page grid
        #[arg(long)]
        preview: bool,

        /// Also write the boxes as outlines to a PostScript file
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Print address blocks onto a sheet
    Print {
        /// Template name or product code (defaults to the configured template)
        template: Option<String>,

        /// Address file, blocks separated by blank lines ("-" for stdin)
        #[arg(long, short, value_name = "FILE", default_value = "-")]
        input: String,

        /// Output PostScript file
        #[arg(long, short, value_name = "FILE", default_value = "labels.ps")]
        out: PathBuf,

        /// Text colour: a colour name or #rrggbb
        #[arg(long)]
        colour: Option<Colour>,

        /// Font family
        #[arg(long)]
        font: Option<String>,

        /// Font size in points
        #[arg(long)]
        size: Option<f32>,

        /// Keep the label outlines in the output
        #[arg(long)]
        guides: bool,

        /// Number of labels already used on the sheet
        #[arg(long, default_value = "0")]
        skip: usize,

        /// Image printed behind every label
        #[arg(long, value_name = "FILE")]
        background: Option<PathBuf>,
    },

    /// Print an address book, one page per sheet
    Book {
        /// Template name or product code
        template: String,

        /// JSON list of entries: [{"name": ..., "lines": [...]}, ...]
        entries: PathBuf,

        /// Category shown in the page header
        #[arg(long)]
        category: Option<String>,

        /// Directory receiving book-<n>.ps
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LabelError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Templates => list_templates(&config),

        Commands::Grid {
            template,
            scale,
            preview,
            out,
        } => {
            let name = template.unwrap_or_else(|| config.defaults.template.clone());
            let page = if preview {
                compute_preview_grid(
                    &config.templates,
                    &name,
                    scale,
                    PREVIEW_OFFSET.0 as i32,
                    PREVIEW_OFFSET.1 as i32,
                )?
            } else {
                compute_grid(&config.templates, &name, scale)?
            };
            print_grid(&page);

            if let Some(path) = out {
                let scene = outline_scene(&page);
                let n = emit(&scene, &config.colours, PAGE_WIDTH, PAGE_HEIGHT, &path)?;
                println!("Wrote {} outlines to {}", n, path.display());
            }
        }

        Commands::Print {
            template,
            input,
            out,
            colour,
            font,
            size,
            guides,
            skip,
            background,
        } => {
            let name = template.unwrap_or_else(|| config.defaults.template.clone());
            let mut sheet = Sheet::new(&config.templates, &name)?;
            sheet.reserve_first(skip);
            if let Some(path) = background {
                sheet.set_background(Some(load_image(&path)?));
            }

            let mut typeface = config.defaults.typeface.clone();
            if let Some(family) = font {
                typeface.family = family;
            }
            if let Some(size) = size {
                typeface.size = size;
            }
            let colour = colour.unwrap_or(config.defaults.colour);

            let addresses = blocks(&read_input(&input)?);
            for address in addresses {
                sheet.place(Label::new(address).colour(colour).typeface(typeface.clone()))?;
            }

            let n = if guides {
                emit(&sheet.scene(true), &config.colours, PAGE_WIDTH, PAGE_HEIGHT, &out)?
            } else {
                sheet.print(&config.colours, &out)?
            };
            println!(
                "Wrote {} labels ({} primitives) to {}",
                sheet.filled_count(),
                n,
                out.display()
            );
        }

        Commands::Book {
            template,
            entries,
            category,
            out_dir,
        } => {
            let list = book::load_entries(&entries)?;
            let category = category.unwrap_or_else(|| config.defaults.category.clone());

            let style = book::BookStyle {
                colour: config.defaults.colour,
                ..book::BookStyle::default()
            };
            let pages = book::paginate(&config.templates, &template, &category, &list, &style)?;
            let written = book::write_pages(&pages, &config.colours, &out_dir)?;
            for path in &written {
                println!("{}", path.display());
            }
            println!("Wrote {} entries on {} pages", list.len(), written.len());
        }
    }

    Ok(())
}

fn list_templates(config: &Config) {
    println!("Available templates:");
    for name in config.templates.names() {
        let Ok(t) = config.templates.get(name) else {
            continue;
        };
        let aliases: Vec<&str> = config.templates.aliases_of(name).collect();
        let marker = if name == config.defaults.template { " (default)" } else { "" };
        println!(
            "  {:<10} {} x {}  {:.1} x {:.1} mm  {}{}",
            name,
            t.columns,
            t.rows,
            points_to_mm(t.cell_width),
            points_to_mm(t.cell_height),
            aliases.join(", "),
            marker
        );
    }
}

/// One line per row, boxes rounded to whole points.
fn print_grid(page: &Page) {
    for row in page.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|b| {
                format!(
                    "({} {} {} {})",
                    b.x0.round(),
                    b.y0.round(),
                    b.x1.round(),
                    b.y1.round()
                )
            })
            .collect();
        println!("{}", cells.join(" "));
    }
}

fn outline_scene(page: &Page) -> Scene {
    let mut builder = Scene::builder();
    for bbox in page.boxes() {
        builder.add(RectItem::outline(*bbox, NamedColour::Grey64));
    }
    builder.build()
}

fn read_input(input: &str) -> Result<String, LabelError> {
    if input == "-" {
        Ok(std::io::read_to_string(std::io::stdin())?)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn load_image(path: &Path) -> Result<image::RgbImage, LabelError> {
    let img = image::open(path)
        .map_err(|e| LabelError::Input(format!("failed to load {}: {}", path.display(), e)))?;
    Ok(img.to_rgb8())
}
