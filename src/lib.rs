//! Annofactory: bounding-box annotation conversion.
//!
//! Annofactory moves object-detection annotations between a normalized
//! in-memory record, Pascal VOC XML and YOLO label text.
//!
//! # Modules
//!
//! - [`ir`]: Record types, coordinate transforms and per-format I/O
//! - [`validation`]: Structural validation of incoming records
//! - [`conversion`]: VOC / YOLO files to normalized records
//! - [`writer`]: Normalized records to VOC / YOLO files
//! - [`error`]: Error types for annofactory operations
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use annofactory::ir::io_voc_xml::{VocImageInfo, VocObjectMeta};
//! use annofactory::ir::{Annotation, ImageSize, Region};
//! use annofactory::writer::AnnotationWriter;
//!
//! let apples = Annotation::new(Region::new(0.288, 0.412, 0.291, 0.424))
//!     .with_tag_name("apples")
//!     .with_tag_id(0);
//!
//! let mut writer = AnnotationWriter::new();
//! writer.init_voc(VocImageInfo::new("test.jpg", ImageSize::new(608.0, 608.0)));
//! writer.init_yolo();
//! writer.add_voc_object(&apples, VocObjectMeta::default())?;
//! writer.add_yolo_object(&apples)?;
//! writer.save_voc(Path::new("test.xml"))?;
//! writer.save_yolo(Path::new("test.txt"))?;
//! # Ok::<(), annofactory::AnnofactoryError>(())
//! ```

pub mod conversion;
pub mod error;
pub mod ir;
pub mod validation;
pub mod writer;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

pub use error::AnnofactoryError;

use ir::io_voc_xml::{VocImageInfo, VocObjectMeta};
use ir::{Annotation, CornerConvention, ImageSize};
use writer::AnnotationWriter;

/// The annofactory CLI application.
#[derive(Parser)]
#[command(name = "annofactory")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// How VOC corners map onto region width/height.
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = ConventionArg::EdgeFractions,
        env = "ANNOFACTORY_CORNER_CONVENTION"
    )]
    corner_convention: ConventionArg,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// CLI-facing corner convention, decoupled from the library enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ConventionArg {
    /// width/height hold the right/bottom edge fraction (legacy files).
    EdgeFractions,
    /// width/height hold the true box size.
    BoxSize,
}

impl From<ConventionArg> for CornerConvention {
    fn from(value: ConventionArg) -> Self {
        match value {
            ConventionArg::EdgeFractions => CornerConvention::EdgeFractions,
            ConventionArg::BoxSize => CornerConvention::BoxSize,
        }
    }
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a VOC XML file into annotation records (JSON).
    FromVoc(FromVocArgs),
    /// Convert a YOLO label file into annotation records (JSON).
    FromYolo(FromYoloArgs),
    /// Write annotation records (JSON) as a VOC XML file.
    ToVoc(ToVocArgs),
    /// Write annotation records (JSON) as a YOLO label file.
    ToYolo(ToYoloArgs),
}

#[derive(clap::Args)]
struct FromVocArgs {
    /// VOC XML file to read.
    input: PathBuf,

    /// Output JSON file (prints to stdout when omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct FromYoloArgs {
    /// YOLO label file to read.
    input: PathBuf,

    /// Class list file used to resolve class indices into names.
    #[arg(long)]
    classes: Option<PathBuf>,

    /// Output JSON file (prints to stdout when omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct ToVocArgs {
    /// JSON file with annotation records.
    input: PathBuf,

    /// Output VOC XML file.
    #[arg(short, long)]
    output: PathBuf,

    /// Image file name recorded in the document.
    #[arg(long)]
    filename: String,

    /// Image width in pixels.
    #[arg(long)]
    width: f64,

    /// Image height in pixels.
    #[arg(long)]
    height: f64,

    /// Folder recorded in the document.
    #[arg(long, default_value = ir::io_voc_xml::DEFAULT_FOLDER)]
    folder: String,

    /// Image depth (channels).
    #[arg(long, default_value_t = ir::io_voc_xml::DEFAULT_DEPTH)]
    depth: u32,

    /// Source database name.
    #[arg(long, default_value = ir::io_voc_xml::DEFAULT_DATABASE)]
    database: String,

    /// Segmented flag.
    #[arg(long, default_value_t = 0)]
    segmented: u32,
}

#[derive(clap::Args)]
struct ToYoloArgs {
    /// JSON file with annotation records.
    input: PathBuf,

    /// Output YOLO label file.
    #[arg(short, long)]
    output: PathBuf,
}

/// Run the annofactory CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), AnnofactoryError> {
    let cli = Cli::parse();
    let convention = CornerConvention::from(cli.corner_convention);

    match cli.command {
        Some(Commands::FromVoc(args)) => run_from_voc(args, convention),
        Some(Commands::FromYolo(args)) => run_from_yolo(args),
        Some(Commands::ToVoc(args)) => run_to_voc(args, convention),
        Some(Commands::ToYolo(args)) => run_to_yolo(args),
        None => {
            println!("annofactory {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Convert bounding-box annotations between records, VOC and YOLO.");
            println!();
            println!("Run 'annofactory --help' for usage information.");
            Ok(())
        }
    }
}

fn run_from_voc(args: FromVocArgs, convention: CornerConvention) -> Result<(), AnnofactoryError> {
    let records = conversion::convert_voc_from_path_with(&args.input, convention)?;
    emit_records(&records, args.output.as_deref())
}

fn run_from_yolo(args: FromYoloArgs) -> Result<(), AnnofactoryError> {
    let records = conversion::convert_yolo_from_path(&args.input, args.classes.as_deref())?;
    emit_records(&records, args.output.as_deref())
}

fn run_to_voc(args: ToVocArgs, convention: CornerConvention) -> Result<(), AnnofactoryError> {
    let records = ir::io_json::read_records(&args.input)?;

    let info = VocImageInfo::new(args.filename, ImageSize::new(args.width, args.height))
        .with_folder(args.folder)
        .with_depth(args.depth)
        .with_database(args.database)
        .with_segmented(args.segmented);

    let mut writer = AnnotationWriter::new().with_convention(convention);
    writer.init_voc(info);
    for record in &records {
        writer.add_voc_object(record, VocObjectMeta::default())?;
    }
    writer.save_voc(&args.output)?;

    println!(
        "Wrote {} object(s) to {}",
        records.len(),
        args.output.display()
    );
    Ok(())
}

fn run_to_yolo(args: ToYoloArgs) -> Result<(), AnnofactoryError> {
    let records = ir::io_json::read_records(&args.input)?;

    let mut writer = AnnotationWriter::new();
    writer.init_yolo();
    for record in &records {
        writer.add_yolo_object(record)?;
    }
    writer.save_yolo(&args.output)?;

    println!(
        "Wrote {} object(s) to {}",
        records.len(),
        args.output.display()
    );
    Ok(())
}

fn emit_records(records: &[Annotation], output: Option<&Path>) -> Result<(), AnnofactoryError> {
    match output {
        Some(path) => ir::io_json::write_records(path, records),
        None => {
            let json = ir::io_json::to_json_string(records).map_err(|source| {
                AnnofactoryError::RecordJsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").map_err(AnnofactoryError::Io)
        }
    }
}
