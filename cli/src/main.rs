//! adweave CLI - ad placement and gallery grouping for article HTML

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use adweave::{
    gallery, Adweave, Document, GalleryOptions, JsonFormat, PlacementOptions, PlacementStats,
};

#[derive(Parser)]
#[command(name = "adweave")]
#[command(version)]
#[command(about = "Place ad slots and image galleries in article HTML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split HTML into content blocks with ad slots between them
    Place {
        /// Input HTML files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (stdout for a single file if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Group consecutive images into galleries first
        #[arg(long)]
        galleries: bool,

        #[command(flatten)]
        placement: PlacementArgs,
    },

    /// Wrap runs of consecutive images in gallery containers
    Gallery {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Gallery wrapper class
        #[arg(long, default_value = "gallery")]
        wrapper_class: String,
    },

    /// Show parsed blocks and placement statistics
    Inspect {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        placement: PlacementArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct PlacementArgs {
    /// JSON file with placement options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Target words between ads
    #[arg(long, env = "ADWEAVE_WORDS_PER_AD")]
    words_per_ad: Option<usize>,

    /// Documents shorter than this get no ads
    #[arg(long, env = "ADWEAVE_MIN_WORDS")]
    min_words: Option<usize>,

    /// Floor on the ad count
    #[arg(long, env = "ADWEAVE_MIN_ADS")]
    min_ads: Option<usize>,

    /// Ceiling on the ad count
    #[arg(long, env = "ADWEAVE_MAX_ADS")]
    max_ads: Option<usize>,
}

impl PlacementArgs {
    /// Config file values, overridden by flags and environment.
    fn resolve(&self) -> Result<PlacementOptions, Box<dyn std::error::Error>> {
        let mut options = match self.config {
            Some(ref path) => PlacementOptions::from_file(path)?,
            None => PlacementOptions::default(),
        };

        if let Some(words) = self.words_per_ad {
            options = options.with_words_per_ad(words);
        }
        if let Some(words) = self.min_words {
            options = options.with_min_words(words);
        }
        if let Some(ads) = self.min_ads {
            options = options.with_min_ads(ads);
        }
        if let Some(ads) = self.max_ads {
            options = options.with_max_ads(ads);
        }

        options.validate()?;
        Ok(options)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// HTML with ad slot containers
    Html,
    /// Segment list as JSON
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Place {
            inputs,
            output,
            format,
            compact,
            galleries,
            placement,
        }) => cmd_place(
            &inputs,
            output.as_deref(),
            format,
            compact,
            galleries,
            &placement,
        ),
        Some(Commands::Gallery {
            input,
            output,
            wrapper_class,
        }) => cmd_gallery(&input, output.as_deref(), &wrapper_class),
        Some(Commands::Inspect { input, placement }) => cmd_inspect(&input, &placement),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: adweave <COMMAND> <FILE>".yellow());
            println!("       adweave --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_place(
    inputs: &[PathBuf],
    output: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    galleries: bool,
    args: &PlacementArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let weaver = Adweave::new()
        .with_placement_options(args.resolve()?)
        .with_galleries(galleries);
    let json_format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    // A single file without an output dir goes to stdout
    if inputs.len() == 1 && output.is_none() {
        let result = weaver.process_file(&inputs[0])?;
        match format {
            OutputFormat::Html => println!("{}", result.to_html()),
            OutputFormat::Json => println!("{}", result.to_json(json_format)?),
        }
        return Ok(());
    }

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("adweave_output"));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut totals = PlacementStats::new();
    let mut written = Vec::with_capacity(inputs.len());
    for input in inputs {
        pb.set_message(input.display().to_string());

        let result = weaver.process_file(input)?;
        let rendered = match format {
            OutputFormat::Html => result.to_html(),
            OutputFormat::Json => result.to_json(json_format)?,
        };

        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let name = format!("{}.{}", stem, format.extension());
        fs::write(output_dir.join(&name), rendered)?;

        totals.merge(&result.stats());
        written.push(name);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, name) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), name);
    }
    println!(
        "\n{} {} ads across {} documents",
        "Placed".green().bold(),
        totals.ad_count,
        totals.document_count
    );

    Ok(())
}

fn cmd_gallery(
    input: &Path,
    output: Option<&Path>,
    wrapper_class: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let markup = fs::read_to_string(input)?;
    let options = GalleryOptions::new().with_wrapper_class(wrapper_class);
    let result = gallery::group_document(&Document::parse(&markup), &options);

    if let Some(path) = output {
        fs::write(path, &result.markup)?;
        println!(
            "{} {} ({} galleries)",
            "Saved to".green(),
            path.display(),
            result.gallery_count()
        );
    } else {
        println!("{}", result.markup);
    }

    Ok(())
}

fn cmd_inspect(input: &Path, args: &PlacementArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.resolve()?;
    let result = Adweave::new()
        .with_placement_options(options.clone())
        .process_file(input)?;
    let doc = &result.document;

    println!("{}", "Blocks".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (i, node) in doc.nodes().iter().enumerate() {
        let status = if i + 1 == doc.len() {
            "last".dimmed()
        } else if node.allows_ad_after() {
            "ad ok".green()
        } else {
            "blocked".yellow()
        };
        println!(
            "{:>4}  {:<10} {:>6} words  {}",
            i,
            node.kind.tag(),
            node.word_count,
            status
        );
    }

    let stats = result.stats();
    println!();
    println!("{}", "Placement Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Blocks".bold(), stats.block_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Dividers".bold(), stats.divider_count);
    println!("{}: {}", "Image blocks".bold(), stats.image_block_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!(
        "{}: {} (aimed for {}, bounds {}..={})",
        "Ads".bold(),
        stats.ad_count,
        stats.desired_ads,
        options.min_ads,
        options.max_ads
    );
    if let Some(avg) = stats.words_per_ad() {
        println!("{}: {:.0}", "Words per ad".bold(), avg);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "adweave".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Ad placement and gallery grouping tool");
    println!();
    println!("License: MIT");
}
