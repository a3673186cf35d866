//! Main file, yeah
//!
//! Draws one procedural image per run and saves it as png.

#![deny(
	unreachable_patterns, // because if it is, it's probably a bug that appeared after changing something
)]

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{DateTime, Local};
use clap::{Args, Parser, Subcommand};
use tracing::Level;

use function_tree_art::{
	field::AngleField,
	float,
	hsv_image::{HsvImage, DEFAULT_COMPLEXITY},
	squares::SquaresImage,
	ChannelRole,
	Seed,
};


#[derive(Parser, Debug)]
#[clap(
	about,
	author,
	version,
	help_template = "\
		{before-help}{name} v{version}\n\
		{about}\n\
		Author: {author}\n\
		\n\
		{usage-heading} {usage}\n\
		\n\
		{all-args}{after-help}\
	",
)]
struct CliArgsPre {
	#[command(subcommand)]
	kind: ImageKind,

	#[command(flatten)]
	common: CommonArgs,
}

#[derive(Args, Debug)]
struct CommonArgs {
	#[arg(short='s', long, global=true, default_value="1200,800")]
	image_sizes: String,

	/// Name of the image: seeds the randomness and names the output file.
	#[arg(short='n', long, global=true)]
	name: Option<String>,

	/// Numeric seed, used when no name is given.
	#[arg(long, global=true)]
	seed: Option<u64>,

	#[arg(short='o', long, global=true, default_value=".")]
	out_dir: PathBuf,

	#[arg(short='v', long, global=true, default_value_t=false)]
	verbose: bool,
}

#[derive(Subcommand, Debug)]
enum ImageKind {
	/// Hue, saturation and value from three trees.
	Hsv {
		/// Complexities of hue, saturation and value trees.
		#[arg(short='c', long, default_value="0.6,0.6,0.6")]
		complexities: String,
		/// Channels to replace by a flat band of their shift.
		#[arg(long, value_delimiter=',')]
		hide: Vec<ChannelRole>,
	},
	/// Grid of flat tiles, coloured by red, green and blue trees.
	Squares {
		#[arg(short='b', long, default_value_t=40)]
		box_size: u32,
		#[arg(short='c', long, default_value_t=DEFAULT_COMPLEXITY)]
		complexity: float,
	},
	/// Force field directions, coloured by angle.
	Field {
		#[arg(long, default_value_t=5)]
		node_step: u32,
		#[arg(short='f', long, default_value_t=1.)]
		force: float,
	},
}

impl ImageKind {
	fn prefix(&self) -> &'static str {
		match self {
			Self::Hsv { .. } => "hsv",
			Self::Squares { .. } => "squares",
			Self::Field { .. } => "field",
		}
	}
}

/// Post-Processed CliArgs
struct CliArgsPost {
	image_w: u32,
	image_h: u32,
	seed: Seed,
	filename: PathBuf,
	kind: ImageKindPost,
}

enum ImageKindPost {
	Hsv { complexities: [float; 3], hide: Vec<ChannelRole> },
	Squares { box_size: u32, complexity: float },
	Field { node_step: u32, force: float },
}

impl CliArgsPost {
	fn from_pre(CliArgsPre { kind, common }: CliArgsPre, now: DateTime<Local>) -> anyhow::Result<Self> {
		let CommonArgs { image_sizes, name, seed, out_dir, verbose: _ } = common;
		let (image_w, image_h) = parse_sizes(&image_sizes)?;
		let seed = match (&name, seed) {
			(Some(name), _) => Seed::from_name(name),
			(None, Some(seed)) => Seed::from_u64(seed),
			(None, None) => Seed::random(),
		};
		let filename = match &name {
			Some(name) => format!("{name}.png"),
			None => format!("{prefix}_{now}.png", prefix=kind.prefix(), now=now.to_my_format()),
		};
		let kind = match kind {
			ImageKind::Hsv { complexities, hide } => ImageKindPost::Hsv {
				complexities: parse_complexities(&complexities)?,
				hide,
			},
			ImageKind::Squares { box_size, complexity } => ImageKindPost::Squares { box_size, complexity },
			ImageKind::Field { node_step, force } => ImageKindPost::Field { node_step, force },
		};
		Ok(Self { image_w, image_h, seed, filename: out_dir.join(filename), kind })
	}
}

fn parse_sizes(image_sizes: &str) -> anyhow::Result<(u32, u32)> {
	let (w, h) = image_sizes.split_once(',')
		.with_context(|| format!("cant split image sizes `{image_sizes}` by comma"))?;
	let w: u32 = w.trim().parse().context("cant parse image width as integer")?;
	let h: u32 = h.trim().parse().context("cant parse image height as integer")?;
	if w == 0 || h == 0 {
		bail!("image sizes must be positive, but they are {w}x{h}");
	}
	Ok((w, h))
}

fn parse_complexities(complexities: &str) -> anyhow::Result<[float; 3]> {
	let values = complexities.split(',')
		.map(|s| s.trim().parse::<float>().with_context(|| format!("cant parse complexity `{s}`")))
		.collect::<anyhow::Result<Vec<float>>>()?;
	match values.as_slice() {
		&[c] => Ok([c; 3]),
		&[h, s, v] => Ok([h, s, v]),
		_ => bail!("expected one or three complexities, but got {}", values.len()),
	}
}


fn main() -> anyhow::Result<()> {
	let timestamp_program_start = Local::now();
	let cli_args = CliArgsPre::parse();
	tracing_subscriber::fmt()
		.with_max_level(if cli_args.common.verbose { Level::DEBUG } else { Level::INFO })
		.init();
	let cli_args = CliArgsPost::from_pre(cli_args, timestamp_program_start)?;
	tracing::info!(seed = %cli_args.seed, w = cli_args.image_w, h = cli_args.image_h, "drawing");

	let img = draw(&cli_args)?;

	img.save(&cli_args.filename)
		.with_context(|| format!("unable to save image to {}", cli_args.filename.display()))?;
	println!("DONE: {}", cli_args.filename.display());
	Ok(())
}

fn draw(cli_args: &CliArgsPost) -> anyhow::Result<image::RgbImage> {
	let (w, h) = (cli_args.image_w, cli_args.image_h);
	let img = match &cli_args.kind {
		ImageKindPost::Hsv { complexities, hide } => {
			let mut hsv = HsvImage::new(w, h, &cli_args.seed, *complexities)?;
			for &role in hide {
				hsv.set_visible(role, false)?;
			}
			hsv.render()
		}
		ImageKindPost::Squares { box_size, complexity } => {
			SquaresImage::new(w, h, *box_size, &cli_args.seed, *complexity)?.render()
		}
		ImageKindPost::Field { node_step, force } => {
			AngleField::new(w, h, *node_step, *force, &cli_args.seed)?.render()
		}
	};
	Ok(img)
}


pub trait ExtensionDateTimeLocalToMyFormat {
	fn to_my_format(&self) -> String;
}
impl ExtensionDateTimeLocalToMyFormat for DateTime<Local> {
	fn to_my_format(&self) -> String {
		self.format("%Y-%m-%d_%H-%M-%S%.3f").to_string()
	}
}
