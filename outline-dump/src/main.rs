//! Prints glyph outlines of a TrueType font as SVG path data.
//!
//! Each glyph is written on its own line as `<label>\t<path data>`. Glyphs
//! that cannot be drawn are reported on stderr and skipped.

use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use glyph_outline::{
    raw::{FontRef, ReadError},
    DrawError, GlyphId, GlyphOutlineCache, GlyphSource, SvgPen, Transform, TrueTypeSource,
};

#[derive(clap::Parser, Debug)]
#[command(about = "Print glyph outlines of a TrueType font as SVG path data")]
struct Args {
    /// Path to the font file
    font: PathBuf,
    /// Glyph identifiers to print (may be repeated)
    #[arg(short, long = "glyph")]
    glyphs: Vec<u32>,
    /// Characters to print, mapped through the font's cmap
    #[arg(short, long)]
    text: Option<String>,
    /// Keep coordinates in font design units instead of ems
    #[arg(long)]
    design_units: bool,
    /// Number of digits printed after the decimal point
    #[arg(long, default_value_t = 4)]
    precision: usize,
}

#[derive(Debug, thiserror::Error)]
enum DumpError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Not a usable font: {0}")]
    Font(#[from] DrawError),
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl From<ReadError> for DumpError {
    fn from(value: ReadError) -> Self {
        Self::Font(value.into())
    }
}

#[derive(Copy, Clone, Debug)]
enum Target {
    Glyph(GlyphId),
    Char(char),
}

impl Target {
    fn label(&self) -> String {
        match self {
            Self::Glyph(gid) => format!("gid{}", gid.to_u32()),
            Self::Char(ch) => format!("U+{:04X}", *ch as u32),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    use clap::Parser as _;
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), DumpError> {
    let data = std::fs::read(&args.font).map_err(|source| DumpError::Io {
        path: args.font.clone(),
        source,
    })?;
    let font = FontRef::new(&data)?;
    let source = TrueTypeSource::new(&font)?;
    let mut cache = if args.design_units {
        GlyphOutlineCache::with_transform(source, Transform::IDENTITY)
    } else {
        GlyphOutlineCache::new(source)
    };
    log::info!(
        "{:?}: {} glyphs, {} units per em",
        args.font,
        cache.num_glyphs(),
        cache.source().units_per_em()
    );

    let mut targets: Vec<Target> = args
        .glyphs
        .iter()
        .map(|gid| Target::Glyph(GlyphId::new(*gid)))
        .collect();
    targets.extend(args.text.iter().flat_map(|text| text.chars()).map(Target::Char));
    if targets.is_empty() {
        targets.extend((0..cache.num_glyphs()).map(|gid| Target::Glyph(GlyphId::new(gid))));
    }

    let mut out = BufWriter::new(io::stdout().lock());
    for target in targets {
        let result = match target {
            Target::Glyph(gid) => cache.path_for_glyph_id(gid),
            Target::Char(ch) => cache.path_for_char(ch as u32),
        };
        match result {
            Ok(path) => {
                let mut pen = SvgPen::with_precision(args.precision);
                path.draw(&mut pen);
                writeln!(out, "{}\t{pen}", target.label())?;
            }
            Err(e) => eprintln!("{}: {e}", target.label()),
        }
    }
    out.flush()?;
    Ok(())
}
