use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rasterfont::color::{BLACK, WHITE};
use rasterfont::config::{self, GeneratorConfig};
use rasterfont::error::FontError;
use rasterfont::export::{self, codegen};
use rasterfont::font::{Font, OutlineFont};
use rasterfont::glyphmap::{self, GlyphMap};
use rasterfont::layout;
use rasterfont::surface::Canvas;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("rasterfont {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if args.iter().any(|a| a == "--help" || a == "-h") || args.len() < 2 {
        print_help();
        return if args.len() < 2 {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--print-config") {
        let config = GeneratorConfig::default();
        match toml::to_string_pretty(&config) {
            Ok(s) => print!("{s}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    // `--view <text>` renders to the terminal instead of generating tables.
    let mut view_text: Option<String> = None;
    let mut positional: Vec<&str> = Vec::new();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--view" {
            if i + 1 >= args.len() {
                eprintln!("error: --view requires a text argument");
                return ExitCode::FAILURE;
            }
            view_text = Some(args[i + 1].clone());
            i += 2;
            continue;
        }
        positional.push(&args[i]);
        i += 1;
    }

    if positional.is_empty() {
        print_help();
        return ExitCode::FAILURE;
    }

    let font_path = PathBuf::from(positional[0]);
    let cell_override = match parse_cell_args(&positional[1..]) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::FAILURE;
        }
    };

    let config = GeneratorConfig::load(&config::config_path());

    let result = match view_text {
        Some(text) => view(&font_path, cell_override, &config, &text),
        None => generate(&font_path, cell_override, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("rasterfont {}", env!("CARGO_PKG_VERSION"));
    println!("Convert PSF/TTF console fonts into static Rust glyph tables\n");
    println!("USAGE:");
    println!("    rasterfont <font.psf|font.ttf> [glyph_width glyph_height]\n");
    println!("OPTIONS:");
    println!("    --view <text>     Render text with the font to the terminal");
    println!("    --print-config    Print the default configuration to stdout");
    println!("    --version, -V     Print version information");
    println!("    --help, -h        Print this help message");
}

fn parse_cell_args(rest: &[&str]) -> Result<Option<(usize, usize)>, String> {
    match rest {
        [] => Ok(None),
        [w, h] => {
            let width = w.parse().map_err(|_| format!("bad glyph width {w:?}"))?;
            let height = h.parse().map_err(|_| format!("bad glyph height {h:?}"))?;
            Ok(Some((width, height)))
        }
        _ => Err("expected either no cell size or both width and height".to_owned()),
    }
}

fn is_outline_font(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf")
    )
}

/// Load the font either way and hand back the glyph store plus its
/// resolution map.
fn load(
    path: &Path,
    cell_override: Option<(usize, usize)>,
    config: &GeneratorConfig,
) -> Result<(Font, GlyphMap), FontError> {
    if is_outline_font(path) {
        let (width, height) =
            cell_override.unwrap_or((config.cell.width, config.cell.height));
        let outline = OutlineFont::load(path, width, height)?;
        Ok(Font::from_outline(&outline, &config.effective_ranges()))
    } else {
        Ok((Font::from_file(path)?, glyphmap::cyrillic()))
    }
}

fn generate(
    path: &Path,
    cell_override: Option<(usize, usize)>,
    config: &GeneratorConfig,
) -> Result<(), FontError> {
    let name = codegen::font_name_from_path(path);
    let out_dir = config.output.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let out_path = out_dir.join(format!("{name}.rs"));

    let (glyphs, width, height, glyph_bytes) = if is_outline_font(path) {
        let (width, height) =
            cell_override.unwrap_or((config.cell.width, config.cell.height));
        let outline = OutlineFont::load(path, width, height)?;
        let glyphs = export::export_trimmed(&outline, &config.effective_ranges());
        (glyphs, width, height, width.div_ceil(8) * height)
    } else {
        let font = Font::from_file(path)?;
        let glyphs = export::export_tight(&font, &glyphmap::cyrillic());
        (glyphs, font.width, font.height, font.glyph_bytes)
    };

    let mut out = std::fs::File::create(&out_path)?;
    codegen::write_table(
        &mut out,
        &name,
        &path.display().to_string(),
        width,
        height,
        glyph_bytes,
        &glyphs,
    )?;

    println!(
        "generated {} glyphs for font \"{name}\" in {}",
        glyphs.len(),
        out_path.display()
    );
    Ok(())
}

/// Render `text` to stdout as `#`/space rows.
fn view(
    path: &Path,
    cell_override: Option<(usize, usize)>,
    config: &GeneratorConfig,
    text: &str,
) -> Result<(), FontError> {
    let (font, map) = load(path, cell_override, config)?;

    let (w, h) = layout::background_size(&font, text, 1, 1, 0);
    if w <= 0 || h <= 0 {
        return Ok(());
    }
    let mut canvas = Canvas::new(w as usize, h as usize, BLACK);
    layout::draw_text(&font, &map, &mut canvas, 0, 0, text, 1, WHITE);
    print!("{}", canvas.to_ascii());
    Ok(())
}
