//! Color identifiers as they are usually written for charts:
//! tableau names (`tab:red`), plain names (`red`), single letters (`r`) and hex (`#d62728`, `#f00`).
use crate::error::Error;
use plotters::style::RGBColor;

const TABLEAU: [(&str, RGBColor); 10] = [
    ("tab:blue", RGBColor(31, 119, 180)),
    ("tab:orange", RGBColor(255, 127, 14)),
    ("tab:green", RGBColor(44, 160, 44)),
    ("tab:red", RGBColor(214, 39, 40)),
    ("tab:purple", RGBColor(148, 103, 189)),
    ("tab:brown", RGBColor(140, 86, 75)),
    ("tab:pink", RGBColor(227, 119, 194)),
    ("tab:gray", RGBColor(127, 127, 127)),
    ("tab:olive", RGBColor(188, 189, 34)),
    ("tab:cyan", RGBColor(23, 190, 207)),
];

const NAMED: [(&str, RGBColor); 16] = [
    ("black", RGBColor(0, 0, 0)),
    ("white", RGBColor(255, 255, 255)),
    ("red", RGBColor(255, 0, 0)),
    ("green", RGBColor(0, 128, 0)),
    ("blue", RGBColor(0, 0, 255)),
    ("cyan", RGBColor(0, 255, 255)),
    ("magenta", RGBColor(255, 0, 255)),
    ("yellow", RGBColor(255, 255, 0)),
    ("orange", RGBColor(255, 165, 0)),
    ("purple", RGBColor(128, 0, 128)),
    ("brown", RGBColor(165, 42, 42)),
    ("pink", RGBColor(255, 192, 203)),
    ("olive", RGBColor(128, 128, 0)),
    ("navy", RGBColor(0, 0, 128)),
    ("gray", RGBColor(128, 128, 128)),
    ("grey", RGBColor(128, 128, 128)),
];

const LETTERS: [(&str, RGBColor); 8] = [
    ("b", RGBColor(0, 0, 255)),
    ("g", RGBColor(0, 128, 0)),
    ("r", RGBColor(255, 0, 0)),
    ("c", RGBColor(0, 191, 191)),
    ("m", RGBColor(191, 0, 191)),
    ("y", RGBColor(191, 191, 0)),
    ("k", RGBColor(0, 0, 0)),
    ("w", RGBColor(255, 255, 255)),
];

/// Resolves one color identifier, case insensitive.
pub fn parse_color(id: &str) -> Result<RGBColor, Error> {
    let id = id.trim().to_lowercase();
    let id = id.replace("tab:grey", "tab:gray");
    if let Some(hex) = id.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| unknown(&id));
    }
    TABLEAU
        .iter()
        .chain(NAMED.iter())
        .chain(LETTERS.iter())
        .find(|(name, _)| *name == id)
        .map(|(_, c)| *c)
        .ok_or_else(|| unknown(&id))
}

/// Resolves a whole palette, failing on the first unknown identifier.
pub fn parse_palette<S: AsRef<str>>(ids: &[S]) -> Result<Vec<RGBColor>, Error> {
    ids.iter().map(|id| parse_color(id.as_ref())).collect()
}

fn parse_hex(hex: &str) -> Option<RGBColor> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(RGBColor(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in rgb.iter_mut().enumerate() {
                *c = channel(hex.get(i..i + 1)?)? * 17;
            }
            Some(RGBColor(rgb[0], rgb[1], rgb[2]))
        }
        _ => None,
    }
}

fn unknown(id: &str) -> Error {
    Error::configuration(format!("unknown color '{}'", id))
}
