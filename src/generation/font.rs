/*!
 * Font handling for PDF generation.
 *
 * Measured word wrap needs real glyph advance widths, and non-Latin
 * output needs a Unicode-capable font embedded in the file. This module
 * reads just enough of a TrueType file to get both (`head`, `hhea`,
 * `maxp`, `hmtx` and a format 4 or 12 `cmap` subtable) and embeds the
 * whole font program as a Type0/Identity-H CID font. When no usable
 * font file is found on the host, the built-in Helvetica base font is
 * used instead with its standard metric table; it can only encode
 * printable ASCII, so callers substitute everything else.
 */

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use log::{debug, warn};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::errors::GenerationError;

/// Standard Helvetica advance widths for characters 0x20..=0x7E,
/// in 1000-unit text space
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// A font usable for PDF text layout and output
#[derive(Debug, Clone)]
pub enum PdfFont {
    /// A TrueType font embedded into the document
    Embedded(TrueTypeFont),
    /// The Helvetica base font (ASCII only, nothing embedded)
    Helvetica,
}

impl PdfFont {
    /// Load the first parseable font among `candidates`, falling back to
    /// the built-in Helvetica base font
    pub fn load_first(candidates: &[std::path::PathBuf]) -> Self {
        for path in candidates {
            match TrueTypeFont::load(path) {
                Ok(font) => {
                    debug!("Using embedded font {}", path.display());
                    return PdfFont::Embedded(font);
                }
                Err(reason) => {
                    debug!("Skipping font candidate {}: {}", path.display(), reason);
                }
            }
        }
        warn!("No embeddable font found; falling back to built-in Helvetica (ASCII only)");
        PdfFont::Helvetica
    }

    /// Whether the font can render `c` directly
    pub fn can_encode(&self, c: char) -> bool {
        match self {
            PdfFont::Embedded(font) => font.cmap.contains_key(&c),
            PdfFont::Helvetica => ('\u{20}'..='\u{7E}').contains(&c),
        }
    }

    /// Advance width of `c` in 1000-unit text space
    pub fn char_width(&self, c: char) -> f32 {
        match self {
            PdfFont::Embedded(font) => font.char_width(c),
            PdfFont::Helvetica => match c {
                '\u{20}'..='\u{7E}' => f32::from(HELVETICA_WIDTHS[c as usize - 0x20]),
                _ => f32::from(HELVETICA_WIDTHS[b'?' as usize - 0x20]),
            },
        }
    }

    /// Rendered width of `text` at `font_size` points
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().map(|c| self.char_width(c)).sum::<f32>() * font_size / 1000.0
    }

    /// Encode a line of text as a PDF string object for a Tj operand
    ///
    /// Embedded fonts use Identity-H, so the string is the big-endian
    /// glyph id sequence; Helvetica takes the bytes as-is. Callers must
    /// have substituted unencodable characters already.
    pub fn encode_text(&self, text: &str) -> Object {
        match self {
            PdfFont::Embedded(font) => {
                let mut bytes = Vec::with_capacity(text.len() * 2);
                for c in text.chars() {
                    let gid = font.cmap.get(&c).copied().unwrap_or(0);
                    bytes.extend_from_slice(&gid.to_be_bytes());
                }
                Object::String(bytes, lopdf::StringFormat::Hexadecimal)
            }
            PdfFont::Helvetica => Object::string_literal(text),
        }
    }

    /// Add the font to `doc` and return the id of its font dictionary
    pub fn register(&self, doc: &mut Document) -> Result<ObjectId, GenerationError> {
        match self {
            PdfFont::Embedded(font) => font.register(doc),
            PdfFont::Helvetica => Ok(doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica",
                "Encoding" => "WinAnsiEncoding",
            })),
        }
    }
}

/// Parsed metrics and character map of a TrueType font file
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    /// Complete font program, embedded verbatim as FontFile2
    data: Vec<u8>,
    /// PDF-safe font name derived from the file name
    name: String,
    /// Design units per em
    units_per_em: u16,
    /// Typographic ascender in design units
    ascender: i16,
    /// Typographic descender in design units (negative)
    descender: i16,
    /// Font bounding box in design units
    bbox: [i16; 4],
    /// Advance width per glyph id, in design units
    advances: Vec<u16>,
    /// Unicode scalar to glyph id
    cmap: HashMap<char, u16>,
}

impl TrueTypeFont {
    /// Read and parse a TrueType file
    pub fn load(path: &Path) -> Result<Self, String> {
        let data = fs::read(path).map_err(|e| e.to_string())?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.chars().filter(|c| c.is_ascii_alphanumeric()).collect())
            .filter(|s: &String| !s.is_empty())
            .unwrap_or_else(|| "EmbeddedFont".to_string());
        Self::parse(data, name)
    }

    /// Parse a TrueType font from its raw bytes
    pub fn parse(data: Vec<u8>, name: String) -> Result<Self, String> {
        let version = be_u32(&data, 0).ok_or("truncated sfnt header")?;
        // 0x74727565 is the legacy Apple 'true' tag
        if version != 0x0001_0000 && version != 0x7472_7565 {
            return Err(format!("unsupported sfnt version 0x{version:08X}"));
        }
        let num_tables = be_u16(&data, 4).ok_or("truncated sfnt header")? as usize;

        let mut tables: HashMap<[u8; 4], (usize, usize)> = HashMap::new();
        for i in 0..num_tables {
            let record = 12 + i * 16;
            let tag: [u8; 4] = data
                .get(record..record + 4)
                .and_then(|s| s.try_into().ok())
                .ok_or("truncated table directory")?;
            let offset = be_u32(&data, record + 8).ok_or("truncated table directory")? as usize;
            let length = be_u32(&data, record + 12).ok_or("truncated table directory")? as usize;
            if offset.checked_add(length).map_or(true, |end| end > data.len()) {
                return Err(format!(
                    "table {} extends past end of file",
                    String::from_utf8_lossy(&tag)
                ));
            }
            tables.insert(tag, (offset, length));
        }

        let table = |tag: &[u8; 4]| -> Result<usize, String> {
            tables
                .get(tag)
                .map(|&(offset, _)| offset)
                .ok_or_else(|| format!("missing {} table", String::from_utf8_lossy(tag)))
        };

        let head = table(b"head")?;
        let hhea = table(b"hhea")?;
        let maxp = table(b"maxp")?;
        let hmtx = table(b"hmtx")?;
        let cmap_offset = table(b"cmap")?;

        let units_per_em = be_u16(&data, head + 18).ok_or("truncated head table")?;
        if units_per_em == 0 {
            return Err("unitsPerEm is zero".to_string());
        }
        let bbox = [
            be_i16(&data, head + 36).ok_or("truncated head table")?,
            be_i16(&data, head + 38).ok_or("truncated head table")?,
            be_i16(&data, head + 40).ok_or("truncated head table")?,
            be_i16(&data, head + 42).ok_or("truncated head table")?,
        ];

        let ascender = be_i16(&data, hhea + 4).ok_or("truncated hhea table")?;
        let descender = be_i16(&data, hhea + 6).ok_or("truncated hhea table")?;
        let num_h_metrics = be_u16(&data, hhea + 34).ok_or("truncated hhea table")? as usize;
        if num_h_metrics == 0 {
            return Err("numberOfHMetrics is zero".to_string());
        }

        let num_glyphs = be_u16(&data, maxp + 4).ok_or("truncated maxp table")? as usize;

        let mut advances = Vec::with_capacity(num_glyphs);
        for gid in 0..num_glyphs.min(num_h_metrics) {
            advances.push(be_u16(&data, hmtx + gid * 4).ok_or("truncated hmtx table")?);
        }
        // glyphs past numberOfHMetrics repeat the last advance
        let last = *advances.last().ok_or("empty hmtx table")?;
        advances.resize(num_glyphs, last);

        let cmap = parse_cmap(&data, cmap_offset)?;
        if cmap.is_empty() {
            return Err("no usable cmap subtable".to_string());
        }

        Ok(Self {
            data,
            name,
            units_per_em,
            ascender,
            descender,
            bbox,
            advances,
            cmap,
        })
    }

    /// Advance width of `c` in 1000-unit text space
    fn char_width(&self, c: char) -> f32 {
        let gid = self.cmap.get(&c).copied().unwrap_or(0);
        self.scale(f32::from(
            self.advances.get(gid as usize).copied().unwrap_or(0),
        ))
    }

    /// Convert design units to 1000-unit text space
    fn scale(&self, units: f32) -> f32 {
        units * 1000.0 / f32::from(self.units_per_em)
    }

    /// Build the Type0/Identity-H object graph for this font
    fn register(&self, doc: &mut Document) -> Result<ObjectId, GenerationError> {
        let base_font = format!("{}-Identity-H", self.name);

        let file_id = doc.add_object(Stream::new(
            dictionary! { "Length1" => self.data.len() as i64 },
            self.data.clone(),
        ));

        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => Object::Name(self.name.clone().into_bytes()),
            "Flags" => 4,
            "FontBBox" => vec![
                self.scale(f32::from(self.bbox[0])).round().into(),
                self.scale(f32::from(self.bbox[1])).round().into(),
                self.scale(f32::from(self.bbox[2])).round().into(),
                self.scale(f32::from(self.bbox[3])).round().into(),
            ],
            "ItalicAngle" => 0,
            "Ascent" => self.scale(f32::from(self.ascender)).round() as i64,
            "Descent" => self.scale(f32::from(self.descender)).round() as i64,
            "CapHeight" => self.scale(f32::from(self.ascender)).round() as i64,
            "StemV" => 80,
            "FontFile2" => file_id,
        });

        let descendant_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => Object::Name(base_font.clone().into_bytes()),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0,
            },
            "FontDescriptor" => descriptor_id,
            "DW" => 1000,
            "W" => self.width_array(),
            "CIDToGIDMap" => "Identity",
        });

        let to_unicode_id = doc.add_object(Stream::new(
            dictionary! {},
            self.to_unicode_cmap().into_bytes(),
        ));

        Ok(doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => Object::Name(base_font.into_bytes()),
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![descendant_id.into()],
            "ToUnicode" => to_unicode_id,
        }))
    }

    /// CID width array covering every glyph the character map can reach
    fn width_array(&self) -> Vec<Object> {
        let mut gids: Vec<u16> = self.cmap.values().copied().collect();
        gids.sort_unstable();
        gids.dedup();

        let mut entries: Vec<Object> = Vec::new();
        let mut i = 0;
        while i < gids.len() {
            let start = gids[i];
            let mut widths: Vec<Object> = Vec::new();
            while i < gids.len() && u32::from(gids[i]) == u32::from(start) + widths.len() as u32 {
                widths.push((self.char_gid_width(gids[i]).round() as i64).into());
                i += 1;
            }
            entries.push(i64::from(start).into());
            entries.push(widths.into());
        }
        entries
    }

    /// Advance width of a glyph id in 1000-unit text space
    fn char_gid_width(&self, gid: u16) -> f32 {
        self.scale(f32::from(
            self.advances.get(gid as usize).copied().unwrap_or(0),
        ))
    }

    /// ToUnicode CMap mapping glyph ids back to Unicode for text extraction
    fn to_unicode_cmap(&self) -> String {
        // prefer the lowest code point when several map to one glyph
        let mut reverse: BTreeMap<u16, char> = BTreeMap::new();
        for (&c, &gid) in &self.cmap {
            reverse
                .entry(gid)
                .and_modify(|existing| {
                    if c < *existing {
                        *existing = c;
                    }
                })
                .or_insert(c);
        }

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let pairs: Vec<(u16, char)> = reverse.into_iter().collect();
        for batch in pairs.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", batch.len()));
            for &(gid, c) in batch {
                cmap.push_str(&format!("<{gid:04X}> <"));
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    cmap.push_str(&format!("{unit:04X}"));
                }
                cmap.push_str(">\n");
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str(
            "endcmap\n\
             CMapName currentdict /CMap defineresource pop\n\
             end\n\
             end\n",
        );
        cmap
    }
}

/// Parse the cmap table, preferring a format 12 subtable over format 4
fn parse_cmap(data: &[u8], cmap: usize) -> Result<HashMap<char, u16>, String> {
    let num_subtables = be_u16(data, cmap + 2).ok_or("truncated cmap table")? as usize;

    let mut format4_at: Option<usize> = None;
    let mut format12_at: Option<usize> = None;
    for i in 0..num_subtables {
        let record = cmap + 4 + i * 8;
        let offset = be_u32(data, record + 4).ok_or("truncated cmap table")? as usize;
        let subtable = cmap + offset;
        match be_u16(data, subtable) {
            Some(4) if format4_at.is_none() => format4_at = Some(subtable),
            Some(12) if format12_at.is_none() => format12_at = Some(subtable),
            _ => {}
        }
    }

    if let Some(subtable) = format12_at {
        parse_cmap_format12(data, subtable)
    } else if let Some(subtable) = format4_at {
        parse_cmap_format4(data, subtable)
    } else {
        Err("no format 4 or 12 cmap subtable".to_string())
    }
}

/// Segment-mapped BMP subtable
fn parse_cmap_format4(data: &[u8], at: usize) -> Result<HashMap<char, u16>, String> {
    let seg_count = be_u16(data, at + 6).ok_or("truncated cmap subtable")? as usize / 2;
    let end_codes = at + 14;
    let start_codes = end_codes + seg_count * 2 + 2;
    let id_deltas = start_codes + seg_count * 2;
    let id_range_offsets = id_deltas + seg_count * 2;

    let mut map = HashMap::new();
    for seg in 0..seg_count {
        let end = be_u16(data, end_codes + seg * 2).ok_or("truncated cmap subtable")?;
        let start = be_u16(data, start_codes + seg * 2).ok_or("truncated cmap subtable")?;
        let delta = be_u16(data, id_deltas + seg * 2).ok_or("truncated cmap subtable")?;
        let range_offset_pos = id_range_offsets + seg * 2;
        let range_offset = be_u16(data, range_offset_pos).ok_or("truncated cmap subtable")?;
        if start > end {
            continue;
        }
        for code in start..=end {
            if code == 0xFFFF {
                continue;
            }
            let gid = if range_offset == 0 {
                code.wrapping_add(delta)
            } else {
                let glyph_at =
                    range_offset_pos + range_offset as usize + (code - start) as usize * 2;
                let raw = be_u16(data, glyph_at).ok_or("truncated cmap subtable")?;
                if raw == 0 {
                    continue;
                }
                raw.wrapping_add(delta)
            };
            if gid != 0 {
                if let Some(c) = char::from_u32(u32::from(code)) {
                    map.insert(c, gid);
                }
            }
        }
    }
    Ok(map)
}

/// Segmented-coverage subtable (full Unicode range)
fn parse_cmap_format12(data: &[u8], at: usize) -> Result<HashMap<char, u16>, String> {
    let num_groups = be_u32(data, at + 12).ok_or("truncated cmap subtable")? as usize;
    let mut map = HashMap::new();
    for group in 0..num_groups {
        let record = at + 16 + group * 12;
        let start = be_u32(data, record).ok_or("truncated cmap subtable")?;
        let end = be_u32(data, record + 4).ok_or("truncated cmap subtable")?;
        let start_gid = be_u32(data, record + 8).ok_or("truncated cmap subtable")?;
        if start > end {
            continue;
        }
        for code in start..=end {
            if let Some(c) = char::from_u32(code) {
                let gid = start_gid + (code - start);
                if gid != 0 && gid <= u32::from(u16::MAX) {
                    map.insert(c, gid as u16);
                }
            }
        }
    }
    Ok(map)
}

fn be_u16(data: &[u8], at: usize) -> Option<u16> {
    data.get(at..at + 2)
        .map(|s| u16::from_be_bytes([s[0], s[1]]))
}

fn be_i16(data: &[u8], at: usize) -> Option<i16> {
    be_u16(data, at).map(|v| v as i16)
}

fn be_u32(data: &[u8], at: usize) -> Option<u32> {
    data.get(at..at + 4)
        .map(|s| u32::from_be_bytes([s[0], s[1], s[2], s[3]]))
}
