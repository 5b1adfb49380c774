//! PDF export of a composed letter.
//!
//! Layout is fixed: A4 portrait, Helvetica, 20mm left margin. Header lines sit
//! at 20/30/40mm, a blank spacer at 50mm, and the body starts at 60mm wrapped
//! to a 180mm column. Body lines that reach the bottom margin continue at the
//! top of a new page.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::render::font_metrics::{wrap_text, HELVETICA};
use crate::render::letter::LetterComposition;
use crate::render::RenderError;

const PT_PER_MM: f32 = 72.0 / 25.4;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_LEFT_MM: f32 = 20.0;
const MARGIN_TOP_MM: f32 = 20.0;
const MARGIN_BOTTOM_MM: f32 = 20.0;
const HEADER_LINE_GAP_MM: f32 = 10.0;
const BODY_TOP_MM: f32 = 60.0;
const BODY_WIDTH_MM: f32 = 180.0;

const HEADER_FONT_PT: f32 = 12.0;
const BODY_FONT_PT: f32 = 11.0;
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// A line of text placed on a page, `y_mm` measured from the top edge to the baseline.
#[derive(Debug, Clone, PartialEq)]
struct PlacedLine {
    y_mm: f32,
    size_pt: f32,
    text: String,
}

/// Renders the letterhead and body of `letter` into PDF bytes.
pub fn export_pdf(letter: &LetterComposition) -> Result<Vec<u8>, RenderError> {
    let pages = paginate(letter);
    build_document(&pages, &letter.subject)
}

/// Number of pages `letter` occupies once exported.
pub fn page_count(letter: &LetterComposition) -> usize {
    paginate(letter).len()
}

fn paginate(letter: &LetterComposition) -> Vec<Vec<PlacedLine>> {
    let header = [
        letter.sender.as_str(),
        letter.date.as_str(),
        letter.subject.as_str(),
        "",
    ];
    let mut first_page: Vec<PlacedLine> = header
        .iter()
        .enumerate()
        .map(|(i, text)| PlacedLine {
            y_mm: MARGIN_TOP_MM + HEADER_LINE_GAP_MM * i as f32,
            size_pt: HEADER_FONT_PT,
            text: text.to_string(),
        })
        .collect();
    first_page.retain(|line| !line.text.is_empty());

    let body_width_em = BODY_WIDTH_MM * PT_PER_MM / BODY_FONT_PT;
    let line_height_mm = BODY_FONT_PT * LINE_HEIGHT_FACTOR / PT_PER_MM;
    let bottom_mm = PAGE_HEIGHT_MM - MARGIN_BOTTOM_MM;

    let mut pages = vec![first_page];
    let mut y_mm = BODY_TOP_MM;
    for text in wrap_text(&letter.body, &HELVETICA, body_width_em) {
        if y_mm > bottom_mm {
            pages.push(Vec::new());
            y_mm = MARGIN_TOP_MM;
        }
        if !text.is_empty() {
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    y_mm,
                    size_pt: BODY_FONT_PT,
                    text,
                });
            }
        }
        y_mm += line_height_mm;
    }
    pages
}

fn build_document(pages: &[Vec<PlacedLine>], title: &str) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in pages {
        let page_id = add_page(&mut doc, pages_id, lines)?;
        kids.push(page_id.into());
    }

    let page_total = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_total,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::from(0.0_f32),
            Object::from(0.0_f32),
            Object::from(PAGE_WIDTH_MM * PT_PER_MM),
            Object::from(PAGE_HEIGHT_MM * PT_PER_MM),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal(concat!("web ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    lines: &[PlacedLine],
) -> Result<ObjectId, RenderError> {
    let page_height_pt = PAGE_HEIGHT_MM * PT_PER_MM;
    let mut operations = Vec::with_capacity(lines.len() * 4);
    for line in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec!["F1".into(), Object::from(line.size_pt)],
        ));
        operations.push(Operation::new(
            "Td",
            vec![
                Object::from(MARGIN_LEFT_MM * PT_PER_MM),
                Object::from(page_height_pt - line.y_mm * PT_PER_MM),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&line.text),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}

/// Encodes text for the standard WinAnsi font encoding. Characters outside it become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '\t' => b' ',
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}
