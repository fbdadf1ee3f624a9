//! Loads a `.pptx` package back into the in-memory model.
//!
//! Reading is text-oriented: placeholder text and free text boxes come
//! back with frames and run styling, and speaker notes and solid
//! backgrounds survive. Embedded media, charts and tables are not
//! reconstructed.

use std::io::{Read, Seek};

use roxmltree::{Document, Node};
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::color::Color;
use crate::model::{Align, Frame, Paragraph, Presentation, SlideLayout, TextBox};
use crate::package::PackageError;
use crate::units::Emu;

const NS_DOC_RELS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_NOTES_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide";

pub(crate) fn read_package<R: Read + Seek>(input: R) -> Result<Presentation, PackageError> {
    let mut archive = ZipArchive::new(input)?;
    let Some(pres_xml) = read_part(&mut archive, "ppt/presentation.xml")? else {
        return Err(PackageError::Malformed("package has no ppt/presentation.xml"));
    };
    let rels = match read_part(&mut archive, "ppt/_rels/presentation.xml.rels")? {
        Some(xml) => parse_rels(&xml)?,
        None => Vec::new(),
    };

    let mut pres = Presentation::new();
    let mut slide_paths = Vec::new();
    {
        let doc = Document::parse(&pres_xml)?;
        let root = doc.root_element();
        if let Some(size) = root.children().find(|n| n.tag_name().name() == "sldSz") {
            if let (Some(cx), Some(cy)) = (attr_i64(size, "cx"), attr_i64(size, "cy")) {
                pres.set_slide_size(Emu::new(cx), Emu::new(cy));
            }
        }
        if let Some(list) = root.children().find(|n| n.tag_name().name() == "sldIdLst") {
            for sld in list.children().filter(|n| n.tag_name().name() == "sldId") {
                let Some(rel_id) = sld.attribute((NS_DOC_RELS, "id")) else {
                    continue;
                };
                if let Some(rel) = rels.iter().find(|r| r.id == rel_id) {
                    slide_paths.push(resolve_target("ppt", &rel.target));
                }
            }
        }
    }

    for path in &slide_paths {
        let Some(xml) = read_part(&mut archive, path)? else {
            return Err(PackageError::Malformed("slide part missing from package"));
        };
        let slide_rels = match read_part(&mut archive, &rels_path(path))? {
            Some(rels_xml) => parse_rels(&rels_xml)?,
            None => Vec::new(),
        };
        let notes = match slide_rels.iter().find(|r| r.rel_type == REL_NOTES_SLIDE) {
            Some(rel) => {
                let notes_path = resolve_target(parent_dir(path), &rel.target);
                match read_part(&mut archive, &notes_path)? {
                    Some(notes_xml) => parse_notes(&notes_xml)?,
                    None => None,
                }
            }
            None => None,
        };
        parse_slide_into(&mut pres, &xml, notes)?;
    }

    debug!(slides = pres.slide_count(), "read pptx package");
    Ok(pres)
}

struct RelEntry {
    id: String,
    rel_type: String,
    target: String,
}

fn parse_rels(xml: &str) -> Result<Vec<RelEntry>, PackageError> {
    let doc = Document::parse(xml)?;
    Ok(doc
        .root_element()
        .children()
        .filter(|n| n.tag_name().name() == "Relationship")
        .filter_map(|n| {
            Some(RelEntry {
                id: n.attribute("Id")?.to_string(),
                rel_type: n.attribute("Type")?.to_string(),
                target: n.attribute("Target")?.to_string(),
            })
        })
        .collect())
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, PackageError> {
    match archive.by_name(name) {
        Ok(mut part) => {
            let mut xml = String::new();
            part.read_to_string(&mut xml)?;
            Ok(Some(xml))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Resolves a relationship target against the directory of its source part.
fn resolve_target(base: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut dir: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    let mut rest = target;
    while let Some(stripped) = rest.strip_prefix("../") {
        dir.pop();
        rest = stripped;
    }
    dir.push(rest);
    dir.join("/")
}

fn rels_path(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

fn parent_dir(part: &str) -> &str {
    part.rsplit_once('/').map_or("", |(dir, _)| dir)
}

enum Ph {
    CenterTitle,
    Title,
    Subtitle,
    Body,
    /// Date, footer, slide number and friends; skipped entirely.
    Other,
}

fn placeholder(sp: Node<'_, '_>) -> Option<Ph> {
    let ph = sp.descendants().find(|n| n.tag_name().name() == "ph")?;
    Some(match ph.attribute("type") {
        Some("ctrTitle") => Ph::CenterTitle,
        Some("title") => Ph::Title,
        Some("subTitle") => Ph::Subtitle,
        Some("body") | None => Ph::Body,
        Some(_) => Ph::Other,
    })
}

fn parse_slide_into(
    pres: &mut Presentation,
    xml: &str,
    notes: Option<String>,
) -> Result<(), PackageError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    let sp_tree = root
        .descendants()
        .find(|n| n.tag_name().name() == "spTree")
        .ok_or(PackageError::Malformed("slide part has no shape tree"))?;

    let mut title = None;
    let mut subtitle = None;
    let mut body = Vec::new();
    let mut boxes = Vec::new();
    let mut saw_center_title = false;
    let mut saw_content = false;

    for sp in sp_tree.children().filter(|n| n.tag_name().name() == "sp") {
        let paragraphs = parse_paragraphs(sp);
        match placeholder(sp) {
            Some(Ph::CenterTitle) => {
                saw_center_title = true;
                title = join_text(&paragraphs);
            }
            Some(Ph::Title) => {
                title = join_text(&paragraphs);
                saw_content = true;
            }
            Some(Ph::Subtitle) => subtitle = join_text(&paragraphs),
            Some(Ph::Body) => {
                saw_content = true;
                body.extend(
                    paragraphs
                        .into_iter()
                        .filter(|p| !p.text.is_empty())
                        .map(|p| p.text),
                );
            }
            Some(Ph::Other) => {}
            None => {
                // Only shapes marked as text boxes are rebuilt.
                if is_text_box(sp) {
                    if let Some(frame) = parse_frame(sp) {
                        let mut text_box =
                            TextBox::new(frame).with_word_wrap(word_wrap(sp));
                        for paragraph in paragraphs {
                            text_box = text_box.with_paragraph(paragraph);
                        }
                        boxes.push(text_box);
                    }
                }
            }
        }
    }

    let layout = if saw_center_title {
        SlideLayout::Title
    } else if saw_content {
        SlideLayout::TitleAndContent
    } else {
        SlideLayout::Blank
    };

    let slide = pres.add_slide(layout);
    if let Some(title) = title {
        slide.set_title(title);
    }
    if let Some(subtitle) = subtitle {
        slide.set_subtitle(subtitle);
    }
    for item in body {
        slide.push_bullet(item);
    }
    for text_box in boxes {
        slide.push(text_box);
    }
    if let Some(color) = parse_background(root) {
        slide.set_background(color);
    }
    if let Some(notes) = notes {
        slide.set_notes(notes);
    }
    Ok(())
}

fn parse_notes(xml: &str) -> Result<Option<String>, PackageError> {
    let doc = Document::parse(xml)?;
    for sp in doc
        .root_element()
        .descendants()
        .filter(|n| n.tag_name().name() == "sp")
    {
        if matches!(placeholder(sp), Some(Ph::Body)) {
            let paragraphs = parse_paragraphs(sp);
            return Ok(join_text(&paragraphs));
        }
    }
    Ok(None)
}

fn parse_background(root: Node<'_, '_>) -> Option<Color> {
    root.descendants()
        .find(|n| n.tag_name().name() == "bgPr")
        .and_then(|bg| bg.descendants().find(|n| n.tag_name().name() == "srgbClr"))
        .and_then(|clr| clr.attribute("val"))
        .and_then(|val| Color::from_hex(val).ok())
}

fn is_text_box(sp: Node<'_, '_>) -> bool {
    sp.descendants()
        .find(|n| n.tag_name().name() == "cNvSpPr")
        .and_then(|n| n.attribute("txBox"))
        == Some("1")
}

fn word_wrap(sp: Node<'_, '_>) -> bool {
    sp.descendants()
        .find(|n| n.tag_name().name() == "bodyPr")
        .and_then(|n| n.attribute("wrap"))
        == Some("square")
}

fn parse_frame(sp: Node<'_, '_>) -> Option<Frame> {
    let xfrm = sp
        .descendants()
        .find(|n| n.tag_name().name() == "xfrm")?;
    let off = xfrm.children().find(|n| n.tag_name().name() == "off")?;
    let ext = xfrm.children().find(|n| n.tag_name().name() == "ext")?;
    Some(Frame::new(
        Emu::new(attr_i64(off, "x")?),
        Emu::new(attr_i64(off, "y")?),
        Emu::new(attr_i64(ext, "cx")?),
        Emu::new(attr_i64(ext, "cy")?),
    ))
}

fn attr_i64(node: Node<'_, '_>, name: &str) -> Option<i64> {
    node.attribute(name)?.parse().ok()
}

fn parse_paragraphs(sp: Node<'_, '_>) -> Vec<Paragraph> {
    let Some(tx_body) = sp.children().find(|n| n.tag_name().name() == "txBody") else {
        return Vec::new();
    };
    tx_body
        .children()
        .filter(|n| n.tag_name().name() == "p")
        .map(parse_paragraph)
        .collect()
}

/// Rebuilds one paragraph; run styling is taken from the first run.
fn parse_paragraph(p: Node<'_, '_>) -> Paragraph {
    let text: String = p
        .descendants()
        .filter(|n| n.tag_name().name() == "t")
        .filter_map(|t| t.text())
        .collect();
    let mut paragraph = Paragraph::new(text);
    if let Some(ppr) = p.children().find(|n| n.tag_name().name() == "pPr") {
        if ppr.attribute("algn") == Some("ctr") {
            paragraph = paragraph.with_align(Align::Center);
        }
    }
    if let Some(rpr) = p.descendants().find(|n| n.tag_name().name() == "rPr") {
        if let Some(sz) = rpr.attribute("sz").and_then(|v| v.parse::<u32>().ok()) {
            paragraph = paragraph.with_size(f64::from(sz) / 100.0);
        }
        if rpr.attribute("b") == Some("1") {
            paragraph = paragraph.with_bold(true);
        }
        if rpr.attribute("i") == Some("1") {
            paragraph = paragraph.with_italic(true);
        }
        if let Some(color) = rpr
            .descendants()
            .find(|n| n.tag_name().name() == "srgbClr")
            .and_then(|clr| clr.attribute("val"))
            .and_then(|val| Color::from_hex(val).ok())
        {
            paragraph = paragraph.with_color(color);
        }
        if let Some(font) = rpr
            .children()
            .find(|n| n.tag_name().name() == "latin")
            .and_then(|l| l.attribute("typeface"))
        {
            paragraph = paragraph.with_font(font);
        }
    }
    paragraph
}

fn join_text(paragraphs: &[Paragraph]) -> Option<String> {
    if paragraphs.iter().all(|p| p.text.is_empty()) {
        return None;
    }
    Some(
        paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_target_walks_up() {
        assert_eq!(
            resolve_target("ppt/slides", "../charts/chart1.xml"),
            "ppt/charts/chart1.xml"
        );
        assert_eq!(
            resolve_target("ppt", "slides/slide1.xml"),
            "ppt/slides/slide1.xml"
        );
        assert_eq!(resolve_target("ppt", "/ppt/slides/slide1.xml"), "ppt/slides/slide1.xml");
    }

    #[test]
    fn rels_path_nests_under_part_directory() {
        assert_eq!(
            rels_path("ppt/slides/slide3.xml"),
            "ppt/slides/_rels/slide3.xml.rels"
        );
        assert_eq!(rels_path("ppt/presentation.xml"), "ppt/_rels/presentation.xml.rels");
    }

    #[test]
    fn parse_rels_reads_entries() {
        let xml = r#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://example.com/a" Target="a.xml"/>
  <Relationship Id="rId2" Type="http://example.com/b" Target="../b.xml"/>
</Relationships>"#;
        let rels = parse_rels(xml).expect("parse rels");
        assert_eq!(rels.len(), 2);
        assert_eq!(rels[1].id, "rId2");
        assert_eq!(rels[1].target, "../b.xml");
    }

    #[test]
    fn malformed_zip_is_rejected() {
        let err = read_package(std::io::Cursor::new(b"not a zip".to_vec()));
        assert!(matches!(err, Err(PackageError::Zip(_))));
    }
}
