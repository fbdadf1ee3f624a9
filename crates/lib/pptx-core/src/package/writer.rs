//! Serializes a [`Presentation`] into a `.pptx` OPC package.
//!
//! The master, layout, theme and notes-master parts never vary with deck
//! content and ship as canned XML. Everything else (content types, the
//! presentation part, slides, charts, notes) is emitted with `quick_xml`.

use std::io::{self, Cursor, Seek, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::chart::{ChartKind, Series};
use crate::color::Color;
use crate::model::{
    Align, Chart, Connector, Element, Frame, Paragraph, Picture, PictureFormat, Presentation,
    Shape, Slide, SlideLayout, Table, TableCell, TextBox,
};
use crate::package::PackageError;
use crate::units::{Emu, FontSize};

const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PRESENTATION: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_CHART: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";
const NS_DOC_RELS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_THEME: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_CHART: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart";
const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
const REL_NOTES_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide";
const REL_NOTES_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesMaster";

const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_XML: &str = "application/xml";
const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_CHART: &str = "application/vnd.openxmlformats-officedocument.drawingml.chart+xml";
const CT_NOTES_SLIDE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml";
const CT_NOTES_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.notesMaster+xml";

// Placeholder geometry of the stock 4:3 template, in EMU.
const CENTER_TITLE_FRAME: Frame = Frame::new(
    Emu::new(685_800),
    Emu::new(2_130_425),
    Emu::new(7_772_400),
    Emu::new(1_470_025),
);
const SUBTITLE_FRAME: Frame = Frame::new(
    Emu::new(1_371_600),
    Emu::new(3_886_200),
    Emu::new(6_400_800),
    Emu::new(1_752_600),
);
const TITLE_FRAME: Frame = Frame::new(
    Emu::new(457_200),
    Emu::new(274_638),
    Emu::new(8_229_600),
    Emu::new(1_143_000),
);
const BODY_FRAME: Frame = Frame::new(
    Emu::new(457_200),
    Emu::new(1_600_200),
    Emu::new(8_229_600),
    Emu::new(4_525_963),
);

const CAT_AXIS_ID: &str = "1";
const VAL_AXIS_ID: &str = "2";

type Xml = Writer<Cursor<Vec<u8>>>;

/// Part numbering computed up front so slide relationships can point at
/// chart, media and notes parts before those parts are written.
struct Plan {
    chart_base: Vec<usize>,
    image_base: Vec<usize>,
    notes_no: Vec<Option<usize>>,
    chart_total: usize,
    image_total: usize,
    notes_total: usize,
    image_formats: Vec<PictureFormat>,
}

impl Plan {
    fn build(pres: &Presentation) -> Self {
        let mut chart_base = Vec::with_capacity(pres.slide_count());
        let mut image_base = Vec::with_capacity(pres.slide_count());
        let mut notes_no = Vec::with_capacity(pres.slide_count());
        let mut image_formats = Vec::new();
        let mut next_chart = 1;
        let mut next_image = 1;
        let mut next_notes = 1;
        for slide in pres.slides() {
            chart_base.push(next_chart);
            image_base.push(next_image);
            for element in slide.elements() {
                match element {
                    Element::Chart(_) => next_chart += 1,
                    Element::Picture(pic) => {
                        next_image += 1;
                        if !image_formats.contains(&pic.format) {
                            image_formats.push(pic.format);
                        }
                    }
                    _ => {}
                }
            }
            if slide.notes().is_some() {
                notes_no.push(Some(next_notes));
                next_notes += 1;
            } else {
                notes_no.push(None);
            }
        }
        Self {
            chart_base,
            image_base,
            notes_no,
            chart_total: next_chart - 1,
            image_total: next_image - 1,
            notes_total: next_notes - 1,
            image_formats,
        }
    }

    const fn has_notes(&self) -> bool {
        self.notes_total > 0
    }
}

/// One `<Relationship>` entry of a `.rels` part.
struct Rel {
    id: String,
    rel_type: &'static str,
    target: String,
}

impl Rel {
    fn numbered(n: usize, rel_type: &'static str, target: impl Into<String>) -> Self {
        Self {
            id: format!("rId{n}"),
            rel_type,
            target: target.into(),
        }
    }
}

pub(crate) fn write_package<W: Write + Seek>(
    pres: &Presentation,
    out: W,
) -> Result<(), PackageError> {
    let plan = Plan::build(pres);
    debug!(
        slides = pres.slide_count(),
        charts = plan.chart_total,
        images = plan.image_total,
        "writing pptx package"
    );

    let mut zip = ZipWriter::new(out);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    add_part(
        &mut zip,
        "[Content_Types].xml",
        &content_types_xml(pres, &plan)?,
        options,
    )?;
    add_part(
        &mut zip,
        "_rels/.rels",
        &rels_xml(&[Rel::numbered(1, REL_OFFICE_DOCUMENT, "ppt/presentation.xml")])?,
        options,
    )?;
    add_part(
        &mut zip,
        "ppt/presentation.xml",
        &presentation_xml(pres, &plan)?,
        options,
    )?;
    add_part(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        &rels_xml(&presentation_rels(pres, &plan))?,
        options,
    )?;
    add_part(
        &mut zip,
        "ppt/slideMasters/slideMaster1.xml",
        SLIDE_MASTER.as_bytes(),
        options,
    )?;
    add_part(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        &rels_xml(&[
            Rel::numbered(1, REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
            Rel::numbered(2, REL_THEME, "../theme/theme1.xml"),
        ])?,
        options,
    )?;
    add_part(
        &mut zip,
        "ppt/slideLayouts/slideLayout1.xml",
        SLIDE_LAYOUT.as_bytes(),
        options,
    )?;
    add_part(
        &mut zip,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        &rels_xml(&[Rel::numbered(
            1,
            REL_SLIDE_MASTER,
            "../slideMasters/slideMaster1.xml",
        )])?,
        options,
    )?;
    add_part(&mut zip, "ppt/theme/theme1.xml", THEME.as_bytes(), options)?;
    if plan.has_notes() {
        add_part(
            &mut zip,
            "ppt/notesMasters/notesMaster1.xml",
            NOTES_MASTER.as_bytes(),
            options,
        )?;
        add_part(
            &mut zip,
            "ppt/notesMasters/_rels/notesMaster1.xml.rels",
            &rels_xml(&[Rel::numbered(1, REL_THEME, "../theme/theme1.xml")])?,
            options,
        )?;
    }

    for (index, slide) in pres.slides().iter().enumerate() {
        let no = index + 1;
        let (xml, rels) = slide_xml(slide, &plan, index)?;
        add_part(&mut zip, &format!("ppt/slides/slide{no}.xml"), &xml, options)?;
        add_part(
            &mut zip,
            &format!("ppt/slides/_rels/slide{no}.xml.rels"),
            &rels_xml(&rels)?,
            options,
        )?;

        let mut chart_no = plan.chart_base[index];
        let mut image_no = plan.image_base[index];
        for element in slide.elements() {
            match element {
                Element::Chart(chart) => {
                    add_part(
                        &mut zip,
                        &format!("ppt/charts/chart{chart_no}.xml"),
                        &chart_xml(chart)?,
                        options,
                    )?;
                    chart_no += 1;
                }
                Element::Picture(pic) => {
                    add_part(
                        &mut zip,
                        &format!("ppt/media/image{image_no}.{}", pic.format.extension()),
                        &pic.data,
                        options,
                    )?;
                    image_no += 1;
                }
                _ => {}
            }
        }

        if let (Some(notes), Some(notes_no)) = (slide.notes(), plan.notes_no[index]) {
            add_part(
                &mut zip,
                &format!("ppt/notesSlides/notesSlide{notes_no}.xml"),
                &notes_xml(notes)?,
                options,
            )?;
            add_part(
                &mut zip,
                &format!("ppt/notesSlides/_rels/notesSlide{notes_no}.xml.rels"),
                &rels_xml(&[
                    Rel::numbered(1, REL_NOTES_MASTER, "../notesMasters/notesMaster1.xml"),
                    Rel::numbered(2, REL_SLIDE, format!("../slides/slide{no}.xml")),
                ])?,
                options,
            )?;
        }
    }

    zip.finish()?;
    Ok(())
}

fn add_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    bytes: &[u8],
    options: FileOptions,
) -> Result<(), PackageError> {
    zip.start_file(name, options)?;
    zip.write_all(bytes)?;
    Ok(())
}

fn doc() -> io::Result<Xml> {
    let mut w = Writer::new(Cursor::new(Vec::new()));
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(w)
}

fn into_bytes(w: Xml) -> Vec<u8> {
    w.into_inner().into_inner()
}

fn open(w: &mut Xml, name: &str) -> io::Result<()> {
    w.write_event(Event::Start(BytesStart::new(name)))
}

fn close(w: &mut Xml, name: &str) -> io::Result<()> {
    w.write_event(Event::End(BytesEnd::new(name)))
}

/// Writes `<name val="..."/>`, the ubiquitous chart-part idiom.
fn val_element(w: &mut Xml, name: &str, value: &str) -> io::Result<()> {
    w.create_element(name)
        .with_attribute(("val", value))
        .write_empty()?;
    Ok(())
}

fn rels_xml(rels: &[Rel]) -> Result<Vec<u8>, PackageError> {
    let mut w = doc()?;
    let mut root = BytesStart::new("Relationships");
    root.push_attribute(("xmlns", NS_PKG_RELS));
    w.write_event(Event::Start(root))?;
    for rel in rels {
        w.create_element("Relationship")
            .with_attribute(("Id", rel.id.as_str()))
            .with_attribute(("Type", rel.rel_type))
            .with_attribute(("Target", rel.target.as_str()))
            .write_empty()?;
    }
    close(&mut w, "Relationships")?;
    Ok(into_bytes(w))
}

fn content_types_xml(pres: &Presentation, plan: &Plan) -> Result<Vec<u8>, PackageError> {
    let mut w = doc()?;
    let mut root = BytesStart::new("Types");
    root.push_attribute(("xmlns", NS_CONTENT_TYPES));
    w.write_event(Event::Start(root))?;

    let default = |w: &mut Xml, ext: &str, ct: &str| -> io::Result<()> {
        w.create_element("Default")
            .with_attribute(("Extension", ext))
            .with_attribute(("ContentType", ct))
            .write_empty()?;
        Ok(())
    };
    let over = |w: &mut Xml, part: &str, ct: &str| -> io::Result<()> {
        w.create_element("Override")
            .with_attribute(("PartName", part))
            .with_attribute(("ContentType", ct))
            .write_empty()?;
        Ok(())
    };

    default(&mut w, "rels", CT_RELS)?;
    default(&mut w, "xml", CT_XML)?;
    for format in &plan.image_formats {
        default(&mut w, format.extension(), format.content_type())?;
    }

    over(&mut w, "/ppt/presentation.xml", CT_PRESENTATION)?;
    over(&mut w, "/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER)?;
    over(&mut w, "/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT)?;
    over(&mut w, "/ppt/theme/theme1.xml", CT_THEME)?;
    for no in 1..=pres.slide_count() {
        over(&mut w, &format!("/ppt/slides/slide{no}.xml"), CT_SLIDE)?;
    }
    for no in 1..=plan.chart_total {
        over(&mut w, &format!("/ppt/charts/chart{no}.xml"), CT_CHART)?;
    }
    if plan.has_notes() {
        over(&mut w, "/ppt/notesMasters/notesMaster1.xml", CT_NOTES_MASTER)?;
        for no in 1..=plan.notes_total {
            over(
                &mut w,
                &format!("/ppt/notesSlides/notesSlide{no}.xml"),
                CT_NOTES_SLIDE,
            )?;
        }
    }

    close(&mut w, "Types")?;
    Ok(into_bytes(w))
}

/// Relationship ids of the presentation part: rId1 is the master, slides
/// take rId2..., then the theme, then the notes master when present.
fn presentation_rels(pres: &Presentation, plan: &Plan) -> Vec<Rel> {
    let n = pres.slide_count();
    let mut rels = Vec::with_capacity(n + 3);
    rels.push(Rel::numbered(
        1,
        REL_SLIDE_MASTER,
        "slideMasters/slideMaster1.xml",
    ));
    for i in 0..n {
        rels.push(Rel::numbered(
            2 + i,
            REL_SLIDE,
            format!("slides/slide{}.xml", i + 1),
        ));
    }
    rels.push(Rel::numbered(n + 2, REL_THEME, "theme/theme1.xml"));
    if plan.has_notes() {
        rels.push(Rel::numbered(
            n + 3,
            REL_NOTES_MASTER,
            "notesMasters/notesMaster1.xml",
        ));
    }
    rels
}

fn presentation_xml(pres: &Presentation, plan: &Plan) -> Result<Vec<u8>, PackageError> {
    let n = pres.slide_count();
    let mut w = doc()?;
    let mut root = BytesStart::new("p:presentation");
    root.push_attribute(("xmlns:a", NS_DRAWING));
    root.push_attribute(("xmlns:r", NS_DOC_RELS));
    root.push_attribute(("xmlns:p", NS_PRESENTATION));
    w.write_event(Event::Start(root))?;

    open(&mut w, "p:sldMasterIdLst")?;
    w.create_element("p:sldMasterId")
        .with_attribute(("id", "2147483648"))
        .with_attribute(("r:id", "rId1"))
        .write_empty()?;
    close(&mut w, "p:sldMasterIdLst")?;

    if plan.has_notes() {
        open(&mut w, "p:notesMasterIdLst")?;
        w.create_element("p:notesMasterId")
            .with_attribute(("r:id", format!("rId{}", n + 3).as_str()))
            .write_empty()?;
        close(&mut w, "p:notesMasterIdLst")?;
    }

    open(&mut w, "p:sldIdLst")?;
    for i in 0..n {
        w.create_element("p:sldId")
            .with_attribute(("id", (256 + i).to_string().as_str()))
            .with_attribute(("r:id", format!("rId{}", 2 + i).as_str()))
            .write_empty()?;
    }
    close(&mut w, "p:sldIdLst")?;

    w.create_element("p:sldSz")
        .with_attribute(("cx", pres.slide_width().raw().to_string().as_str()))
        .with_attribute(("cy", pres.slide_height().raw().to_string().as_str()))
        .write_empty()?;
    w.create_element("p:notesSz")
        .with_attribute(("cx", "6858000"))
        .with_attribute(("cy", "9144000"))
        .write_empty()?;

    close(&mut w, "p:presentation")?;
    Ok(into_bytes(w))
}

/// Emits one slide part and its relationship list. Relationship ids are
/// assigned in element order; rId1 is always the layout.
fn slide_xml(slide: &Slide, plan: &Plan, index: usize) -> Result<(Vec<u8>, Vec<Rel>), PackageError> {
    let mut rels = vec![Rel::numbered(
        1,
        REL_SLIDE_LAYOUT,
        "../slideLayouts/slideLayout1.xml",
    )];
    let mut chart_no = plan.chart_base[index];
    let mut image_no = plan.image_base[index];

    let mut w = doc()?;
    let mut root = BytesStart::new("p:sld");
    root.push_attribute(("xmlns:a", NS_DRAWING));
    root.push_attribute(("xmlns:r", NS_DOC_RELS));
    root.push_attribute(("xmlns:p", NS_PRESENTATION));
    w.write_event(Event::Start(root))?;
    open(&mut w, "p:cSld")?;

    if let Some(color) = slide.background() {
        open(&mut w, "p:bg")?;
        open(&mut w, "p:bgPr")?;
        emit_solid_fill(&mut w, color)?;
        w.create_element("a:effectLst").write_empty()?;
        close(&mut w, "p:bgPr")?;
        close(&mut w, "p:bg")?;
    }

    open(&mut w, "p:spTree")?;
    emit_group_header(&mut w)?;

    let mut next_id: usize = 2;
    match slide.layout() {
        SlideLayout::Title => {
            let title = vec![
                Paragraph::new(slide.title().unwrap_or_default())
                    .with_size(44.0)
                    .with_align(Align::Center),
            ];
            emit_placeholder(
                &mut w,
                next_id,
                "Title 1",
                "ctrTitle",
                None,
                CENTER_TITLE_FRAME,
                &title,
                false,
            )?;
            next_id += 1;
            let subtitle: Vec<Paragraph> = slide
                .subtitle()
                .map(|text| {
                    vec![
                        Paragraph::new(text)
                            .with_size(24.0)
                            .with_align(Align::Center),
                    ]
                })
                .unwrap_or_default();
            emit_placeholder(
                &mut w,
                next_id,
                "Subtitle 2",
                "subTitle",
                Some(1),
                SUBTITLE_FRAME,
                &subtitle,
                false,
            )?;
            next_id += 1;
        }
        SlideLayout::TitleAndContent => {
            let title = vec![Paragraph::new(slide.title().unwrap_or_default()).with_size(44.0)];
            emit_placeholder(
                &mut w, next_id, "Title 1", "title", None, TITLE_FRAME, &title, false,
            )?;
            next_id += 1;
            let body: Vec<Paragraph> = slide
                .body()
                .iter()
                .map(|item| Paragraph::new(item.as_str()).with_size(28.0))
                .collect();
            emit_placeholder(
                &mut w,
                next_id,
                "Content Placeholder 2",
                "body",
                Some(1),
                BODY_FRAME,
                &body,
                true,
            )?;
            next_id += 1;
        }
        SlideLayout::Blank => {}
    }

    for element in slide.elements() {
        match element {
            Element::TextBox(text_box) => emit_text_box(&mut w, next_id, text_box)?,
            Element::Table(table) => emit_table(&mut w, next_id, table)?,
            Element::Chart(chart) => {
                let rel_id = format!("rId{}", rels.len() + 1);
                rels.push(Rel {
                    id: rel_id.clone(),
                    rel_type: REL_CHART,
                    target: format!("../charts/chart{chart_no}.xml"),
                });
                chart_no += 1;
                emit_chart_frame(&mut w, next_id, chart.frame, &rel_id)?;
            }
            Element::Picture(pic) => {
                let rel_id = format!("rId{}", rels.len() + 1);
                rels.push(Rel {
                    id: rel_id.clone(),
                    rel_type: REL_IMAGE,
                    target: format!("../media/image{image_no}.{}", pic.format.extension()),
                });
                image_no += 1;
                emit_picture(&mut w, next_id, pic, &rel_id)?;
            }
            Element::Shape(shape) => emit_shape(&mut w, next_id, shape)?,
            Element::Connector(conn) => emit_connector(&mut w, next_id, conn)?,
        }
        next_id += 1;
    }

    if let Some(notes_no) = plan.notes_no[index] {
        rels.push(Rel::numbered(
            rels.len() + 1,
            REL_NOTES_SLIDE,
            format!("../notesSlides/notesSlide{notes_no}.xml"),
        ));
    }

    close(&mut w, "p:spTree")?;
    close(&mut w, "p:cSld")?;
    w.create_element("p:clrMapOvr").write_inner_content(|w| -> io::Result<()> {
        w.create_element("a:masterClrMapping").write_empty()?;
        Ok(())
    })?;
    close(&mut w, "p:sld")?;
    Ok((into_bytes(w), rels))
}

fn notes_xml(notes: &str) -> Result<Vec<u8>, PackageError> {
    let mut w = doc()?;
    let mut root = BytesStart::new("p:notes");
    root.push_attribute(("xmlns:a", NS_DRAWING));
    root.push_attribute(("xmlns:r", NS_DOC_RELS));
    root.push_attribute(("xmlns:p", NS_PRESENTATION));
    w.write_event(Event::Start(root))?;
    open(&mut w, "p:cSld")?;
    open(&mut w, "p:spTree")?;
    emit_group_header(&mut w)?;

    open(&mut w, "p:sp")?;
    emit_nv_sp_pr(
        &mut w,
        2,
        "Notes Placeholder 1",
        Some(("body", Some(1))),
        false,
    )?;
    w.create_element("p:spPr").write_empty()?;
    // Line feeds become paragraph breaks, matching placeholder text rules.
    let paragraphs: Vec<Paragraph> = notes.split('\n').map(Paragraph::new).collect();
    emit_tx_body(&mut w, "p:txBody", &BodyStyle::Placeholder, &paragraphs, false)?;
    close(&mut w, "p:sp")?;

    close(&mut w, "p:spTree")?;
    close(&mut w, "p:cSld")?;
    w.create_element("p:clrMapOvr").write_inner_content(|w| -> io::Result<()> {
        w.create_element("a:masterClrMapping").write_empty()?;
        Ok(())
    })?;
    close(&mut w, "p:notes")?;
    Ok(into_bytes(w))
}

/// The fixed `nvGrpSpPr`/`grpSpPr` prologue every shape tree starts with.
fn emit_group_header(w: &mut Xml) -> io::Result<()> {
    open(w, "p:nvGrpSpPr")?;
    w.create_element("p:cNvPr")
        .with_attribute(("id", "1"))
        .with_attribute(("name", ""))
        .write_empty()?;
    w.create_element("p:cNvGrpSpPr").write_empty()?;
    w.create_element("p:nvPr").write_empty()?;
    close(w, "p:nvGrpSpPr")?;
    w.create_element("p:grpSpPr").write_empty()?;
    Ok(())
}

fn emit_nv_sp_pr(
    w: &mut Xml,
    id: usize,
    name: &str,
    ph: Option<(&str, Option<u32>)>,
    text_box: bool,
) -> io::Result<()> {
    open(w, "p:nvSpPr")?;
    w.create_element("p:cNvPr")
        .with_attribute(("id", id.to_string().as_str()))
        .with_attribute(("name", name))
        .write_empty()?;
    if ph.is_some() {
        w.create_element("p:cNvSpPr").write_inner_content(|w| -> io::Result<()> {
            w.create_element("a:spLocks")
                .with_attribute(("noGrp", "1"))
                .write_empty()?;
            Ok(())
        })?;
    } else if text_box {
        w.create_element("p:cNvSpPr")
            .with_attribute(("txBox", "1"))
            .write_empty()?;
    } else {
        w.create_element("p:cNvSpPr").write_empty()?;
    }
    if let Some((ph_type, ph_idx)) = ph {
        open(w, "p:nvPr")?;
        let mut el = BytesStart::new("p:ph");
        el.push_attribute(("type", ph_type));
        if let Some(idx) = ph_idx {
            el.push_attribute(("idx", idx.to_string().as_str()));
        }
        w.write_event(Event::Empty(el))?;
        close(w, "p:nvPr")?;
    } else {
        w.create_element("p:nvPr").write_empty()?;
    }
    close(w, "p:nvSpPr")
}

fn emit_off_ext(w: &mut Xml, x: Emu, y: Emu, cx: Emu, cy: Emu) -> io::Result<()> {
    w.create_element("a:off")
        .with_attribute(("x", x.raw().to_string().as_str()))
        .with_attribute(("y", y.raw().to_string().as_str()))
        .write_empty()?;
    w.create_element("a:ext")
        .with_attribute(("cx", cx.raw().to_string().as_str()))
        .with_attribute(("cy", cy.raw().to_string().as_str()))
        .write_empty()?;
    Ok(())
}

fn emit_xfrm(w: &mut Xml, frame: Frame) -> io::Result<()> {
    open(w, "a:xfrm")?;
    emit_off_ext(w, frame.x, frame.y, frame.w, frame.h)?;
    close(w, "a:xfrm")
}

fn emit_prst_geom(w: &mut Xml, preset: &str) -> io::Result<()> {
    w.create_element("a:prstGeom")
        .with_attribute(("prst", preset))
        .write_inner_content(|w| -> io::Result<()> {
            w.create_element("a:avLst").write_empty()?;
            Ok(())
        })?;
    Ok(())
}

fn emit_solid_fill(w: &mut Xml, color: Color) -> io::Result<()> {
    open(w, "a:solidFill")?;
    w.create_element("a:srgbClr")
        .with_attribute(("val", color.to_hex().as_str()))
        .write_empty()?;
    close(w, "a:solidFill")
}

/// Run styling shared by paragraphs and table cells.
struct RunStyle<'a> {
    size: Option<FontSize>,
    bold: bool,
    italic: bool,
    color: Option<Color>,
    font: Option<&'a str>,
}

impl<'a> From<&'a Paragraph> for RunStyle<'a> {
    fn from(p: &'a Paragraph) -> Self {
        Self {
            size: p.size,
            bold: p.bold,
            italic: p.italic,
            color: p.color,
            font: p.font.as_deref(),
        }
    }
}

fn emit_run(w: &mut Xml, text: &str, style: &RunStyle<'_>) -> io::Result<()> {
    open(w, "a:r")?;
    let mut rpr = BytesStart::new("a:rPr");
    rpr.push_attribute(("lang", "en-US"));
    if let Some(size) = style.size {
        rpr.push_attribute(("sz", size.centipoints().to_string().as_str()));
    }
    if style.bold {
        rpr.push_attribute(("b", "1"));
    }
    if style.italic {
        rpr.push_attribute(("i", "1"));
    }
    rpr.push_attribute(("dirty", "0"));
    if style.color.is_none() && style.font.is_none() {
        w.write_event(Event::Empty(rpr))?;
    } else {
        w.write_event(Event::Start(rpr))?;
        if let Some(color) = style.color {
            emit_solid_fill(w, color)?;
        }
        if let Some(font) = style.font {
            w.create_element("a:latin")
                .with_attribute(("typeface", font))
                .write_empty()?;
        }
        close(w, "a:rPr")?;
    }
    w.create_element("a:t")
        .write_text_content(BytesText::new(text))?;
    close(w, "a:r")
}

fn emit_paragraph(w: &mut Xml, p: &Paragraph, bullet: bool) -> io::Result<()> {
    open(w, "a:p")?;
    let centered = p.align == Align::Center;
    if centered || bullet {
        let mut ppr = BytesStart::new("a:pPr");
        if centered {
            ppr.push_attribute(("algn", "ctr"));
        }
        if bullet {
            w.write_event(Event::Start(ppr))?;
            w.create_element("a:buFont")
                .with_attribute(("typeface", "Arial"))
                .write_empty()?;
            w.create_element("a:buChar")
                .with_attribute(("char", "\u{2022}"))
                .write_empty()?;
            close(w, "a:pPr")?;
        } else {
            w.write_event(Event::Empty(ppr))?;
        }
    }
    emit_run(w, &p.text, &RunStyle::from(p))?;
    close(w, "a:p")
}

enum BodyStyle {
    /// Plain `<a:bodyPr/>`, inheriting placeholder behavior.
    Placeholder,
    /// Free textbox; `word_wrap` picks `square` over the textbox default
    /// of `none`, and autofit grows the box to its text.
    TextBox { word_wrap: bool },
    /// Autoshape label, vertically centered.
    Label,
}

fn emit_tx_body(
    w: &mut Xml,
    tag: &str,
    body: &BodyStyle,
    paragraphs: &[Paragraph],
    bullet: bool,
) -> io::Result<()> {
    open(w, tag)?;
    match body {
        BodyStyle::Placeholder => {
            w.create_element("a:bodyPr").write_empty()?;
        }
        BodyStyle::TextBox { word_wrap } => {
            w.create_element("a:bodyPr")
                .with_attribute(("wrap", if *word_wrap { "square" } else { "none" }))
                .write_inner_content(|w| -> io::Result<()> {
                    w.create_element("a:spAutoFit").write_empty()?;
                    Ok(())
                })?;
        }
        BodyStyle::Label => {
            w.create_element("a:bodyPr")
                .with_attribute(("rtlCol", "0"))
                .with_attribute(("anchor", "ctr"))
                .write_empty()?;
        }
    }
    w.create_element("a:lstStyle").write_empty()?;
    if paragraphs.is_empty() {
        w.create_element("a:p").write_empty()?;
    } else {
        for p in paragraphs {
            emit_paragraph(w, p, bullet)?;
        }
    }
    close(w, tag)
}

#[allow(clippy::too_many_arguments)]
fn emit_placeholder(
    w: &mut Xml,
    id: usize,
    name: &str,
    ph_type: &str,
    ph_idx: Option<u32>,
    frame: Frame,
    paragraphs: &[Paragraph],
    bullet: bool,
) -> io::Result<()> {
    open(w, "p:sp")?;
    emit_nv_sp_pr(w, id, name, Some((ph_type, ph_idx)), false)?;
    open(w, "p:spPr")?;
    emit_xfrm(w, frame)?;
    close(w, "p:spPr")?;
    emit_tx_body(w, "p:txBody", &BodyStyle::Placeholder, paragraphs, bullet)?;
    close(w, "p:sp")
}

fn emit_text_box(w: &mut Xml, id: usize, text_box: &TextBox) -> io::Result<()> {
    open(w, "p:sp")?;
    emit_nv_sp_pr(w, id, &format!("TextBox {}", id - 1), None, true)?;
    open(w, "p:spPr")?;
    emit_xfrm(w, text_box.frame)?;
    emit_prst_geom(w, "rect")?;
    close(w, "p:spPr")?;
    emit_tx_body(
        w,
        "p:txBody",
        &BodyStyle::TextBox {
            word_wrap: text_box.word_wrap,
        },
        &text_box.paragraphs,
        false,
    )?;
    close(w, "p:sp")
}

fn emit_shape(w: &mut Xml, id: usize, shape: &Shape) -> io::Result<()> {
    open(w, "p:sp")?;
    emit_nv_sp_pr(w, id, &format!("Shape {}", id - 1), None, false)?;
    open(w, "p:spPr")?;
    emit_xfrm(w, shape.frame)?;
    emit_prst_geom(w, shape.kind.preset())?;
    if let Some(fill) = shape.fill {
        emit_solid_fill(w, fill)?;
    }
    if let Some(line) = shape.line {
        open(w, "a:ln")?;
        emit_solid_fill(w, line)?;
        close(w, "a:ln")?;
    }
    close(w, "p:spPr")?;
    let label: Vec<Paragraph> = shape
        .text
        .as_deref()
        .map(|text| vec![Paragraph::new(text).with_align(Align::Center)])
        .unwrap_or_default();
    emit_tx_body(w, "p:txBody", &BodyStyle::Label, &label, false)?;
    close(w, "p:sp")
}

fn emit_connector(w: &mut Xml, id: usize, conn: &Connector) -> io::Result<()> {
    open(w, "p:cxnSp")?;
    open(w, "p:nvCxnSpPr")?;
    w.create_element("p:cNvPr")
        .with_attribute(("id", id.to_string().as_str()))
        .with_attribute(("name", format!("Straight Connector {}", id - 1).as_str()))
        .write_empty()?;
    w.create_element("p:cNvCxnSpPr").write_empty()?;
    w.create_element("p:nvPr").write_empty()?;
    close(w, "p:nvCxnSpPr")?;

    open(w, "p:spPr")?;
    let (x1, y1) = (conn.start.0.raw(), conn.start.1.raw());
    let (x2, y2) = (conn.end.0.raw(), conn.end.1.raw());
    let mut xfrm = BytesStart::new("a:xfrm");
    if x2 < x1 {
        xfrm.push_attribute(("flipH", "1"));
    }
    if y2 < y1 {
        xfrm.push_attribute(("flipV", "1"));
    }
    w.write_event(Event::Start(xfrm))?;
    emit_off_ext(
        w,
        Emu::new(x1.min(x2)),
        Emu::new(y1.min(y2)),
        Emu::new((x2 - x1).abs()),
        Emu::new((y2 - y1).abs()),
    )?;
    close(w, "a:xfrm")?;
    emit_prst_geom(w, "line")?;
    let mut ln = BytesStart::new("a:ln");
    ln.push_attribute(("w", conn.width.raw().to_string().as_str()));
    if let Some(color) = conn.color {
        w.write_event(Event::Start(ln))?;
        emit_solid_fill(w, color)?;
        close(w, "a:ln")?;
    } else {
        w.write_event(Event::Empty(ln))?;
    }
    close(w, "p:spPr")?;
    close(w, "p:cxnSp")
}

fn emit_picture(w: &mut Xml, id: usize, pic: &Picture, rel_id: &str) -> io::Result<()> {
    open(w, "p:pic")?;
    open(w, "p:nvPicPr")?;
    w.create_element("p:cNvPr")
        .with_attribute(("id", id.to_string().as_str()))
        .with_attribute(("name", format!("Picture {}", id - 1).as_str()))
        .write_empty()?;
    w.create_element("p:cNvPicPr").write_inner_content(|w| -> io::Result<()> {
        w.create_element("a:picLocks")
            .with_attribute(("noChangeAspect", "1"))
            .write_empty()?;
        Ok(())
    })?;
    w.create_element("p:nvPr").write_empty()?;
    close(w, "p:nvPicPr")?;

    open(w, "p:blipFill")?;
    w.create_element("a:blip")
        .with_attribute(("r:embed", rel_id))
        .write_empty()?;
    w.create_element("a:stretch").write_inner_content(|w| -> io::Result<()> {
        w.create_element("a:fillRect").write_empty()?;
        Ok(())
    })?;
    close(w, "p:blipFill")?;

    open(w, "p:spPr")?;
    emit_xfrm(w, pic.frame)?;
    emit_prst_geom(w, "rect")?;
    close(w, "p:spPr")?;
    close(w, "p:pic")
}

fn emit_graphic_frame<F>(
    w: &mut Xml,
    id: usize,
    name: &str,
    frame: Frame,
    uri: &str,
    inner: F,
) -> io::Result<()>
where
    F: FnOnce(&mut Xml) -> io::Result<()>,
{
    open(w, "p:graphicFrame")?;
    open(w, "p:nvGraphicFramePr")?;
    w.create_element("p:cNvPr")
        .with_attribute(("id", id.to_string().as_str()))
        .with_attribute(("name", name))
        .write_empty()?;
    w.create_element("p:cNvGraphicFramePr")
        .write_inner_content(|w| -> io::Result<()> {
            w.create_element("a:graphicFrameLocks")
                .with_attribute(("noGrp", "1"))
                .write_empty()?;
            Ok(())
        })?;
    w.create_element("p:nvPr").write_empty()?;
    close(w, "p:nvGraphicFramePr")?;
    open(w, "p:xfrm")?;
    emit_off_ext(w, frame.x, frame.y, frame.w, frame.h)?;
    close(w, "p:xfrm")?;
    open(w, "a:graphic")?;
    let mut data = BytesStart::new("a:graphicData");
    data.push_attribute(("uri", uri));
    w.write_event(Event::Start(data))?;
    inner(w)?;
    close(w, "a:graphicData")?;
    close(w, "a:graphic")?;
    close(w, "p:graphicFrame")
}

fn emit_chart_frame(w: &mut Xml, id: usize, frame: Frame, rel_id: &str) -> io::Result<()> {
    emit_graphic_frame(
        w,
        id,
        &format!("Chart {}", id - 1),
        frame,
        "http://schemas.openxmlformats.org/drawingml/2006/chart",
        |w| {
            let mut chart = BytesStart::new("c:chart");
            chart.push_attribute(("xmlns:c", NS_CHART));
            chart.push_attribute(("xmlns:r", NS_DOC_RELS));
            chart.push_attribute(("r:id", rel_id));
            w.write_event(Event::Empty(chart))
        },
    )
}

fn emit_table(w: &mut Xml, id: usize, table: &Table) -> io::Result<()> {
    emit_graphic_frame(
        w,
        id,
        &format!("Table {}", id - 1),
        table.frame,
        "http://schemas.openxmlformats.org/drawingml/2006/table",
        |w| emit_table_content(w, table),
    )
}

#[allow(clippy::cast_possible_wrap)]
fn emit_table_content(w: &mut Xml, table: &Table) -> io::Result<()> {
    let cols = table.col_count();
    let rows = table.rows.len();
    open(w, "a:tbl")?;
    w.create_element("a:tblPr")
        .with_attribute(("firstRow", "1"))
        .with_attribute(("bandRow", "1"))
        .write_empty()?;
    open(w, "a:tblGrid")?;
    let col_width = if cols > 0 {
        table.frame.w.raw() / cols as i64
    } else {
        0
    };
    for _ in 0..cols {
        w.create_element("a:gridCol")
            .with_attribute(("w", col_width.to_string().as_str()))
            .write_empty()?;
    }
    close(w, "a:tblGrid")?;
    let row_height = if rows > 0 {
        table.frame.h.raw() / rows as i64
    } else {
        0
    };
    let pad = TableCell::new("");
    for row in &table.rows {
        let mut tr = BytesStart::new("a:tr");
        tr.push_attribute(("h", row_height.to_string().as_str()));
        w.write_event(Event::Start(tr))?;
        // Every row must span the full grid; short rows get empty cells.
        for col in 0..cols {
            emit_table_cell(w, row.get(col).unwrap_or(&pad))?;
        }
        close(w, "a:tr")?;
    }
    close(w, "a:tbl")
}

fn emit_table_cell(w: &mut Xml, cell: &TableCell) -> io::Result<()> {
    open(w, "a:tc")?;
    open(w, "a:txBody")?;
    w.create_element("a:bodyPr").write_empty()?;
    w.create_element("a:lstStyle").write_empty()?;
    open(w, "a:p")?;
    emit_run(
        w,
        &cell.text,
        &RunStyle {
            size: None,
            bold: cell.bold,
            italic: false,
            color: cell.text_color,
            font: None,
        },
    )?;
    close(w, "a:p")?;
    close(w, "a:txBody")?;
    if let Some(fill) = cell.fill {
        open(w, "a:tcPr")?;
        emit_solid_fill(w, fill)?;
        close(w, "a:tcPr")?;
    } else {
        w.create_element("a:tcPr").write_empty()?;
    }
    close(w, "a:tc")
}

/// Emits one chart part. Series data is written as literal caches
/// (`c:strLit`/`c:numLit`) since there is no backing workbook.
fn chart_xml(chart: &Chart) -> Result<Vec<u8>, PackageError> {
    let mut w = doc()?;
    let mut root = BytesStart::new("c:chartSpace");
    root.push_attribute(("xmlns:c", NS_CHART));
    root.push_attribute(("xmlns:a", NS_DRAWING));
    root.push_attribute(("xmlns:r", NS_DOC_RELS));
    w.write_event(Event::Start(root))?;
    open(&mut w, "c:chart")?;
    open(&mut w, "c:plotArea")?;
    w.create_element("c:layout").write_empty()?;

    let (tag, axes) = match chart.kind {
        ChartKind::Bar | ChartKind::Column => ("c:barChart", true),
        ChartKind::Line => ("c:lineChart", true),
        ChartKind::Area => ("c:areaChart", true),
        ChartKind::Pie => ("c:pieChart", false),
    };
    open(&mut w, tag)?;
    match chart.kind {
        ChartKind::Bar => {
            val_element(&mut w, "c:barDir", "bar")?;
            val_element(&mut w, "c:grouping", "clustered")?;
            val_element(&mut w, "c:varyColors", "0")?;
        }
        ChartKind::Column => {
            val_element(&mut w, "c:barDir", "col")?;
            val_element(&mut w, "c:grouping", "clustered")?;
            val_element(&mut w, "c:varyColors", "0")?;
        }
        ChartKind::Line | ChartKind::Area => {
            val_element(&mut w, "c:grouping", "standard")?;
            val_element(&mut w, "c:varyColors", "0")?;
        }
        ChartKind::Pie => {
            val_element(&mut w, "c:varyColors", "1")?;
        }
    }
    for (idx, series) in chart.data.series.iter().enumerate() {
        emit_series(&mut w, idx, series, &chart.data.categories)?;
    }
    if axes {
        val_element(&mut w, "c:axId", CAT_AXIS_ID)?;
        val_element(&mut w, "c:axId", VAL_AXIS_ID)?;
    } else {
        val_element(&mut w, "c:firstSliceAng", "0")?;
    }
    close(&mut w, tag)?;

    if axes {
        // Horizontal bars swap the axis positions.
        let (cat_pos, val_pos) = if chart.kind == ChartKind::Bar {
            ("l", "b")
        } else {
            ("b", "l")
        };
        emit_axis(&mut w, "c:catAx", CAT_AXIS_ID, cat_pos, VAL_AXIS_ID)?;
        emit_axis(&mut w, "c:valAx", VAL_AXIS_ID, val_pos, CAT_AXIS_ID)?;
    }
    close(&mut w, "c:plotArea")?;

    if chart.legend {
        open(&mut w, "c:legend")?;
        val_element(&mut w, "c:legendPos", "r")?;
        val_element(&mut w, "c:overlay", "0")?;
        close(&mut w, "c:legend")?;
    }
    val_element(&mut w, "c:plotVisOnly", "1")?;
    close(&mut w, "c:chart")?;
    close(&mut w, "c:chartSpace")?;
    Ok(into_bytes(w))
}

fn emit_series(w: &mut Xml, idx: usize, series: &Series, categories: &[String]) -> io::Result<()> {
    open(w, "c:ser")?;
    val_element(w, "c:idx", &idx.to_string())?;
    val_element(w, "c:order", &idx.to_string())?;
    open(w, "c:tx")?;
    w.create_element("c:v")
        .write_text_content(BytesText::new(&series.name))?;
    close(w, "c:tx")?;

    open(w, "c:cat")?;
    open(w, "c:strLit")?;
    val_element(w, "c:ptCount", &categories.len().to_string())?;
    for (i, category) in categories.iter().enumerate() {
        let mut pt = BytesStart::new("c:pt");
        pt.push_attribute(("idx", i.to_string().as_str()));
        w.write_event(Event::Start(pt))?;
        w.create_element("c:v")
            .write_text_content(BytesText::new(category))?;
        close(w, "c:pt")?;
    }
    close(w, "c:strLit")?;
    close(w, "c:cat")?;

    open(w, "c:val")?;
    open(w, "c:numLit")?;
    val_element(w, "c:ptCount", &series.values.len().to_string())?;
    for (i, value) in series.values.iter().enumerate() {
        let mut pt = BytesStart::new("c:pt");
        pt.push_attribute(("idx", i.to_string().as_str()));
        w.write_event(Event::Start(pt))?;
        w.create_element("c:v")
            .write_text_content(BytesText::new(&value.to_string()))?;
        close(w, "c:pt")?;
    }
    close(w, "c:numLit")?;
    close(w, "c:val")?;
    close(w, "c:ser")
}

fn emit_axis(w: &mut Xml, tag: &str, ax_id: &str, pos: &str, cross_ax: &str) -> io::Result<()> {
    open(w, tag)?;
    val_element(w, "c:axId", ax_id)?;
    open(w, "c:scaling")?;
    val_element(w, "c:orientation", "minMax")?;
    close(w, "c:scaling")?;
    val_element(w, "c:delete", "0")?;
    val_element(w, "c:axPos", pos)?;
    val_element(w, "c:crossAx", cross_ax)?;
    close(w, tag)
}

const SLIDE_MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#;

const SLIDE_LAYOUT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank"><p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#;

const NOTES_MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:notesMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/></p:notesMaster>"#;

const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2><a:accent1><a:srgbClr val="4472C4"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#;

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::chart::ChartData;

    fn to_xml(bytes: &[u8]) -> String {
        String::from_utf8(bytes.to_vec()).expect("part is utf-8")
    }

    #[test]
    fn plan_numbers_parts_globally() {
        let mut pres = Presentation::new();
        let one = pres.add_slide(SlideLayout::Blank);
        one.push(Chart::new(
            Frame::from_inches(1.0, 1.0, 8.0, 5.0),
            ChartKind::Column,
            ChartData::new(vec!["a".into()], vec![Series::new("s", vec![1.0])]),
        ));
        let two = pres.add_slide(SlideLayout::Blank);
        two.push(Chart::new(
            Frame::from_inches(1.0, 1.0, 8.0, 5.0),
            ChartKind::Pie,
            ChartData::new(vec!["a".into()], vec![Series::new("s", vec![1.0])]),
        ));
        two.set_notes("remember");

        let plan = Plan::build(&pres);
        assert_eq!(plan.chart_base, [1, 2]);
        assert_eq!(plan.chart_total, 2);
        assert_eq!(plan.notes_no, [None, Some(1)]);
        assert!(plan.has_notes());
    }

    #[test]
    fn slide_xml_escapes_text() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::Title).set_title("A < B & C");
        let plan = Plan::build(&pres);
        let (xml, _) = slide_xml(&pres.slides()[0], &plan, 0).expect("slide xml");
        let xml = to_xml(&xml);
        assert!(xml.contains("A &lt; B &amp; C"));
        assert!(!xml.contains("A < B"));
    }

    #[test]
    fn slide_rels_start_with_layout() {
        let mut pres = Presentation::new();
        let slide = pres.add_slide(SlideLayout::Blank);
        slide.push(Chart::new(
            Frame::from_inches(1.0, 1.0, 8.0, 5.0),
            ChartKind::Line,
            ChartData::new(vec!["a".into()], vec![Series::new("s", vec![1.0])]),
        ));
        let plan = Plan::build(&pres);
        let (_, rels) = slide_xml(&pres.slides()[0], &plan, 0).expect("slide xml");
        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0].id, "rId1");
        assert_eq!(rels[0].rel_type, REL_SLIDE_LAYOUT);
        assert_eq!(rels[1].target, "../charts/chart1.xml");
    }

    #[test]
    fn bar_chart_swaps_axis_positions() {
        let chart = Chart::new(
            Frame::from_inches(1.0, 1.0, 8.0, 5.0),
            ChartKind::Bar,
            ChartData::new(
                vec!["x".into(), "y".into()],
                vec![Series::new("s", vec![1.0, 2.0])],
            ),
        );
        let xml = to_xml(&chart_xml(&chart).expect("chart xml"));
        assert!(xml.contains(r#"<c:barDir val="bar"/>"#));
        let cat = xml.find("c:catAx").expect("category axis");
        let pos_l = xml[cat..].find(r#"<c:axPos val="l"/>"#).expect("axis pos");
        assert!(pos_l > 0);
    }

    #[test]
    fn pie_chart_has_no_axes() {
        let chart = Chart::new(
            Frame::from_inches(1.0, 1.0, 8.0, 5.0),
            ChartKind::Pie,
            ChartData::new(vec!["x".into()], vec![Series::new("s", vec![3.0])]),
        );
        let xml = to_xml(&chart_xml(&chart).expect("chart xml"));
        assert!(!xml.contains("c:catAx"));
        assert!(!xml.contains("c:valAx"));
        assert!(xml.contains(r#"<c:varyColors val="1"/>"#));
    }

    #[test]
    fn package_contains_expected_parts() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::Title).set_title("T");
        pres.add_slide(SlideLayout::Blank).set_notes("n");
        let mut buf = Cursor::new(Vec::new());
        write_package(&pres, &mut buf).expect("write package");

        let mut archive = zip::ZipArchive::new(buf).expect("open archive");
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/notesSlides/notesSlide1.xml",
            "ppt/notesMasters/notesMaster1.xml",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing part {name}");
        }
    }
}
