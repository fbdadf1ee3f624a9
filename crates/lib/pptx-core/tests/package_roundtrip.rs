use std::io::Cursor;

use pptx_core::{
    Align, Chart, ChartData, ChartKind, Color, Connector, Element, Emu, Frame, Paragraph,
    Presentation, Series, Shape, ShapeKind, SlideLayout, Table, TableCell, TextBox,
};

fn sample_deck() -> Presentation {
    let mut pres = Presentation::new();

    let title = pres.add_slide(SlideLayout::Title);
    title.set_title("Quarterly Review");
    title.set_subtitle("Prepared by the data team");

    let content = pres.add_slide(SlideLayout::TitleAndContent);
    content.set_title("Agenda");
    content.push_bullet("Revenue");
    content.push_bullet("Costs");
    content.push_bullet("Outlook");
    content.set_notes("Keep this section short.\nHand over to finance.");

    let visuals = pres.add_slide(SlideLayout::Blank);
    visuals.set_background(Color::new(0x10, 0x20, 0x30));
    visuals.push(
        TextBox::new(Frame::from_inches(1.0, 0.5, 4.0, 1.0)).with_paragraph(
            Paragraph::new("Q4 Highlights")
                .with_size(20.0)
                .with_bold(true)
                .with_align(Align::Center),
        ),
    );
    visuals.push(Chart::new(
        Frame::from_inches(1.0, 2.0, 8.0, 4.5),
        ChartKind::Column,
        ChartData::new(
            vec!["Q1".into(), "Q2".into()],
            vec![Series::new("Revenue", vec![100.0, 150.0])],
        ),
    ));
    visuals.push(Table::new(
        Frame::from_inches(1.0, 5.0, 8.0, 1.5),
        vec![
            vec![TableCell::new("Metric").with_bold(true), TableCell::new("Value")],
            vec![TableCell::new("Revenue"), TableCell::new("150")],
        ],
    ));
    visuals.push(
        Shape::new(Frame::from_inches(4.0, 3.0, 1.0, 1.0), ShapeKind::Oval)
            .with_fill(Color::new(0x44, 0x72, 0xC4)),
    );
    visuals.push(Connector::new(
        (Emu::from_inches(1.0), Emu::from_inches(6.5)),
        (Emu::from_inches(9.0), Emu::from_inches(6.5)),
        Emu::from_points(2.0),
    ));
    pres
}

#[test]
fn save_and_reopen_keeps_text_observables() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("deck.pptx");
    let pres = sample_deck();
    pres.save(&path).expect("save should succeed");

    let reopened = Presentation::open(&path).expect("open should succeed");
    assert_eq!(reopened.slide_count(), 3);

    let title = reopened.slide(0).expect("title slide");
    assert_eq!(title.layout(), SlideLayout::Title);
    assert_eq!(title.title(), Some("Quarterly Review"));
    assert_eq!(title.subtitle(), Some("Prepared by the data team"));

    let content = reopened.slide(1).expect("content slide");
    assert_eq!(content.layout(), SlideLayout::TitleAndContent);
    assert_eq!(content.title(), Some("Agenda"));
    assert_eq!(content.body(), ["Revenue", "Costs", "Outlook"]);
    assert_eq!(
        content.notes(),
        Some("Keep this section short.\nHand over to finance.")
    );

    let visuals = reopened.slide(2).expect("visuals slide");
    assert_eq!(visuals.layout(), SlideLayout::Blank);
    assert_eq!(visuals.background(), Some(Color::new(0x10, 0x20, 0x30)));
    let text_box = visuals
        .elements()
        .iter()
        .find_map(|element| match element {
            Element::TextBox(text_box) => Some(text_box),
            _ => None,
        })
        .expect("text box should be rebuilt");
    assert_eq!(text_box.paragraphs.len(), 1);
    assert_eq!(text_box.paragraphs[0].text, "Q4 Highlights");
    assert!(text_box.paragraphs[0].bold);
    assert_eq!(text_box.paragraphs[0].align, Align::Center);
}

#[test]
fn write_to_memory_reads_back() {
    let pres = sample_deck();
    let mut buf = Cursor::new(Vec::new());
    pres.write_to(&mut buf).expect("write should succeed");
    buf.set_position(0);
    let reopened = Presentation::read_from(buf).expect("read should succeed");
    assert_eq!(reopened.slide_count(), pres.slide_count());
    assert_eq!(reopened.slide_width(), Emu::from_inches(10.0));
    assert_eq!(reopened.slide_height(), Emu::from_inches(7.5));
}

#[test]
fn opening_a_non_package_fails() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("not-a-deck.pptx");
    std::fs::write(&path, b"plain text").expect("write fixture");
    assert!(Presentation::open(&path).is_err());
}
