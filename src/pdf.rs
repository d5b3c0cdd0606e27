//! Report document rendering.
//!
//! Two stages: a pure pagination pass turns the declarative
//! [`DocumentModel`](crate::document::DocumentModel) into positioned page
//! layouts, then the layouts are emitted as PDF objects. Keeping the
//! geometry here means the aggregation and document model stay free of
//! layout concerns.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::document::{Cell, ClientTable, DocumentModel, TotalsFooter, COLUMN_COUNT, COLUMN_LABELS};
use crate::error::Result;

// A4 geometry in PDF points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 36;
const COLUMN_WIDTHS: [i64; COLUMN_COUNT] = [92, 78, 92, 76, 76, 109];

const BODY_SIZE: i64 = 8;
const LINE_SPACING: i64 = 11;

/// A rendered report plus the page count the layout produced.
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Render the document model into PDF bytes.
pub fn render(model: &DocumentModel) -> Result<RenderedReport> {
    let pages = paginate(model);
    let bytes = emit(&pages)?;
    Ok(RenderedReport {
        bytes,
        page_count: pages.len(),
    })
}

/// Render the document model and write it to an async sink.
///
/// Resolves only after the sink reports a completed flush, and returns the
/// number of pages written.
pub async fn write_report<W>(model: &DocumentModel, sink: &mut W) -> Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let rendered = render(model)?;
    sink.write_all(&rendered.bytes).await?;
    sink.flush().await?;
    Ok(rendered.page_count)
}

struct TextSpan {
    x: i64,
    y: i64,
    size: i64,
    bold: bool,
    text: String,
}

/// Horizontal rule across the content width.
struct Rule {
    x1: i64,
    y: i64,
    x2: i64,
}

struct PageLayout {
    texts: Vec<TextSpan>,
    rules: Vec<Rule>,
}

impl PageLayout {
    fn new() -> Self {
        Self {
            texts: Vec::new(),
            rules: Vec::new(),
        }
    }
}

/// Cursor-driven page builder: tracks the current page and baseline.
struct Paginator {
    pages: Vec<PageLayout>,
    current: PageLayout,
    y: i64,
}

impl Paginator {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: PageLayout::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn span(&mut self, x: i64, y: i64, size: i64, bold: bool, text: String) {
        if !text.is_empty() {
            self.current.texts.push(TextSpan {
                x,
                y,
                size,
                bold,
                text,
            });
        }
    }

    fn rule(&mut self, y: i64) {
        self.current.rules.push(Rule {
            x1: MARGIN,
            y,
            x2: PAGE_WIDTH - MARGIN,
        });
    }

    fn fits(&self, height: i64) -> bool {
        self.y - height >= MARGIN
    }

    fn break_page(&mut self) {
        let finished = std::mem::replace(&mut self.current, PageLayout::new());
        self.pages.push(finished);
        self.y = PAGE_HEIGHT - MARGIN - 10;
    }

    fn finish(mut self) -> Vec<PageLayout> {
        self.pages.push(self.current);
        self.pages
    }
}

fn paginate(model: &DocumentModel) -> Vec<PageLayout> {
    let mut p = Paginator::new();
    draw_header(&mut p, model);
    for (i, table) in model.tables.iter().enumerate() {
        // Page break between clients, never after the last one.
        if i > 0 {
            p.break_page();
        }
        draw_table(&mut p, table);
    }
    p.finish()
}

fn draw_header(p: &mut Paginator, model: &DocumentModel) {
    p.y -= 16;
    p.span(MARGIN, p.y, 16, true, model.title.clone());
    match &model.date_range {
        // Taller header band when a date range is shown.
        Some(range) => {
            p.y -= 18;
            p.span(MARGIN, p.y, 10, false, range.clone());
            p.y -= 22;
        }
        None => p.y -= 24,
    }
}

fn draw_table(p: &mut Paginator, table: &ClientTable) {
    draw_section_title(p, table);
    draw_column_header(p);
    for row in &table.rows {
        if !p.fits(row_height(row)) {
            p.break_page();
            draw_column_header(p);
        }
        draw_row(p, row);
    }
    draw_footer(p, &table.footer);
}

fn draw_section_title(p: &mut Paginator, table: &ClientTable) {
    // Keep the title attached to the column header and at least one row.
    if !p.fits(22 + 16 + 2 * LINE_SPACING + 6) {
        p.break_page();
    }
    p.y -= 18;
    p.span(MARGIN, p.y, 11, true, table.client_name.clone());
    p.y -= 4;
}

fn draw_column_header(p: &mut Paginator) {
    p.y -= 12;
    for (i, label) in COLUMN_LABELS.iter().enumerate() {
        p.span(column_x(i), p.y, BODY_SIZE, true, (*label).to_string());
    }
    p.y -= 4;
    p.rule(p.y);
}

fn row_height(row: &[Cell; COLUMN_COUNT]) -> i64 {
    let lines = row.iter().map(|cell| cell.lines.len()).max().unwrap_or(1) as i64;
    LINE_SPACING * lines + 6
}

fn draw_row(p: &mut Paginator, row: &[Cell; COLUMN_COUNT]) {
    let top = p.y - LINE_SPACING;
    for (i, cell) in row.iter().enumerate() {
        let budget = (COLUMN_WIDTHS[i] / 5) as usize;
        for (k, line) in cell.lines.iter().enumerate() {
            p.span(
                column_x(i),
                top - LINE_SPACING * k as i64,
                BODY_SIZE,
                false,
                truncate(line, budget),
            );
        }
    }
    p.y -= row_height(row);
}

fn draw_footer(p: &mut Paginator, footer: &TotalsFooter) {
    if !p.fits(3 * 13 + 12) {
        p.break_page();
    }
    p.y -= 6;
    p.rule(p.y);
    // Totals span the last two columns.
    let x = column_x(4);
    p.y -= 14;
    p.span(x, p.y, 9, false, footer.fee_line.clone());
    p.y -= 13;
    p.span(x, p.y, 9, false, footer.credit_line.clone());
    p.y -= 13;
    p.span(x, p.y, 9, true, footer.total_line.clone());
    p.y -= 6;
}

fn column_x(index: usize) -> i64 {
    MARGIN + COLUMN_WIDTHS[..index].iter().sum::<i64>()
}

/// Clamp a cell line to its column's character budget.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Assemble the page layouts into a PDF document.
fn emit(pages: &[PageLayout]) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica"
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold"
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => regular_id, "F2" => bold_id }
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let mut operations: Vec<Operation> = Vec::new();
        for rule in &page.rules {
            operations.push(Operation::new("w", vec![1.into()]));
            operations.push(Operation::new("m", vec![rule.x1.into(), rule.y.into()]));
            operations.push(Operation::new("l", vec![rule.x2.into(), rule.y.into()]));
            operations.push(Operation::new("S", vec![]));
        }
        for span in &page.texts {
            let font = if span.bold { "F2" } else { "F1" };
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec![font.into(), span.size.into()]));
            operations.push(Operation::new("Td", vec![span.x.into(), span.y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(span.text.as_str())],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()]
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
