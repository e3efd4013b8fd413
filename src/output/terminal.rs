use crate::formatting::{FormattingConfig, OutputFormatter};
use crate::report::{Cell, Report, Section, NO_DATA};
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Cell as TableCell, CellAlignment, ContentArrangement, Table};

/// Render a report as boxed terminal tables.
pub fn render_terminal(report: &Report, formatting: FormattingConfig) -> String {
    let formatter = formatting.formatter();
    let use_color = formatting.color.should_use_color();

    let mut blocks = vec![format!(
        "{}\n{}",
        formatter.header(&report.title),
        formatter.dim(&format!("Generado: {}", report.generated_on.format("%d/%m/%Y")))
    )];
    for section in &report.sections {
        blocks.push(format!(
            "{}\n{}",
            formatter.bold(&section.title),
            section_table(section, formatter.as_ref(), use_color)
        ));
    }
    blocks.join("\n\n")
}

fn section_table(section: &Section, formatter: &dyn OutputFormatter, use_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(if use_color { UTF8_FULL } else { ASCII_MARKDOWN })
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(section.headers());

    for row in &section.rows {
        let placeholder = matches!(row.first(), Some(Cell::Text(t)) if t == NO_DATA);
        let cells = row.iter().zip(&section.columns).map(|(cell, column)| {
            let text = cell.render();
            let text = if placeholder { formatter.dim(&text) } else { text };
            let alignment = if column.kind.is_numeric() {
                CellAlignment::Right
            } else {
                CellAlignment::Left
            };
            TableCell::new(text).set_alignment(alignment)
        });
        table.add_row(cells);
    }
    table
}
