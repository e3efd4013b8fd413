use crate::report::{Cell, ColumnKind, Report, Section};
use std::fmt::Write;

/// Render a report as Markdown: one `##` heading and table per section.
pub fn render_markdown(report: &Report) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(out, "# {}", report.title)?;
    writeln!(out)?;
    writeln!(out, "Generado: {}", report.generated_on.format("%d/%m/%Y"))?;
    for section in &report.sections {
        writeln!(out)?;
        write_section(out, section)?;
    }
    Ok(())
}

fn write_section(out: &mut String, section: &Section) -> std::fmt::Result {
    writeln!(out, "## {}", section.title)?;
    writeln!(out)?;

    let headers: Vec<String> = section.headers().into_iter().map(escape).collect();
    writeln!(out, "| {} |", headers.join(" | "))?;

    let separators: Vec<&str> = section
        .columns
        .iter()
        .map(|c| alignment(c.kind))
        .collect();
    writeln!(out, "|{}|", separators.join("|"))?;

    for row in &section.rows {
        let cells: Vec<String> = row.iter().map(|cell| escape(&cell_text(cell))).collect();
        writeln!(out, "| {} |", cells.join(" | "))?;
    }
    Ok(())
}

fn alignment(kind: ColumnKind) -> &'static str {
    if kind.is_numeric() {
        "---:"
    } else {
        "---"
    }
}

fn cell_text(cell: &Cell) -> String {
    cell.render()
}

fn escape(text: impl AsRef<str>) -> String {
    text.as_ref().replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::scenario_report;
    use crate::report::columns;

    #[test]
    fn test_markdown_tables() {
        let markdown = render_markdown(&scenario_report());

        assert!(markdown.starts_with("# Reporte de Servicios\n\nGenerado: 30/06/2024\n"));
        assert!(markdown.contains("## Top 4 Servicios\n\n| Servicio | Solicitudes | % del Total |\n|---|---:|---:|\n"));
        assert!(markdown.contains("| A | 30 | 75.0% |"));
        assert!(markdown.contains("| N/A | 0 | 0% |"));
    }

    #[test]
    fn test_pipes_are_escaped() {
        let mut section = Section::new("S", columns(&[("a|b", ColumnKind::Text)]));
        section.push(vec![Cell::text("x|y")]);
        let mut out = String::new();
        write_section(&mut out, &section).unwrap();
        assert!(out.contains("| a\\|b |"));
        assert!(out.contains("| x\\|y |"));
    }
}
