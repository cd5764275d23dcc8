//! Raw text from OpenXML word-processing documents.
//!
//! Only run text survives: one line per paragraph, tabs and breaks kept, all
//! formatting dropped. Table cells are read in row order, one line per cell
//! paragraph, since pro-formas are often laid out as label/value tables.

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};
use panel_core::{Error, Result};

/// Extract the document body text from .docx bytes.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let docx = read_docx(bytes).map_err(|e| Error::DocumentParse(format!("Invalid DOCX: {}", e)))?;

    let mut out = String::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(para) => push_paragraph(para, &mut out),
            DocumentChild::Table(table) => push_table(table, &mut out),
            _ => {}
        }
    }
    Ok(out)
}

fn push_paragraph(para: &Paragraph, out: &mut String) {
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                match rc {
                    RunChild::Text(t) => out.push_str(&t.text),
                    RunChild::Tab(_) => out.push('\t'),
                    RunChild::Break(_) => out.push('\n'),
                    _ => {}
                }
            }
        }
    }
    out.push('\n');
}

fn push_table(table: &Table, out: &mut String) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(para) => push_paragraph(para, out),
                    TableCellContent::Table(nested) => push_table(nested, out),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const CONTENT_TYPES: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
        <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
        <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
        <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
        <Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
        </Types>";
    const PACKAGE_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
        <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
        <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\
        </Relationships>";
    const DOCUMENT_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
        <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\"></Relationships>";

    fn paragraph_xml(text: &str) -> String {
        let escaped = text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", escaped)
    }

    /// Zip a complete package around a `<w:body>` fragment.
    pub(crate) fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{}<w:sectPr/></w:body></w:document>",
            body
        );

        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            let options = zip::write::SimpleFileOptions::default();
            for (name, data) in [
                ("[Content_Types].xml", CONTENT_TYPES),
                ("_rels/.rels", PACKAGE_RELS),
                ("word/_rels/document.xml.rels", DOCUMENT_RELS),
                ("word/document.xml", xml.as_str()),
            ] {
                writer.start_file(name, options).unwrap();
                writer.write_all(data.as_bytes()).unwrap();
            }
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    /// Build a minimal .docx whose body has one paragraph per entry.
    pub(crate) fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs.iter().map(|p| paragraph_xml(p)).collect();
        docx_with_body(&body)
    }

    #[test]
    fn test_paragraphs_become_lines() {
        let bytes = docx_with_paragraphs(&["Name Jo Smith", "Diocese London"]);
        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "Name Jo Smith\nDiocese London\n");
    }

    #[test]
    fn test_runs_tabs_and_breaks() {
        let body = "<w:p><w:r><w:t>Contact</w:t></w:r><w:r><w:t>DDO</w:t></w:r>\
                    <w:r><w:tab/><w:t>Revd A</w:t><w:br/><w:t>email: a@b.org</w:t></w:r></w:p>";
        let text = extract_text(&docx_with_body(body)).unwrap();
        assert_eq!(text, "ContactDDO\tRevd A\nemail: a@b.org\n");
    }

    #[test]
    fn test_entities_decoded() {
        let text = extract_text(&docx_with_paragraphs(&["Tom & Jerry <3"])).unwrap();
        assert_eq!(text, "Tom & Jerry <3\n");
    }

    #[test]
    fn test_table_cells_become_lines() {
        let body = format!(
            "{}<w:tbl><w:tr><w:tc>{}</w:tc><w:tc>{}</w:tc></w:tr>\
             <w:tr><w:tc>{}</w:tc><w:tc>{}</w:tc></w:tr></w:tbl>{}",
            paragraph_xml("Pro-forma"),
            paragraph_xml("Name"),
            paragraph_xml("Jo Smith"),
            paragraph_xml("Diocese"),
            paragraph_xml("Ely"),
            paragraph_xml("End"),
        );
        let text = extract_text(&docx_with_body(&body)).unwrap();
        assert_eq!(text, "Pro-forma\nName\nJo Smith\nDiocese\nEly\nEnd\n");
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            extract_text(b"definitely not a zip"),
            Err(Error::DocumentParse(_))
        ));
    }

    #[test]
    fn test_zip_without_document_part() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("readme.txt", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"hello").unwrap();
            writer.finish().unwrap();
        }
        assert!(matches!(
            extract_text(&buf.into_inner()),
            Err(Error::DocumentParse(_))
        ));
    }
}
