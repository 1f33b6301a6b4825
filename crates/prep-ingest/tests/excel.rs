use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use polars::prelude::DataType;
use prep_ingest::{IngestError, load_excel};
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="People" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

// Style 1 uses the built-in date format 14.
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<cellXfs count="2"><xf numFmtId="0"/><xf numFmtId="14" applyNumberFormat="1"/></cellXfs>
</styleSheet>"#;

fn text(cell: &str, value: &str) -> String {
    format!(r#"<c r="{cell}" t="inlineStr"><is><t xml:space="preserve">{value}</t></is></c>"#)
}

fn number(cell: &str, value: f64) -> String {
    format!(r#"<c r="{cell}"><v>{value}</v></c>"#)
}

fn date(cell: &str, serial: f64) -> String {
    format!(r#"<c r="{cell}" s="1"><v>{serial}</v></c>"#)
}

fn sheet(rows: &[Vec<String>]) -> String {
    let body: String = rows
        .iter()
        .enumerate()
        .map(|(idx, cells)| format!(r#"<row r="{}">{}</row>"#, idx + 1, cells.concat()))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{body}</sheetData></worksheet>"#
    )
}

fn write_workbook(dir: &Path, rows: &[Vec<String>]) -> PathBuf {
    let path = dir.join("people.xlsx");
    let file = File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let worksheet = sheet(rows);
    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/styles.xml", STYLES),
        ("xl/worksheets/sheet1.xml", worksheet.as_str()),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}

fn strings(df: &polars::prelude::DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect()
}

#[test]
fn loads_first_sheet_with_types_and_missing_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(
        dir.path(),
        &[
            vec![text("A1", "  ")],
            vec![
                text("A2", "name"),
                text("B2", "age"),
                text("C2", "joined"),
                text("D2", "name"),
                text("E2", ""),
            ],
            vec![
                text("A3", "Ada"),
                number("B3", 36.0),
                date("C3", 45292.0),
                text("D3", "x"),
                number("E3", 1.0),
            ],
            vec![
                text("A4", "Alan"),
                date("C4", 45292.5),
                text("D4", "y"),
                number("E4", 2.5),
            ],
            vec![
                text("A5", "Grace"),
                number("B5", 85.0),
                text("D5", "z"),
                number("E5", 3.0),
            ],
        ],
    );

    let df = load_excel(&path).expect("load workbook");

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(names, vec!["name", "age", "joined", "name.1", "Unnamed: 4"]);
    assert_eq!(df.height(), 3);

    assert_eq!(df.column("name").unwrap().dtype(), &DataType::String);
    assert_eq!(df.column("age").unwrap().dtype(), &DataType::Float64);
    assert_eq!(df.column("age").unwrap().null_count(), 1);
    assert_eq!(df.column("Unnamed: 4").unwrap().dtype(), &DataType::Float64);

    assert_eq!(
        strings(&df, "joined"),
        vec![
            Some("2024-01-01".to_string()),
            Some("2024-01-01 12:00:00".to_string()),
            None,
        ]
    );
    assert_eq!(
        strings(&df, "name.1"),
        vec![Some("x".into()), Some("y".into()), Some("z".into())]
    );
}

#[test]
fn blank_sheet_is_empty_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(dir.path(), &[vec![text("A1", " ")], vec![text("A2", "")]]);

    let err = load_excel(&path).unwrap_err();

    assert!(matches!(err, IngestError::EmptyWorkbook { .. }));
}
