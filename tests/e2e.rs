//! End-to-end tests over real (tiny) PDF files.
//!
//! Fixture PDFs are built in-memory with `lopdf`: one page, Courier text,
//! uncompressed content stream. Text assertions stay loose (substring
//! checks) because extraction is free to vary whitespace.

use parteivergleich::analysis::token::tokenize;
use parteivergleich::{
    convert_dir, convert_dir_with, convert_file, load_corpus, BatchConfig, TfIdfModel,
};
use std::collections::BTreeMap;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Write a single-page PDF whose text content is `lines`, one per line.
fn write_pdf(path: &Path, lines: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
    ];
    for line in lines {
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("Td", vec![0.into(), (-16).into()]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content stream"),
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).expect("save fixture PDF");
}

#[test]
fn single_file_conversion_writes_cleaned_text() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("SPD.pdf");
    let out = dir.path().join("SPD/Parteiprogramm/SPD.txt");
    write_pdf(&pdf, &["Wir stehen fuer soziale Gerechtigkeit", "und gute Arbeit."]);

    let stats = convert_file(&pdf, &out).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("Gerechtigkeit"), "got: {text:?}");
    assert!(text.contains("Arbeit"), "got: {text:?}");
    assert!(stats.raw_paragraphs >= 1);
    assert!(stats.kept_paragraphs >= 1);
    assert_eq!(stats.bytes_written, text.len());
}

#[test]
fn batch_continues_past_a_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("raw_programme");
    let data = dir.path().to_path_buf();
    std::fs::create_dir_all(&raw).unwrap();

    write_pdf(&raw.join("CDU.pdf"), &["Freiheit und Verantwortung."]);
    std::fs::write(raw.join("KAPUTT.pdf"), b"definitely not a pdf").unwrap();
    write_pdf(&raw.join("SPD.pdf"), &["Soziale Gerechtigkeit."]);
    // Sidecar must not count as an input at all.
    std::fs::write(raw.join("CDU.pdf.dvc"), b"outs: []").unwrap();

    let config = BatchConfig::builder()
        .raw_dir(&raw)
        .data_dir(&data)
        .build()
        .unwrap();
    let report = convert_dir(&config).unwrap();

    assert_eq!(report.files.len(), 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);

    assert!(data.join("CDU/Parteiprogramm/CDU.txt").is_file());
    assert!(data.join("SPD/Parteiprogramm/SPD.txt").is_file());
    assert!(!data.join("KAPUTT/Parteiprogramm/KAPUTT.txt").exists());

    let failed: Vec<_> = report.failures().collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].input.ends_with("KAPUTT.pdf"));
    assert!(failed[0].error.is_some());
}

#[test]
fn callback_sees_files_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("raw_programme");
    std::fs::create_dir_all(&raw).unwrap();
    write_pdf(&raw.join("SPD.pdf"), &["Zweite."]);
    write_pdf(&raw.join("CDU.pdf"), &["Erste."]);

    let config = BatchConfig::builder()
        .raw_dir(&raw)
        .data_dir(dir.path())
        .build()
        .unwrap();

    let mut seen = Vec::new();
    convert_dir_with(&config, |report| {
        seen.push(report.input.file_name().unwrap().to_string_lossy().into_owned());
        assert!(report.succeeded());
    })
    .unwrap();

    assert_eq!(seen, vec!["CDU.pdf", "SPD.pdf"]);
}

#[test]
fn converted_tree_loads_as_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("raw_programme");
    std::fs::create_dir_all(&raw).unwrap();
    write_pdf(&raw.join("CDU.pdf"), &["Wirtschaft und Stabilitaet."]);
    write_pdf(&raw.join("SPD.pdf"), &["Gerechtigkeit und Arbeit."]);

    let config = BatchConfig::builder()
        .raw_dir(&raw)
        .data_dir(dir.path())
        .build()
        .unwrap();
    convert_dir(&config).unwrap();

    // raw_programme sits inside data_dir and must be skipped by the loader.
    let corpus = load_corpus(dir.path()).unwrap();
    assert_eq!(corpus.keys().collect::<Vec<_>>(), vec!["CDU", "SPD"]);
    assert!(corpus["CDU"].contains("Wirtschaft"));
    assert!(corpus["SPD"].contains("Gerechtigkeit"));
}

#[test]
fn full_analysis_flow_from_pdf_to_similarity_matrix() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("raw_programme");
    std::fs::create_dir_all(&raw).unwrap();
    write_pdf(
        &raw.join("A.pdf"),
        &["Klimaschutz Klimaschutz Energie Zukunft."],
    );
    write_pdf(
        &raw.join("B.pdf"),
        &["Klimaschutz Energie Wandel Zukunft."],
    );
    write_pdf(&raw.join("C.pdf"), &["Steuern Wirtschaft Markt."]);

    let config = BatchConfig::builder()
        .raw_dir(&raw)
        .data_dir(dir.path())
        .build()
        .unwrap();
    let report = convert_dir(&config).unwrap();
    assert_eq!(report.failed, 0);

    let corpus = load_corpus(dir.path()).unwrap();
    let tokens: BTreeMap<String, Vec<String>> = corpus
        .iter()
        .map(|(party, text)| (party.clone(), tokenize(text)))
        .collect();
    let model = TfIdfModel::fit(&tokens);

    let m = model.similarity_matrix();
    assert_eq!(m.labels, vec!["A", "B", "C"]);
    for i in 0..3 {
        assert!((m.values[i][i] - 1.0).abs() < 1e-9);
        for j in 0..3 {
            assert!((m.values[i][j] - m.values[j][i]).abs() < 1e-9);
            assert!(m.values[i][j].is_finite());
        }
    }
    // A and B share climate vocabulary; C talks about something else.
    assert!(m.values[0][1] >= m.values[0][2]);

    let table = m.to_table();
    assert!(table.contains('A') && table.contains('C'));
}
