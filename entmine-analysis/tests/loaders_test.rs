//! File loader tests: entity and redirect files, gzip streams, the
//! document table.

use std::io::{BufRead, Read, Write};

use entmine_analysis::closure::KnowledgeBaseBuilder;
use entmine_analysis::index::{DocumentIndex, MemoryIndex};
use entmine_analysis::loaders::{open_input, read_entities, OutputSink};
use entmine_core::constants::DEFAULT_EXCLUDED_CLASSES;
use entmine_core::errors::LoadError;
use entmine_core::events::EventDispatcher;
use tempfile::TempDir;

fn excluded() -> Vec<String> {
    DEFAULT_EXCLUDED_CLASSES.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_entity_rows_by_site_column() {
    let data = "id\tenwiki\tdewiki\tinstance_of\n\
                Q64\tBerlin\tBerlin\tQ515\n\
                Q1\tUniverse\t\t\n\
                Q2\t\tErde\tQ3504248\n\
                Q3\tMercury (disambiguation)\tMerkur\tQ4167410\n";
    let mut rows = Vec::new();
    let summary = read_entities(
        data.as_bytes(),
        std::path::Path::new("e.tsv"),
        "dewiki",
        &excluded(),
        |id, title| {
            rows.push((id.to_string(), title.to_string()));
            true
        },
    )
    .unwrap();

    assert_eq!(
        rows,
        vec![("Q64".to_string(), "Berlin".to_string()), ("Q2".into(), "Erde".into())]
    );
    assert_eq!(summary.records, 2);
    assert_eq!(summary.skipped, 2);
}

#[test]
fn test_entity_file_errors() {
    let path = std::path::Path::new("e.tsv");
    let err = read_entities("".as_bytes(), path, "enwiki", &[], |_, _| true).unwrap_err();
    assert!(matches!(err, LoadError::MissingHeader { .. }));

    let err = read_entities("id\tdewiki\n".as_bytes(), path, "enwiki", &[], |_, _| true)
        .unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn { .. }));

    let err = read_entities("id\tenwiki\nQ1\tA\textra\n".as_bytes(), path, "enwiki", &[], |_, _| {
        true
    })
    .unwrap_err();
    match err {
        LoadError::MalformedLine { line, found, .. } => {
            assert_eq!(line, 2);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_gzip_output_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.tsv.gz");
    let mut sink = OutputSink::create(Some(&path)).unwrap();
    writeln!(sink, "Berlin\t400\tQ64:300:290:147%").unwrap();
    sink.finish().unwrap();

    let mut magic = [0u8; 2];
    std::fs::File::open(&path).unwrap().read_exact(&mut magic).unwrap();
    assert_eq!(magic, [0x1f, 0x8b]);

    let lines: Vec<String> = open_input(&path).unwrap().lines().map(Result::unwrap).collect();
    assert_eq!(lines, vec!["Berlin\t400\tQ64:300:290:147%"]);
}

#[test]
fn test_plain_output_and_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.tsv");
    let mut sink = OutputSink::create(Some(&path)).unwrap();
    sink.write_all(b"a\tb\n").unwrap();
    sink.finish().unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\tb\n");
    let lines: Vec<String> = open_input(&path).unwrap().lines().map(Result::unwrap).collect();
    assert_eq!(lines, vec!["a\tb"]);
}

#[test]
fn test_unwritable_output_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("out.tsv");
    assert!(OutputSink::create(Some(&path)).is_err());
}

#[test]
fn test_builder_loads_files() {
    let dir = TempDir::new().unwrap();
    let redirects = dir.path().join("redirects.tsv");
    let entities = dir.path().join("entities.tsv");
    std::fs::write(&redirects, "Big Apple\tNYC\nNYC\tNew York City\n").unwrap();
    std::fs::write(
        &entities,
        "id\tenwiki\tinstance_of\nQ60\tNew York City\tQ515\nQ9\tNYC (disambiguation)\tQ4167410\n",
    )
    .unwrap();

    let events = EventDispatcher::new();
    let mut builder = KnowledgeBaseBuilder::new();
    let r = builder.load_redirects(&redirects, &events).unwrap();
    let e = builder
        .load_entities(&entities, "enwiki", &excluded(), &events)
        .unwrap();
    assert_eq!(r.records, 2);
    assert_eq!(e.records, 1);
    assert_eq!(e.skipped, 1);

    let kb = builder.build(&events);
    let id = kb.resolve_target("Big Apple").unwrap();
    assert_eq!(kb.entity_name(id), "Q60");
    assert!(kb.resolve_target("NYC (disambiguation)").is_none());
}

#[test]
fn test_missing_load_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let events = EventDispatcher::new();
    let mut builder = KnowledgeBaseBuilder::new();
    let err = builder
        .load_redirects(&dir.path().join("nope.tsv"), &events)
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn test_document_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("docs.tsv");
    std::fs::write(
        &path,
        "Doc 1\tThe Big Apple is New York\tBig Apple\tNew York City\n\
         Doc 2\tNothing here\n",
    )
    .unwrap();
    let index = MemoryIndex::load_tsv(&path).unwrap();
    assert_eq!(index.len(), 2);

    let hits = index.phrase_query(&["big", "apple"], 10).unwrap();
    assert_eq!(hits.total_hits, 1);
    assert_eq!(&*hits.documents[0].links[0].target, "New York City");

    std::fs::write(&path, "Doc\ttext\tdangling anchor\n").unwrap();
    assert!(matches!(
        MemoryIndex::load_tsv(&path),
        Err(LoadError::MalformedLine { .. })
    ));
}
