use std::collections::HashSet;

use super::builder::{PreambleMode, parse_document};
use super::dedup::dedup_links;
use super::flatten::flatten_folders;
use super::line::{Line, classify_line};
use super::merge::merge_documents;
use super::partition::partition_by_protocol;
use super::pipeline::{Layout, PipelineOptions, run_pipeline};
use super::render::{PREAMBLE, render_document};
use super::tree::{Anchor, Group, Item, collect_anchors};

const CHROME_EXPORT: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<!-- This is an automatically generated file.
     It will be read and overwritten.
     DO NOT EDIT! -->
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
    <DT><H3 ADD_DATE="1600000000" LAST_MODIFIED="1650000000" PERSONAL_TOOLBAR_FOLDER="true">Bar</H3>
    <DL><p>
        <DT><A HREF="https://a.com" ADD_DATE="100" ICON="data:image/png;base64,AAAA">A</A>
        <DT><H3 ADD_DATE="1600000001" LAST_MODIFIED="1600000002">Tools</H3>
        <DL><p>
            <DT><A HREF="http://tools.example/?q=a b" ADD_DATE="101">Tools &amp; more</A>
            <DT><A HREF="ftp://files.example" ADD_DATE="102">Files</A>
        </DL><p>
        <DT><A HREF="https://docs.example" ADD_DATE="103">Docs</A>
    </DL><p>
    <DT><H3 ADD_DATE="1500000000" LAST_MODIFIED="1500000001">Other bookmarks</H3>
    <DL><p>
        <DT><A HREF="https://news.example" ADD_DATE="104">News</A>
    </DL><p>
</DL><p>
"#;

const SECOND_EXPORT: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<!-- This is an automatically generated file.
     It will be read and overwritten.
     DO NOT EDIT! -->
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
    <DT><H3 ADD_DATE="1550000000" LAST_MODIFIED="1700000000">Bar</H3>
    <DL><p>
        <DT><A HREF="https://a.com" ADD_DATE="200">A again</A>
        <DT><A HREF="http://plain.example" ADD_DATE="201">Plain</A>
    </DL><p>
    <DT><H3 ADD_DATE="1700000005" LAST_MODIFIED="1700000006">Mobile bookmarks</H3>
    <DL><p>
        <DT><A HREF="https://news.example" ADD_DATE="202">News dup</A>
    </DL><p>
</DL><p>
"#;

fn parse(document: &str) -> Group {
    parse_document(document, PreambleMode::Fixed).expect("export has a root folder")
}

fn anchors_of(group: &Group) -> Vec<Anchor> {
    let mut anchors = Vec::new();
    collect_anchors(group.clone(), &mut anchors);
    anchors
}

fn top_level(root: &Group) -> Vec<&Group> {
    root.items
        .iter()
        .filter_map(|item| match item {
            Item::Group(group) => Some(group),
            Item::Anchor(_) => None,
        })
        .collect()
}

#[test]
fn preamble_constant_is_the_conventional_export_header() {
    assert!(CHROME_EXPORT.starts_with(PREAMBLE));
}

#[test]
fn serialized_tree_parses_back_to_the_same_tree() {
    let original = parse(CHROME_EXPORT);
    let rendered = render_document(&original);
    let reparsed = parse(&rendered);

    assert_eq!(reparsed, original);
}

#[test]
fn merged_and_partitioned_trees_also_round_trip() {
    let merged = merge_documents([parse(CHROME_EXPORT), parse(SECOND_EXPORT)]);
    let partitioned = partition_by_protocol(flatten_folders(dedup_links(merged)), "1700000000");

    let reparsed = parse(&render_document(&partitioned));
    assert_eq!(reparsed, partitioned);
}

#[test]
fn dedup_leaves_no_shared_href_and_is_idempotent() {
    let merged = merge_documents([parse(CHROME_EXPORT), parse(SECOND_EXPORT)]);
    let once = dedup_links(merged);
    let twice = dedup_links(once.clone());
    assert_eq!(once, twice);

    let anchors = anchors_of(&once);
    let unique: HashSet<_> = anchors.iter().filter_map(Anchor::href).collect();
    assert_eq!(unique.len(), anchors.len());
}

#[test]
fn flatten_keeps_every_reachable_link_of_each_folder() {
    let root = parse(CHROME_EXPORT);
    let flat = flatten_folders(root.clone());

    for (before, after) in top_level(&root).into_iter().zip(top_level(&flat)) {
        assert_eq!(anchors_of(before), anchors_of(after));
        assert!(after.items.iter().all(|item| matches!(item, Item::Anchor(_))));
    }
}

#[test]
fn partition_buckets_cover_the_folder_without_overlap() {
    let flat = flatten_folders(parse(CHROME_EXPORT));
    let partitioned = partition_by_protocol(flat.clone(), "1700000000");

    for (before, after) in top_level(&flat).into_iter().zip(top_level(&partitioned)) {
        let mut expected: Vec<_> = anchors_of(before).into_iter().map(|a| a.text).collect();
        let mut actual = Vec::new();
        for bucket in top_level(after) {
            actual.extend(bucket.items.iter().map(|item| match item {
                Item::Anchor(anchor) => anchor.text.clone(),
                Item::Group(_) => panic!("buckets hold only links"),
            }));
        }
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }
}

#[test]
fn example_link_survives_once_in_the_https_bucket() {
    let line = r#"<DT><A HREF="https://a.com" ADD_DATE="100">A</A>"#;
    let Line::Anchor { attributes, text } = classify_line(line) else {
        panic!("expected anchor");
    };
    assert_eq!(text, "A");
    assert_eq!(attributes.get("HREF"), Some("https://a.com"));
    assert_eq!(attributes.get("ADD_DATE"), Some("100"));

    let options = PipelineOptions {
        layout: Layout::Protocol,
        dedup: true,
        timestamp: "1700000000".to_string(),
    };
    let output = run_pipeline(vec![parse(CHROME_EXPORT), parse(SECOND_EXPORT)], &options);

    let bar = top_level(&output.tree)
        .into_iter()
        .find(|group| group.name() == Some("Bar"))
        .expect("Bar folder");
    let hits: Vec<_> = top_level(bar)
        .into_iter()
        .flat_map(|bucket| {
            anchors_of(bucket)
                .into_iter()
                .filter(|anchor| anchor.href() == Some("https://a.com"))
                .map(|_| bucket.name().unwrap_or_default().to_string())
                .collect::<Vec<_>>()
        })
        .collect();
    assert_eq!(hits, vec!["https".to_string()]);
}

#[test]
fn pipeline_reports_counts() {
    let options = PipelineOptions {
        layout: Layout::Nested,
        dedup: true,
        timestamp: "0".to_string(),
    };
    let output = run_pipeline(vec![parse(CHROME_EXPORT), parse(SECOND_EXPORT)], &options);

    assert_eq!(output.counts.documents, 2);
    assert_eq!(output.counts.top_level_folders, 3);
    assert_eq!(output.counts.anchors_before_dedup, 8);
    assert_eq!(output.counts.anchors_after_dedup, 6);
    assert_eq!(output.counts.duplicates_removed, 2);
    assert!(output.markup.starts_with(PREAMBLE));

    let names: Vec<_> = top_level(&output.tree).into_iter().map(Group::name).collect();
    assert_eq!(
        names,
        vec![Some("Bar"), Some("Other bookmarks"), Some("Mobile bookmarks")]
    );
}
