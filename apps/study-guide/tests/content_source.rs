//! Content source tests.

mod common;

use common::fixtures;
use pretty_assertions::assert_eq;
use std::fs;
use study_guide::content::{
    write_manifest, ContentError, ContentSource, DirectoryContentSource, Manifest,
    ManifestContentSource, SubjectEntry, TopicEntry,
};

fn subjects_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_subjects(&dir.path().join("Subjects"));
    dir
}

#[tokio::test]
async fn test_directory_lists_markdown_topics() {
    let dir = subjects_tree();
    let source = DirectoryContentSource::new(dir.path().join("Subjects"));

    let subjects = source.list_subjects().await.unwrap();
    assert_eq!(
        subjects,
        vec![
            SubjectEntry {
                name: "Art".to_string(),
                topics: vec![TopicEntry {
                    title: "Blank".to_string(),
                    file: "Art/Blank.md".to_string(),
                }],
            },
            SubjectEntry {
                name: "History".to_string(),
                topics: vec![TopicEntry {
                    title: "Mesopotamia".to_string(),
                    file: "History/Mesopotamia.md".to_string(),
                }],
            },
            SubjectEntry {
                name: "Science".to_string(),
                topics: vec![TopicEntry {
                    title: "Cells".to_string(),
                    file: "Science/Cells.markdown".to_string(),
                }],
            },
        ]
    );
}

#[tokio::test]
async fn test_directory_ignores_loose_files() {
    let dir = subjects_tree();
    fs::write(dir.path().join("Subjects/README.md"), "# Not a subject").unwrap();

    let source = DirectoryContentSource::new(dir.path().join("Subjects"));
    let subjects = source.list_subjects().await.unwrap();
    assert_eq!(subjects.len(), 3);
}

#[tokio::test]
async fn test_missing_subjects_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirectoryContentSource::new(dir.path().join("nope"));
    assert!(source.list_subjects().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_topic_markdown() {
    let dir = subjects_tree();
    let source = DirectoryContentSource::new(dir.path().join("Subjects"));

    let markdown = source
        .fetch_topic_markdown("Science/Cells.markdown")
        .await
        .unwrap();
    assert_eq!(markdown, fixtures::CELLS);

    let err = source
        .fetch_topic_markdown("Science/Plants.md")
        .await
        .unwrap_err();
    assert!(matches!(err, ContentError::Io { .. }));
}

#[tokio::test]
async fn test_write_manifest_round_trip() {
    let dir = subjects_tree();
    let manifest_path = dir.path().join("manifest.json");

    let written = write_manifest(&dir.path().join("Subjects"), &manifest_path)
        .await
        .unwrap();
    assert_eq!(written.subjects.len(), 3);
    assert_eq!(
        written.subjects[1].topics[0].file,
        "Subjects/History/Mesopotamia.md"
    );

    let on_disk: Manifest =
        serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(on_disk, written);

    let source = ManifestContentSource::new(&manifest_path, dir.path().join("Subjects"));
    assert_eq!(source.list_subjects().await.unwrap(), written.subjects);
    let markdown = source
        .fetch_topic_markdown(&written.subjects[1].topics[0].file)
        .await
        .unwrap();
    assert_eq!(markdown, fixtures::MESOPOTAMIA);
}

#[tokio::test]
async fn test_manifest_lists_only_what_it_names() {
    let dir = subjects_tree();
    let manifest_path = dir.path().join("manifest.json");
    fs::write(
        &manifest_path,
        r#"{
  "subjects": [
    {
      "name": "Social Studies",
      "topics": [
        { "title": "Ancient Mesopotamia", "file": "Subjects/History/Mesopotamia.md" }
      ]
    }
  ]
}"#,
    )
    .unwrap();

    let source = ManifestContentSource::new(&manifest_path, dir.path().join("Subjects"));
    let subjects = source.list_subjects().await.unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].name, "Social Studies");
    assert_eq!(subjects[0].topics[0].title, "Ancient Mesopotamia");
}

#[tokio::test]
async fn test_manifest_falls_back_to_directory_scan() {
    let dir = subjects_tree();
    let manifest_path = dir.path().join("manifest.json");
    let source = ManifestContentSource::new(&manifest_path, dir.path().join("Subjects"));

    // Missing manifest.
    let subjects = source.list_subjects().await.unwrap();
    assert_eq!(subjects.len(), 3);
    let file = subjects[2].topics[0].file.clone();
    assert_eq!(file, "Subjects/Science/Cells.markdown");
    assert_eq!(
        source.fetch_topic_markdown(&file).await.unwrap(),
        fixtures::CELLS
    );

    // Corrupt manifest.
    fs::write(&manifest_path, "{ subjects: ").unwrap();
    assert!(matches!(
        source.load_manifest().await,
        Err(ContentError::Manifest { .. })
    ));
    assert_eq!(source.list_subjects().await.unwrap().len(), 3);
}
