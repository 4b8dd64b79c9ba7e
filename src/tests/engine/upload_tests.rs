use std::sync::Arc;

use super::{FailingWrites, STAFF, library, may_first, upload_staff};
use crate::cache::CURRENT_FORMAT_VERSION;
use crate::engine::UploadRequest;
use crate::error::Stage;
use crate::guid;
use crate::io::{FileUpload, MemoryUpload, UploadSource};
use crate::store::{DocumentKind, PublishStatus, RecordId};

#[test]
fn csv_upload_is_parsed_and_cached() {
    let library = library();
    let record = upload_staff(&library);

    assert_eq!(record.id, RecordId(1));
    assert_eq!(record.title, "staff");
    assert_eq!(record.kind, DocumentKind::Csv);
    assert_eq!(record.file_name, "staff.csv");
    assert!(record.has_header_row);
    assert_eq!(record.header.as_slice(), &["First Name", "Last Name", "email"]);
    assert_eq!(record.table.len(), 3);
    assert_eq!(record.storage_format_version, CURRENT_FORMAT_VERSION);
    assert!(guid::is_valid(&record.guid.to_string()));

    let cache = record.rendered_html_cache.as_ref().expect("cached html");
    assert!(cache.as_str().contains("<caption>staff <span class=\"doctable-date\">May 1, 2024</span></caption>"));
    assert!(cache.as_str().contains("<td>jsmith@example.com</td>"));
    assert_eq!(library.store().read_source(record.id).expect("source"), STAFF.as_bytes());
}

#[test]
fn upload_request_metadata_is_kept() {
    let library = library();
    let record = library
        .upload(
            &MemoryUpload::from_string("raw.CSV", "1,2\n3,4\n"),
            UploadRequest::new()
                .with_title("Raw numbers")
                .with_header_row(false)
                .with_status(PublishStatus::Draft)
                .with_category("finance")
                .uploaded_at(may_first()),
        )
        .expect("upload");

    assert_eq!(record.title, "Raw numbers");
    assert_eq!(record.kind, DocumentKind::Csv);
    assert_eq!(record.status, PublishStatus::Draft);
    assert_eq!(record.categories, vec!["finance".to_string()]);
    assert_eq!(record.created_at, may_first());
    assert_eq!(record.header.as_slice(), &["Column 1", "Column 2"]);
    assert_eq!(record.table.len(), 2);
}

#[test]
fn pdf_upload_has_no_table_or_cache() {
    let library = library();
    let record = library
        .upload(
            &MemoryUpload::new("minutes.pdf", b"%PDF-1.7".to_vec()),
            UploadRequest::new(),
        )
        .expect("upload");

    assert_eq!(record.kind, DocumentKind::Pdf);
    assert!(record.header.is_empty());
    assert!(record.table.is_empty());
    assert_eq!(record.rendered_html_cache, None);
}

#[test]
fn empty_csv_with_header_row_is_a_parse_error() {
    let library = library();
    let err = library
        .upload(&MemoryUpload::from_string("empty.csv", ""), UploadRequest::new())
        .unwrap_err();

    assert_eq!(err.stage, Stage::Parse);
    assert_eq!(err.target, "empty.csv");
    assert!(err.user_message().starts_with("Could not process upload 'empty.csv'"));
    assert!(library.list_published().expect("list").is_empty());
}

#[test]
fn missing_file_is_an_open_error() {
    let library = library();
    let source = FileUpload::new("/definitely/not/here/staff.csv");
    assert_eq!(source.file_name(), "staff.csv");

    let err = library.upload(&source, UploadRequest::new()).unwrap_err();
    assert_eq!(err.stage, Stage::Open);
}

#[test]
fn file_upload_reads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("team.csv");
    std::fs::write(&path, "name\nAda\n").expect("write");

    let library = library();
    let record = library
        .upload(&FileUpload::new(&path), UploadRequest::new())
        .expect("upload");
    assert_eq!(record.title, "team");
    assert_eq!(record.table.row(0).expect("row"), &["Ada"]);
}

#[test]
fn reupload_replaces_table_wholesale() {
    let library = library();
    let original = upload_staff(&library);

    let updated = library
        .reupload(
            original.id,
            &MemoryUpload::from_string("staff-v2.csv", "id,role\n1,admin\n"),
            true,
        )
        .expect("reupload");

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.guid, original.guid);
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.file_name, "staff-v2.csv");
    assert_eq!(updated.header.as_slice(), &["id", "role"]);
    assert_eq!(updated.table.len(), 1);

    let cache = updated.rendered_html_cache.expect("fresh cache");
    assert!(cache.as_str().contains("<td>admin</td>"));
    assert!(!cache.as_str().contains("Jane"));
    assert_eq!(
        library.store().read_source(original.id).expect("source"),
        b"id,role\n1,admin\n"
    );
}

#[test]
fn reupload_of_unknown_document_is_a_store_error() {
    let library = library();
    let err = library
        .reupload(RecordId(42), &MemoryUpload::from_string("x.csv", "a\n1\n"), true)
        .unwrap_err();
    assert_eq!(err.stage, Stage::Store);
    assert_eq!(err.target, "42");
}

#[test]
fn bad_reupload_keeps_old_content() {
    let library = library();
    let original = upload_staff(&library);

    let err = library
        .reupload(original.id, &MemoryUpload::from_string("blank.csv", ""), true)
        .unwrap_err();
    assert_eq!(err.stage, Stage::Parse);

    let kept = library.store().find_by_id(original.id).expect("find").expect("present");
    assert_eq!(kept.table, original.table);
}

#[test]
fn failed_source_write_leaves_no_record() {
    let store = Arc::new(FailingWrites::default());
    let library = store.library();
    store.fail_sources(true);

    let err = library
        .upload(&MemoryUpload::from_string("staff.csv", STAFF), UploadRequest::new())
        .unwrap_err();
    assert_eq!(err.stage, Stage::Store);
    assert!(library.list_published().expect("list").is_empty());
    assert!(library.store().find_by_id(RecordId(1)).expect("find").is_none());
}

#[test]
fn failed_source_write_keeps_previous_content() {
    let store = Arc::new(FailingWrites::default());
    let library = store.library();
    let original = upload_staff(&library);
    store.fail_sources(true);

    let err = library
        .reupload(original.id, &MemoryUpload::from_string("v2.csv", "id\n1\n"), true)
        .unwrap_err();
    assert_eq!(err.stage, Stage::Store);

    let kept = library.store().find_by_id(original.id).expect("find").expect("present");
    assert_eq!(kept, original);
    assert_eq!(library.store().read_source(original.id).expect("source"), STAFF.as_bytes());
}

#[test]
fn failed_content_replace_restores_previous_source() {
    let store = Arc::new(FailingWrites::default());
    let library = store.library();
    let original = upload_staff(&library);
    store.fail_replace(true);

    let err = library
        .reupload(original.id, &MemoryUpload::from_string("v2.csv", "id\n1\n"), true)
        .unwrap_err();
    assert_eq!(err.stage, Stage::Store);

    let kept = library.store().find_by_id(original.id).expect("find").expect("present");
    assert_eq!(kept, original);
    assert!(kept.rendered_html_cache.is_some());
    assert_eq!(library.store().read_source(original.id).expect("source"), STAFF.as_bytes());
}

#[test]
fn reupload_stores_cache_in_the_same_write() {
    let library = library();
    let original = upload_staff(&library);

    let updated = library
        .reupload(original.id, &MemoryUpload::from_string("v2.csv", "id\n1\n"), true)
        .expect("reupload");
    assert_eq!(updated.content_revision, original.content_revision + 1);
    assert_eq!(updated.storage_format_version, CURRENT_FORMAT_VERSION);
    assert!(updated.rendered_html_cache.expect("cache").as_str().contains("<td>1</td>"));
}
