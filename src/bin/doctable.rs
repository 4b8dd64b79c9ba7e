use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use doctable::cli::{ColorList, DisplayArgs, RowSelection};
use doctable::{
    DisplayContext, DisplayRequest, FileUpload, LibraryBuilder, LibraryConfig, RecordId,
    StoreConfig, UploadRequest, guid,
};
use sarge::prelude::*;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  doctable [--config <file>] [--store <dir>] <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  --upload <file> [--title <t>] [--no-header]   Store a document");
    eprintln!("  --render <id> [--rows 1-3,7] [--row-colors '#fff,#eee']");
    eprintln!("          [--no-row-numbers] [--no-date] [--page-length n] [--debug]");
    eprintln!("  --download <guid> [--out <path>]              Fetch a document by GUID");
    eprintln!("  --list                                        List published documents");
    eprintln!("  --guid                                        Print a fresh GUID");
}

macro_rules! flag {
    ($r:expr, $args:expr) => {
        matches!($r.get($args), Some(Ok(true)))
    };
}

macro_rules! string {
    ($r:expr, $args:expr) => {
        $r.get($args).and_then(Result::ok)
    };
}

fn write_output(out: Option<&str>, bytes: &[u8]) -> Result<(), Box<dyn Error>> {
    match out {
        Some(path) => std::fs::write(path, bytes)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut reader = ArgumentReader::new();

    let config_ref = reader.add::<String>(tag::long("config"));
    let store_ref = reader.add::<String>(tag::long("store"));
    let upload_ref = reader.add::<String>(tag::long("upload"));
    let title_ref = reader.add::<String>(tag::long("title"));
    let no_header_ref = reader.add::<bool>(tag::long("no-header"));
    let render_ref = reader.add::<String>(tag::long("render"));
    let rows_ref = reader.add::<RowSelection>(tag::long("rows"));
    let colors_ref = reader.add::<ColorList>(tag::long("row-colors"));
    let no_numbers_ref = reader.add::<bool>(tag::long("no-row-numbers"));
    let no_date_ref = reader.add::<bool>(tag::long("no-date"));
    let page_length_ref = reader.add::<String>(tag::long("page-length"));
    let debug_ref = reader.add::<bool>(tag::long("debug"));
    let download_ref = reader.add::<String>(tag::long("download"));
    let out_ref = reader.add::<String>(tag::both('o', "out"));
    let list_ref = reader.add::<bool>(tag::long("list"));
    let guid_ref = reader.add::<bool>(tag::long("guid"));

    let args = reader.parse()?;

    if flag!(guid_ref, &args) {
        println!("{}", guid::generate());
        return Ok(());
    }

    let mut config = match string!(config_ref, &args) {
        Some(path) => LibraryConfig::load(path)?,
        None => LibraryConfig::default().with_store(StoreConfig::JsonDir {
            path: PathBuf::from("doctable-data"),
        }),
    };
    if let Some(dir) = string!(store_ref, &args) {
        config = config.with_store(StoreConfig::JsonDir {
            path: PathBuf::from(dir),
        });
    }
    let debug = flag!(debug_ref, &args);
    let library = LibraryBuilder::from_config(config).build()?;
    let out = string!(out_ref, &args);

    if let Some(path) = string!(upload_ref, &args) {
        let mut request = UploadRequest::new().with_header_row(!flag!(no_header_ref, &args));
        if let Some(title) = string!(title_ref, &args) {
            request = request.with_title(title);
        }
        let record = library
            .upload(&FileUpload::new(path), request)
            .map_err(|e| e.user_message())?;
        println!(
            "{}\t{}\t{}",
            record.id,
            record.guid,
            library.download_url(&record)
        );
        return Ok(());
    }

    if let Some(id) = string!(render_ref, &args) {
        let id: u64 = id.trim().parse().map_err(|_| format!("invalid id: {id}"))?;
        let page_length = string!(page_length_ref, &args)
            .map(|n| n.trim().parse::<u32>())
            .transpose()
            .map_err(|e| format!("invalid --page-length: {e}"))?;
        let display = DisplayArgs::new()
            .with_rows(rows_ref.get(&args).and_then(Result::ok))
            .with_row_colors(colors_ref.get(&args).and_then(Result::ok))
            .with_hidden_row_numbers(flag!(no_numbers_ref, &args))
            .with_hidden_date(flag!(no_date_ref, &args))
            .with_page_length(page_length);

        let mut ctx = DisplayContext::new(debug);
        let request = DisplayRequest {
            id: Some(RecordId(id)),
            options: display.render_options(),
        };
        let html = library.display_request(&request, &mut ctx);
        for notice in ctx.take_notices() {
            eprintln!("{}: {}", notice.level, notice.message);
        }
        return write_output(out.as_deref(), html.as_str().as_bytes());
    }

    if let Some(guid) = string!(download_ref, &args) {
        let download = library
            .download(&guid)?
            .ok_or_else(|| format!("no document for GUID {guid}"))?;
        let target = out.unwrap_or_else(|| download.file_name.clone());
        std::fs::write(&target, &download.bytes)?;
        eprintln!(
            "wrote {} ({}, {} bytes, download #{})",
            target,
            download.content_type,
            download.bytes.len(),
            download.download_count
        );
        return Ok(());
    }

    if flag!(list_ref, &args) {
        for record in library.list_published()? {
            println!(
                "{}\t{}\t{:?}\t{}\t{}",
                record.id, record.guid, record.kind, record.download_count, record.title
            );
        }
        return Ok(());
    }

    Err("no command given".into())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("doctable error: {e}");
        print_usage();
        std::process::exit(1);
    }
}
