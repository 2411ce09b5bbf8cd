//! Integration tests for the sello CLI: create and inspect round trips
//! through the actual binary.

use lopdf::dictionary;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

/// Locates the compiled `sello` binary next to the test executable.
fn cli_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("sello");
    #[cfg(windows)]
    path.set_extension("exe");
    path
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(cli_path())
        .args(args)
        .output()
        .expect("failed to run sello binary")
}

fn assert_valid_pdf(path: &Path) {
    let content = std::fs::read(path).expect("read PDF");
    assert!(content.starts_with(b"%PDF-"), "missing PDF header");
    assert!(content.len() > 100);
}

#[test]
fn test_create_writes_pdf_and_sidecar() {
    let dir = tempdir().unwrap();
    let pdf = dir.path().join("informe.pdf");

    let output = run(&[
        "create",
        "--output",
        pdf.to_str().unwrap(),
        "--title",
        "Informe",
        "--author",
        "Ana",
        "--keywords",
        "a, b",
        "--content",
        "Hola",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_valid_pdf(&pdf);
    let sidecar = std::fs::read_to_string(dir.path().join("informe_metadata.txt")).unwrap();
    assert!(sidecar.contains("Título: Informe"));
    assert!(sidecar.contains("Palabras clave: a, b"));
}

#[test]
fn test_create_then_inspect_reports_raw_keywords() {
    let dir = tempdir().unwrap();
    let pdf = dir.path().join("out.pdf");

    let create = run(&[
        "create",
        "--output",
        pdf.to_str().unwrap(),
        "--title",
        "Informe",
        "--keywords",
        "a, b",
        "--no-qr",
    ]);
    assert!(create.status.success());

    let inspect = run(&["inspect", pdf.to_str().unwrap()]);
    assert!(inspect.status.success());
    let stdout = String::from_utf8_lossy(&inspect.stdout);
    assert!(stdout.contains("Title: Informe"));
    assert!(stdout.contains("Keywords: a, b"));
}

#[test]
fn test_inspect_without_info_is_informational() {
    let dir = tempdir().unwrap();
    let pdf = dir.path().join("bare.pdf");

    // Minimal PDF with no Info dictionary.
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    doc.objects.insert(
        pages_id,
        lopdf::Object::Dictionary(lopdf::dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<lopdf::Object>::new(),
            "Count" => 0,
        }),
    );
    let catalog_id = doc.add_object(lopdf::dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(&pdf).unwrap();

    let inspect = run(&["inspect", pdf.to_str().unwrap()]);
    assert!(inspect.status.success(), "missing metadata must not fail");
    let stdout = String::from_utf8_lossy(&inspect.stdout);
    assert!(stdout.contains("No metadata found"));
}

#[test]
fn test_inspect_missing_file_fails_with_context() {
    let inspect = run(&["inspect", "/definitely/not/here.pdf"]);
    assert!(!inspect.status.success());
    let stderr = String::from_utf8_lossy(&inspect.stderr);
    assert!(stderr.contains("failed to read"));
}
