//! Override table behavior across the public API.

use moabit::{BUILTIN_OVERRIDES, MimeTable, OCTET_STREAM_MIME_TYPE, detect_mime_type};
use std::io::Write;

#[test]
fn every_builtin_entry_corrects_to_its_override() {
    let table = MimeTable::builtin();

    for (mime, extension) in BUILTIN_OVERRIDES {
        let file_name = format!("upload{extension}");
        let corrected = table.correct(&file_name, OCTET_STREAM_MIME_TYPE);
        assert_eq!(
            corrected.as_deref(),
            Some(*mime),
            "extension {extension} should correct to {mime}"
        );
    }
}

#[test]
fn unlisted_extensions_are_left_unchanged() {
    let table = MimeTable::builtin();

    for (file_name, detected) in [
        ("report.pdf", "application/pdf"),
        ("image.png", "image/png"),
        ("page.html", "text/html"),
        ("data.parquet", OCTET_STREAM_MIME_TYPE),
        ("no_extension", OCTET_STREAM_MIME_TYPE),
    ] {
        assert_eq!(
            table.correct(file_name, detected),
            None,
            "{file_name} should keep its detected type"
        );
    }
}

#[test]
fn supplemental_entries_extend_but_never_shadow() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "application/x-krita: .kra").unwrap();
    writeln!(file, "audio/flac: .stolen").unwrap();
    file.flush().unwrap();

    let table = MimeTable::load(Some(file.path()));

    assert_eq!(
        table.correct("painting.kra", OCTET_STREAM_MIME_TYPE).as_deref(),
        Some("application/x-krita")
    );
    // the built-in flac entry still owns its extension
    assert_eq!(table.extension_for("audio/flac"), Some(".flac"));
    assert_eq!(table.correct("track.stolen", OCTET_STREAM_MIME_TYPE), None);
}

#[test]
fn claimed_types_cover_the_whole_table() {
    let table = MimeTable::builtin();
    let claimed = table.claimed_types();

    assert_eq!(claimed.len(), BUILTIN_OVERRIDES.len());
    for (mime, extension) in BUILTIN_OVERRIDES {
        assert!(
            claimed.iter().any(|(m, e)| m == mime && e == extension),
            "missing claim for {mime}"
        );
    }
}

#[test]
fn detection_prefers_overrides_then_guess_then_octet_stream() {
    assert_eq!(detect_mime_type("clip.mkv").unwrap(), "video/x-matroska");
    assert_eq!(detect_mime_type("letter.txt").unwrap(), "text/plain");
    assert_eq!(detect_mime_type("mystery.zzzqqq").unwrap(), OCTET_STREAM_MIME_TYPE);
}
