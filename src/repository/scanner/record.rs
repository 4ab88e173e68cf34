//! Object record parsing
//!
//! Parses `<type> <object-id> <disk-size> [<path>]` lines emitted by the
//! traversal command. Malformed lines are skipped, never fatal.

use super::types::{ObjectKind, ObjectRecord};

/// Parse a single output line.
///
/// Returns `None` for lines with fewer than three whitespace-separated
/// fields. The size is read as a signed integer; an unparseable size is
/// read as zero and a negative one is clamped to zero, since every counter
/// is unsigned. The path is the rest of the line with runs of whitespace
/// collapsed to single spaces.
pub fn parse_record(line: &str) -> Option<ObjectRecord<'_>> {
    let mut fields = line.split_whitespace();
    let kind = fields.next()?;
    let id = fields.next()?;
    let size = fields.next()?;

    let rest: Vec<&str> = fields.collect();
    let path = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" ").trim().to_string()).filter(|p| !p.is_empty())
    };

    Some(ObjectRecord {
        kind: ObjectKind::parse(kind),
        id,
        disk_size: parse_size(size),
        path,
    })
}

fn parse_size(field: &str) -> u64 {
    field
        .parse::<i64>()
        .map(|size| u64::try_from(size).unwrap_or(0))
        .unwrap_or(0)
}

/// Parse every well-formed record of a complete output buffer
pub fn parse_records(output: &str) -> impl Iterator<Item = ObjectRecord<'_>> {
    output.lines().filter_map(parse_record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commit_without_path() {
        let rec = parse_record("commit 4b825dc642cb6eb9a060e54bf8d69288fbee4904 187").unwrap();
        assert_eq!(rec.kind, ObjectKind::Commit);
        assert_eq!(rec.id, "4b825dc642cb6eb9a060e54bf8d69288fbee4904");
        assert_eq!(rec.disk_size, 187);
        assert_eq!(rec.path, None);
    }

    #[test]
    fn test_parse_blob_with_spaces_in_path() {
        let rec = parse_record("blob abc123 42 docs/My   Design Notes.md  ").unwrap();
        assert_eq!(rec.kind, ObjectKind::Blob);
        assert_eq!(rec.path.as_deref(), Some("docs/My Design Notes.md"));
    }

    #[test]
    fn test_short_lines_are_skipped() {
        assert!(parse_record("").is_none());
        assert!(parse_record("   ").is_none());
        assert!(parse_record("blob abc123").is_none());
    }

    #[test]
    fn test_bad_size_defaults_to_zero() {
        let rec = parse_record("tree deadbeef notanumber src").unwrap();
        assert_eq!(rec.disk_size, 0);
        assert_eq!(rec.path.as_deref(), Some("src"));
    }

    #[test]
    fn test_negative_size_clamps_to_zero() {
        let rec = parse_record("blob deadbeef -5 x").unwrap();
        assert_eq!(rec.disk_size, 0);
        assert_eq!(rec.path.as_deref(), Some("x"));

        assert_eq!(parse_record("blob deadbeef +7 x").unwrap().disk_size, 7);
        assert_eq!(parse_record("blob deadbeef 9223372036854775807 x").unwrap().disk_size, i64::MAX as u64);
    }

    #[test]
    fn test_parse_records_skips_garbage() {
        let output = "commit c1 10\n\ngarbage\ntree t1 20\nblob b1 30 a.txt\n";
        let kinds: Vec<_> = parse_records(output).map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ObjectKind::Commit, ObjectKind::Tree, ObjectKind::Blob]);
    }
}
