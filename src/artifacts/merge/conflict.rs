use bytes::Bytes;

pub const CURRENT_MARKER: &str = "<<<<<<< HEAD\n";
pub const SEPARATOR_MARKER: &str = "=======\n";
pub const OTHER_MARKER: &str = ">>>>>>> ";

/// Content of a conflicting file: both versions between conflict markers.
///
/// An absent side contributes nothing; a non-empty side that does not end in a
/// newline gets one so the markers stay on their own lines.
pub fn conflict_content(current: Option<&[u8]>, other: Option<&[u8]>, other_branch: &str) -> Bytes {
    let mut content = Vec::new();

    content.extend_from_slice(CURRENT_MARKER.as_bytes());
    push_side(&mut content, current);
    content.extend_from_slice(SEPARATOR_MARKER.as_bytes());
    push_side(&mut content, other);
    content.extend_from_slice(OTHER_MARKER.as_bytes());
    content.extend_from_slice(other_branch.as_bytes());
    content.push(b'\n');

    Bytes::from(content)
}

fn push_side(content: &mut Vec<u8>, side: Option<&[u8]>) {
    let side = side.unwrap_or_default();
    content.extend_from_slice(side);

    if !side.is_empty() && !side.ends_with(b"\n") {
        content.push(b'\n');
    }
}
