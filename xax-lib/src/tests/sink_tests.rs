use super::*;
use xax_core::StreamType;

fn video_key() -> StreamKey {
    StreamKey::new(StreamType::Video, 0x01, 0x1F)
}

#[test]
fn path_for_uses_hex_layout() {
    let sink = DirectorySink::new("/out");
    assert_eq!(
        sink.path_for(&video_key()),
        Path::new("/out").join("video").join("01").join("1f")
    );
}

#[test]
fn appends_accumulate_in_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());

    sink.append(&video_key(), b"abc").unwrap();
    sink.append(&StreamKey::UNTYPED, b"zz").unwrap();
    sink.append(&video_key(), b"def").unwrap();
    sink.finish().unwrap();

    assert_eq!(sink.open_streams(), 2);
    assert_eq!(fs::read(dir.path().join("video/01/1f")).unwrap(), b"abcdef");
    assert_eq!(fs::read(dir.path().join("untyped/00/00")).unwrap(), b"zz");
}

#[test]
fn truncate_mode_replaces_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("video/01/1f");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"stale data").unwrap();

    let mut sink = DirectorySink::new(dir.path());
    sink.append(&video_key(), b"new").unwrap();
    sink.finish().unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"new");
}

#[test]
fn append_mode_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("video/01/1f");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"old-").unwrap();

    let mut sink = DirectorySink::new(dir.path()).with_mode(WriteMode::Append);
    sink.append(&video_key(), b"new").unwrap();
    sink.finish().unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"old-new");
}

#[test]
fn unwritable_root_is_a_sink_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("video");
    fs::write(&blocker, b"not a directory").unwrap();

    let mut sink = DirectorySink::new(dir.path());
    assert!(matches!(
        sink.append(&video_key(), b"x"),
        Err(SinkError::Io(_))
    ));
}
