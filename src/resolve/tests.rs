use super::*;
use crate::library::TrackId;
use std::fs;
use tempfile::tempdir;

fn track(id: i64, location: &str) -> Track {
    Track {
        track_id: TrackId(id),
        album: "Album".into(),
        name: format!("Song {id}"),
        album_artist: "Artist".into(),
        track_number: id,
        location: location.into(),
        persistent_id: None,
    }
}

fn set(paths: &[&str]) -> CandidateSet {
    paths.iter().map(PathBuf::from).collect()
}

#[test]
fn empty_location_resolves_to_nothing() {
    assert_eq!(resolve(&track(1, ""), &set(&["/a.mp3"])).unwrap(), None);
    // The candidate set is never consulted, so emptiness does not matter.
    assert_eq!(resolve(&track(1, ""), &CandidateSet::new()).unwrap(), None);
}

#[test]
fn existing_file_is_returned_unchanged() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("c.mp3");
    fs::write(&path, b"not real").unwrap();

    let t = track(1, path.to_str().unwrap());
    let candidates = set(&["/x/y/z.mp3"]);
    assert_eq!(resolve(&t, &candidates).unwrap(), Some(path.clone()));
    assert_eq!(resolve(&t, &CandidateSet::new()).unwrap(), Some(path));
}

#[test]
fn identical_string_is_still_scored_when_file_is_absent() {
    let dir = tempdir().unwrap();
    let gone = dir.path().join("a").join("b").join("c.mp3");
    let gone = gone.to_str().unwrap();

    let t = track(1, gone);
    let candidates: CandidateSet = [PathBuf::from(gone), PathBuf::from("/x/y/z.mp3")]
        .into_iter()
        .collect();

    // Not a shortcut on string equality: distance 0 simply wins the search.
    assert_eq!(resolve(&t, &candidates).unwrap(), Some(PathBuf::from(gone)));
    assert!(matches!(
        resolve(&t, &CandidateSet::new()),
        Err(Error::NoCandidates)
    ));
}

#[test]
fn picks_the_closest_candidate() {
    let t = track(1, "/Music/Artist/Song.mp3");
    let candidates = set(&["/Music/Artist/Song (1).mp3", "/Music/Other/Unrelated.mp3"]);

    assert_eq!(
        resolve(&t, &candidates).unwrap(),
        Some(PathBuf::from("/Music/Artist/Song (1).mp3"))
    );
}

#[test]
fn handles_renamed_directories() {
    let t = track(1, "/Music/iTunes/Massive Attack/Blue Lines/01 Safe From Harm.mp3");
    let candidates = set(&[
        "/Music/iTunes Media/Music/Massive Attack/Blue Lines/01 Safe From Harm.mp3",
        "/Music/iTunes Media/Music/Massive Attack/Mezzanine/01 Angel.mp3",
        "/Music/iTunes Media/Music/Portishead/Dummy/01 Mysterons.mp3",
    ]);

    assert_eq!(
        resolve(&t, &candidates).unwrap(),
        Some(PathBuf::from(
            "/Music/iTunes Media/Music/Massive Attack/Blue Lines/01 Safe From Harm.mp3"
        ))
    );
}

#[test]
fn ties_go_to_the_lexicographically_smallest_path() {
    let t = track(1, "/m/song.mp3");
    // Both are one substitution away.
    let candidates = set(&["/m/song.mp4", "/m/song.mp1"]);

    for _ in 0..3 {
        assert_eq!(
            resolve(&t, &candidates).unwrap(),
            Some(PathBuf::from("/m/song.mp1"))
        );
    }
}

#[test]
fn tie_break_uses_string_order_not_path_component_order() {
    let t = track(1, "/a/bX");
    // `Path` ordering compares components, putting "/a/b/c" first; string
    // order puts "/a/b-c" first ('-' < '/'). Both are two edits away.
    let candidates = set(&["/a/b/c", "/a/b-c"]);

    assert_eq!(
        resolve(&t, &candidates).unwrap(),
        Some(PathBuf::from("/a/b-c"))
    );
}

#[test]
fn empty_candidate_set_is_an_error_for_stale_locations() {
    let t = track(1, "/definitely/not/here.mp3");
    assert!(matches!(
        resolve(&t, &CandidateSet::new()),
        Err(Error::NoCandidates)
    ));
}

#[test]
fn resolve_all_splits_resolved_and_unresolved_in_input_order() {
    let missing = vec![
        track(3, "/Music/B/two.mp3"),
        track(1, ""),
        track(2, "/Music/A/one.mp3"),
    ];
    let candidates = set(&["/Music/A/one (1).mp3", "/Music/B/two (1).mp3"]);

    let out = resolve_all(&missing, &candidates);
    let resolved: Vec<(i64, PathBuf)> = out
        .resolved
        .iter()
        .map(|(t, p)| (t.track_id.0, p.clone()))
        .collect();
    assert_eq!(
        resolved,
        vec![
            (3, PathBuf::from("/Music/B/two (1).mp3")),
            (2, PathBuf::from("/Music/A/one (1).mp3")),
        ]
    );
    assert_eq!(out.unresolved.len(), 1);
    assert_eq!(out.unresolved[0].track_id, TrackId(1));
}

#[test]
fn resolve_all_with_no_candidates_leaves_everything_unresolved() {
    let missing = vec![track(1, "/x.mp3"), track(2, "")];
    let out = resolve_all(&missing, &CandidateSet::new());
    assert!(out.resolved.is_empty());
    assert_eq!(out.unresolved, missing);
}
