//! End-to-end decode/encode behavior against the in-memory world.

use std::sync::Arc;

use chestsign_codec::*;
use chestsign_types::{Profile, ProtectionRecord, ProtectionType, SavedRecord, SignLocation};
use serde_json::Value;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn codec_for(world: &Arc<InMemoryWorld>) -> SignCodec {
    SignCodec::new(
        world.clone(),
        world.clone(),
        Arc::new(LocalizedHeaders::default()),
        Arc::new(DefaultProfileFactory::default()),
    )
}

fn chest() -> SignLocation {
    SignLocation::new("world", 120, 64, -48)
}

fn decode_at(codec: &SignCodec, world: &InMemoryWorld, location: &SignLocation) -> Option<ProtectionRecord> {
    let surface = world.surface(location).unwrap().unwrap();
    codec.decode(&surface).unwrap()
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

#[test]
fn text_only_sign_yields_trimmed_names_in_order() {
    let world = Arc::new(InMemoryWorld::new());
    world
        .place_sign(chest(), &["\u{00A7}1[More Users]", "Alice", "", "  Bob  "])
        .unwrap();
    let codec = codec_for(&world);

    let record = decode_at(&codec, &world, &chest()).unwrap();
    assert_eq!(record.protection_type, ProtectionType::MoreUsers);
    assert_eq!(record.display_names(), vec!["Alice", "Bob"]);
    assert!(record.profiles.iter().all(|p| p.player_id().is_none()));
}

#[test]
fn nonsense_header_is_not_a_protection_sign() {
    let world = Arc::new(InMemoryWorld::new());
    world.place_sign(chest(), &["Welcome!", "Alice"]).unwrap();
    let codec = codec_for(&world);

    assert_eq!(decode_at(&codec, &world, &chest()), None);
}

#[test]
fn hidden_records_win_over_visible_text() {
    let world = Arc::new(InMemoryWorld::new());
    world.place_sign(chest(), &["[Private]", "Mallory"]).unwrap();
    let id = Uuid::new_v4();
    world
        .set_hidden(
            &chest(),
            Some(vec![Profile::player("Alice", Some(id)).save_record().clone()]),
        )
        .unwrap();
    let codec = codec_for(&world);

    let record = decode_at(&codec, &world, &chest()).unwrap();
    assert_eq!(record.display_names(), vec!["Alice"]);
    assert_eq!(record.profiles[0].player_id(), Some(id));
}

#[test]
fn malformed_hidden_record_is_skipped_keeping_order() {
    let world = Arc::new(InMemoryWorld::new());
    world.place_sign(chest(), &["[Private]"]).unwrap();

    let mut broken = SavedRecord::new();
    broken.insert("n".into(), Value::from(17));
    world
        .set_hidden(
            &chest(),
            Some(vec![
                Profile::player("Alice", None).save_record().clone(),
                broken,
                Profile::group("staff").save_record().clone(),
            ]),
        )
        .unwrap();
    let codec = codec_for(&world);

    let record = decode_at(&codec, &world, &chest()).unwrap();
    assert_eq!(record.display_names(), vec!["Alice", "[staff]"]);
}

#[test]
fn empty_hidden_list_yields_empty_record() {
    let world = Arc::new(InMemoryWorld::new());
    world.place_sign(chest(), &["[Private]", "Alice"]).unwrap();
    world.set_hidden(&chest(), Some(Vec::new())).unwrap();
    let codec = codec_for(&world);

    let record = decode_at(&codec, &world, &chest()).unwrap();
    assert_eq!(record.protection_type, ProtectionType::Private);
    assert!(record.is_empty());
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

#[test]
fn encode_commits_text_before_hidden_data() {
    let world = Arc::new(InMemoryWorld::new().clearing_hidden_on_commit());
    world.place_sign(chest(), &[]).unwrap();
    let codec = codec_for(&world);

    let record = ProtectionRecord::new(
        chest(),
        ProtectionType::Private,
        vec![Profile::player("Alice", Some(Uuid::new_v4())), Profile::everyone("Everyone")],
    );
    codec.encode(&record).unwrap();

    let journal = world.journal().unwrap();
    let commit = journal
        .iter()
        .position(|c| matches!(c, WorldCall::CommitText(_)))
        .unwrap();
    let write = journal
        .iter()
        .position(|c| matches!(c, WorldCall::WriteHidden { .. }))
        .unwrap();
    assert!(commit < write);

    // The commit wiped hidden data; the later write restored it.
    assert_eq!(world.hidden(&chest()).unwrap().unwrap().len(), 2);
    assert_eq!(decode_at(&codec, &world, &chest()).unwrap(), record);
}

#[test]
fn overflowing_profiles_reach_hidden_channel_only() {
    let world = Arc::new(InMemoryWorld::new());
    world.place_sign(chest(), &[]).unwrap();
    let codec = codec_for(&world);

    let names = ["A", "B", "C", "D", "E"];
    let record = ProtectionRecord::new(
        chest(),
        ProtectionType::MoreUsers,
        names.iter().map(|n| Profile::player(*n, None)).collect(),
    );
    let outcome = codec.encode(&record).unwrap();
    assert_eq!(
        outcome,
        EncodeOutcome::Written {
            visible_profiles: SIGN_LINES - 1,
            hidden_records: names.len(),
        }
    );

    let lines = world.lines(&chest()).unwrap().unwrap();
    assert_eq!(lines, vec!["\u{00A7}1[More Users]", "A", "B", "C"]);
    assert_eq!(world.hidden(&chest()).unwrap().unwrap().len(), names.len());

    let decoded = decode_at(&codec, &world, &chest()).unwrap();
    assert_eq!(decoded.display_names(), names.to_vec());
}

#[test]
fn encode_to_removed_sign_is_silent() {
    let world = Arc::new(InMemoryWorld::new());
    world.place_sign(chest(), &["[Private]", "Alice"]).unwrap();
    world.remove_sign(&chest()).unwrap();
    let codec = codec_for(&world);

    let record = ProtectionRecord::new(chest(), ProtectionType::Private, vec![]);
    assert_eq!(codec.encode(&record).unwrap(), EncodeOutcome::SurfaceMissing);
    assert!(!world
        .journal()
        .unwrap()
        .iter()
        .any(|c| matches!(c, WorldCall::CommitText(_))));
}

#[test]
fn failed_commit_skips_hidden_write() {
    let world = Arc::new(InMemoryWorld::new());
    world.place_sign(chest(), &[]).unwrap();
    world.set_fail_commit(true);
    let codec = codec_for(&world);

    let record = ProtectionRecord::new(
        chest(),
        ProtectionType::Private,
        vec![Profile::player("Alice", None)],
    );
    let err = codec.encode(&record).unwrap_err();
    assert!(matches!(err, CodecError::Surface { .. }));
    assert!(!world
        .journal()
        .unwrap()
        .iter()
        .any(|c| matches!(c, WorldCall::WriteHidden { .. })));
}

#[test]
fn failed_hidden_write_leaves_new_text_behind() {
    let world = Arc::new(InMemoryWorld::new().clearing_hidden_on_commit());
    world.place_sign(chest(), &["[Private]", "Old"]).unwrap();
    world
        .set_hidden(&chest(), Some(vec![Profile::player("Old", None).save_record().clone()]))
        .unwrap();
    world.set_fail_hidden_write(true);
    let codec = codec_for(&world);

    let record = ProtectionRecord::new(
        chest(),
        ProtectionType::Private,
        vec![Profile::player("New", None)],
    );
    let err = codec.encode(&record).unwrap_err();
    assert!(matches!(err, CodecError::HiddenStore(_)));

    assert_eq!(world.lines(&chest()).unwrap().unwrap()[1], "New");
    assert_eq!(world.hidden(&chest()).unwrap(), None);

    // Falls back to the visible text.
    let decoded = decode_at(&codec, &world, &chest()).unwrap();
    assert_eq!(decoded.display_names(), vec!["New"]);
}

#[test]
fn reloaded_headers_apply_to_next_call() {
    let world = Arc::new(InMemoryWorld::new());
    world.place_sign(chest(), &["[Privé]", "Alice"]).unwrap();
    let headers = Arc::new(ReloadableHeaders::new(LocalizedHeaders::default()));
    let codec = SignCodec::new(
        world.clone(),
        world.clone(),
        headers.clone(),
        Arc::new(DefaultProfileFactory::default()),
    );

    assert_eq!(decode_at(&codec, &world, &chest()), None);

    let mut french = LocalizedHeaders::default();
    french.private = HeaderStrings::new("[Privé]", "\u{00A7}1[Privé]");
    headers.replace(french).unwrap();

    let record = decode_at(&codec, &world, &chest()).unwrap();
    assert_eq!(record.protection_type, ProtectionType::Private);
}
