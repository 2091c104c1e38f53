use netbattle::{
    outcome_code, outcome_from_code, FleetConfig, FrameError, GameConfig, Handshake, ShotOutcome,
    ShotReply, ShotRequest, PROTOCOL_VERSION, REPLY_FILLER,
};

#[test]
fn test_outcome_codes_are_fixed() {
    assert_eq!(outcome_code(ShotOutcome::Hit), 2);
    assert_eq!(outcome_code(ShotOutcome::Miss), 3);
    assert_eq!(outcome_code(ShotOutcome::Sunk), 4);
    assert_eq!(outcome_code(ShotOutcome::Forbidden), 5);
    for code in [0u8, 1, 6, 0xFF] {
        assert_eq!(outcome_from_code(code), None);
    }
}

#[test]
fn test_request_layout() {
    let req = ShotRequest::new(3, 9).unwrap();
    assert_eq!(req.encode(), [3, 9]);
    assert_eq!(ShotRequest::decode([255, 0]).coord(), (255, 0));
    assert!(ShotRequest::new(256, 0).is_none());
}

#[test]
fn test_reply_layout() {
    assert_eq!(ShotReply::new(ShotOutcome::Sunk).encode(), [4, REPLY_FILLER]);
    assert_eq!(
        ShotReply::decode([3, 0xFF]),
        Ok(ShotReply::new(ShotOutcome::Miss))
    );
}

#[test]
fn test_malformed_replies() {
    assert_eq!(
        ShotReply::decode([9, 0xFF]),
        Err(FrameError::UnknownOutcome(9))
    );
    assert_eq!(ShotReply::decode([2, 0x00]), Err(FrameError::BadFiller(0)));
    // A request mistaken for a reply.
    assert!(ShotReply::decode(ShotRequest::new(2, 3).unwrap().encode()).is_err());
}

#[test]
fn test_handshake_describes_config() {
    let config = GameConfig {
        rows: 8,
        cols: 12,
        fleet: FleetConfig {
            patrol_boats: 2,
            cruisers: 0,
            submarines: 1,
            carriers: 0,
        },
    };
    let hs = Handshake::from_config(&config);
    assert_eq!(hs.version, PROTOCOL_VERSION);
    assert_eq!((hs.rows, hs.cols), (8, 12));
    assert_eq!(hs.ships, vec![2, 2, 4]);

    let default = Handshake::from_config(&GameConfig::default());
    assert!(!hs.same_game(&default));
    let mut other_version = default.clone();
    other_version.version = PROTOCOL_VERSION + 1;
    assert!(default.same_game(&other_version));
}

#[test]
fn test_handshake_bincode_roundtrip() {
    let hs = Handshake::from_config(&GameConfig::default());
    let bytes = bincode::serialize(&hs).unwrap();
    let back: Handshake = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back, hs);
}
