use super::*;
use crate::types::IndexConfig;

mod common {
    use super::*;

    pub(super) fn token(s: &str) -> Token {
        Token::try_from(s).unwrap()
    }

    pub(super) fn ids(index: &TokenIndex, key: &str) -> Vec<ItemId> {
        index.ids(&token(key)).collect()
    }

    pub(super) fn names() -> Vec<&'static str> {
        vec!["Smith, John", "Smythe, Jane", "Doe, Jane"]
    }
}

mod exhaustive {
    use super::common::*;
    use super::*;

    #[test]
    fn test_word_index_maps_tokens_to_items() {
        let index = build_exhaustive(&names());

        assert_eq!(ids(index.words(), "smith"), [0]);
        assert_eq!(ids(index.words(), "jane"), [1, 2]);
        assert_eq!(ids(index.words(), "doe"), [2]);
        assert_eq!(index.words().len(), 5);
    }

    #[test]
    fn test_every_prefix_is_indexed() {
        let index = build_exhaustive(&names());

        assert_eq!(ids(index.prefixes(), "s"), [0, 1]);
        assert_eq!(ids(index.prefixes(), "sm"), [0, 1]);
        assert_eq!(ids(index.prefixes(), "smi"), [0]);
        assert_eq!(ids(index.prefixes(), "smy"), [1]);
        assert_eq!(ids(index.prefixes(), "smythe"), [1]);
        assert_eq!(ids(index.prefixes(), "j"), [0, 1, 2]);
    }

    #[test]
    fn test_single_char_tokens_are_not_indexed() {
        let index = build_exhaustive(&["Jones, Quincy D"]);

        assert!(!index.words().contains(&token("d")));
        assert_eq!(ids(index.prefixes(), "q"), [0]);
        assert_eq!(index.words().len(), 2);
    }

    #[test]
    fn test_no_stop_words() {
        let index = build_exhaustive(&["The Band"]);
        assert_eq!(ids(index.words(), "the"), [0]);
    }

    #[test]
    fn test_repeated_token_recorded_once() {
        let index = build_exhaustive(&["Duran Duran"]);

        assert_eq!(ids(index.words(), "duran"), [0]);
        assert_eq!(index.words().posting_count(), 1);
    }

    #[test]
    fn test_empty_collection() {
        let index = build_exhaustive::<&str>(&[]);

        assert!(index.words().is_empty());
        assert!(index.prefixes().is_empty());
        assert_eq!(index.item_count(), 0);
        assert!(index.ids_in_range());
    }

    #[test]
    fn test_items_without_tokens_keep_their_position() {
        let index = build_exhaustive(&["--", "x", "Abba"]);

        assert_eq!(index.item_count(), 3);
        assert_eq!(ids(index.words(), "abba"), [2]);
    }
}

mod optimized {
    use super::common::*;
    use super::*;

    #[test]
    fn test_stop_words_skipped() {
        let index = build_optimized(&["The Sound of Music"]);

        assert!(!index.words().contains(&token("the")));
        assert!(!index.words().contains(&token("of")));
        assert_eq!(ids(index.words(), "sound"), [0]);
        assert!(!index.prefixes().contains(&token("th")));
    }

    #[test]
    fn test_prefix_lengths_are_bounded() {
        let index = build_optimized(&["Mississippi"]);

        assert!(!index.prefixes().contains(&token("m")));
        assert_eq!(ids(index.prefixes(), "mi"), [0]);
        assert_eq!(ids(index.prefixes(), "missis"), [0]);
        assert!(!index.prefixes().contains(&token("mississ")));
        assert_eq!(ids(index.words(), "mississippi"), [0]);
    }

    #[test]
    fn test_long_tokens_get_no_prefixes() {
        let index = build_optimized(&["Supercalifragilistic"]);

        assert_eq!(ids(index.words(), "supercalifragilistic"), [0]);
        assert!(index.prefixes().is_empty());
    }

    #[test]
    fn test_twelve_char_token_is_still_prefixed() {
        let index = build_optimized(&["abcdefghijkl"]);
        assert_eq!(index.prefixes().len(), 5);
    }

    #[test]
    fn test_custom_config() {
        let config = IndexConfig {
            min_prefix_len: 3,
            max_prefix_len: 4,
            stop_words: vec!["jane".to_string()],
            ..IndexConfig::optimized()
        };
        let index = IndexBuilder::new(config).build(&names());

        assert!(!index.words().contains(&token("jane")));
        assert!(!index.prefixes().contains(&token("sm")));
        assert_eq!(ids(index.prefixes(), "smit"), [0]);
        assert!(!index.prefixes().contains(&token("smith")));
    }

    #[test]
    fn test_mode_recorded() {
        assert_eq!(build_optimized(&names()).mode(), IndexMode::Optimized);
        assert_eq!(build_exhaustive(&names()).mode(), IndexMode::Exhaustive);
    }
}

mod mode_selection {
    use super::*;

    #[test]
    fn test_for_collection_size() {
        assert_eq!(IndexMode::for_collection_size(10, 100), IndexMode::Exhaustive);
        assert_eq!(IndexMode::for_collection_size(100, 100), IndexMode::Exhaustive);
        assert_eq!(IndexMode::for_collection_size(101, 100), IndexMode::Optimized);
    }

    #[test]
    fn test_sized_for_uses_threshold() {
        let config = IndexConfig {
            large_collection_threshold: 2,
            ..IndexConfig::exhaustive()
        };
        assert_eq!(config.clone().sized_for(3).mode, IndexMode::Optimized);
        assert_eq!(config.sized_for(2).mode, IndexMode::Exhaustive);
    }
}

mod fingerprint {
    use super::common::*;
    use super::*;

    #[test]
    fn test_rebuild_is_idempotent() {
        let first = build_optimized(&names());
        let second = build_optimized(&names());
        assert_eq!(first, second);
    }

    #[test]
    fn test_matches_items() {
        let index = build_exhaustive(&names());

        assert!(index.matches_items(&names()));
        assert!(!index.matches_items(&["Smith, John", "Smythe, Jane"]));
        assert!(!index.matches_items(&["Smith, John", "Smythe, Jane", "Doe, John"]));
    }

    #[test]
    fn test_config_fingerprint_tracks_shaping_settings() {
        let base = IndexConfig::optimized();

        let mut fewer_stop_words = base.clone();
        fewer_stop_words.stop_words.pop();
        let wider_prefixes = IndexConfig {
            max_prefix_len: 8,
            ..base.clone()
        };
        let longer_tokens = IndexConfig {
            min_token_len: 3,
            ..base.clone()
        };

        for changed in [&fewer_stop_words, &wider_prefixes, &longer_tokens] {
            assert_ne!(fingerprint_config(changed), fingerprint_config(&base));
        }
        assert_ne!(
            fingerprint_config(&IndexConfig::exhaustive()),
            fingerprint_config(&base)
        );
    }

    #[test]
    fn test_stop_word_order_and_case_do_not_matter() {
        let mut reordered = IndexConfig::optimized();
        reordered.stop_words.reverse();
        reordered.stop_words[0] = reordered.stop_words[0].to_uppercase();

        assert_eq!(
            fingerprint_config(&reordered),
            fingerprint_config(&IndexConfig::optimized())
        );
    }

    #[test]
    fn test_built_with() {
        let index = build_optimized(&names());

        assert!(index.built_with(&IndexConfig::optimized()));
        assert!(!index.built_with(&IndexConfig::exhaustive()));
        assert!(!index.built_with(&IndexConfig {
            max_prefixed_token_len: 20,
            ..IndexConfig::optimized()
        }));
    }

    #[test]
    fn test_boundaries_are_part_of_the_hash() {
        assert_ne!(fingerprint_items(&["ab", "c"]), fingerprint_items(&["a", "bc"]));
    }
}

mod snapshot {
    use super::common::*;
    use super::*;
    use crate::index::snapshot::SNAPSHOT_VERSION;
    use crate::index::snapshot::error::SnapshotError;

    #[test]
    fn test_capture_sorts_ids() {
        let snapshot = IndexSnapshot::capture(&build_exhaustive(&names()));

        assert_eq!(snapshot.words["jane"], vec![1, 2]);
        assert_eq!(snapshot.prefixes["j"], vec![0, 1, 2]);
        assert_eq!(snapshot.item_count, 3);
    }

    #[test]
    fn test_restore_roundtrip() {
        let index = build_optimized(&names());
        let restored = IndexSnapshot::capture(&index).restore().unwrap();
        assert_eq!(restored, index);
    }

    #[test]
    fn test_postcard_bytes_roundtrip() {
        let index = build_exhaustive(&names());
        let bytes = IndexSnapshot::capture(&index)
            .to_bytes(SnapshotCodec::Postcard)
            .unwrap();

        assert_eq!(bytes[0], SNAPSHOT_VERSION);
        let restored = IndexSnapshot::from_bytes(&bytes).unwrap().restore().unwrap();
        assert_eq!(restored, index);
    }

    #[test]
    fn test_json_bytes_roundtrip() {
        let index = build_exhaustive(&names());
        let bytes = IndexSnapshot::capture(&index)
            .to_bytes(SnapshotCodec::Json)
            .unwrap();

        let payload = std::str::from_utf8(&bytes[2..]).unwrap();
        assert!(payload.contains("\"smith\":[0]"));

        let restored = IndexSnapshot::from_bytes(&bytes).unwrap().restore().unwrap();
        assert_eq!(restored, index);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let a = IndexSnapshot::capture(&build_optimized(&names()))
            .to_bytes(SnapshotCodec::Postcard)
            .unwrap();
        let b = IndexSnapshot::capture(&build_optimized(&names()))
            .to_bytes(SnapshotCodec::Postcard)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_bytes() {
        assert!(matches!(
            IndexSnapshot::from_bytes(&[]),
            Err(SnapshotError::Empty)
        ));
        assert!(matches!(
            IndexSnapshot::from_bytes(&[SNAPSHOT_VERSION]),
            Err(SnapshotError::Empty)
        ));
    }

    #[test]
    fn test_unsupported_version() {
        assert!(matches!(
            IndexSnapshot::from_bytes(&[99, 0, 1, 2]),
            Err(SnapshotError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn test_unknown_codec() {
        assert!(matches!(
            IndexSnapshot::from_bytes(&[SNAPSHOT_VERSION, 7]),
            Err(SnapshotError::UnknownCodec(7))
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = IndexSnapshot::capture(&build_exhaustive(&names()))
            .to_bytes(SnapshotCodec::Postcard)
            .unwrap();

        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(
            IndexSnapshot::from_bytes(truncated),
            Err(SnapshotError::Postcard(_))
        ));
    }

    #[test]
    fn test_restore_rejects_out_of_range_id() {
        let mut snapshot = IndexSnapshot::capture(&build_exhaustive(&names()));
        snapshot.words.insert("ghost".to_string(), vec![3]);

        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::IdOutOfRange { id: 3, item_count: 3 })
        ));
    }

    #[test]
    fn test_restore_rejects_unnormalized_token() {
        let mut snapshot = IndexSnapshot::capture(&build_exhaustive(&names()));
        snapshot.prefixes.insert("Sm".to_string(), vec![0]);

        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::InvalidToken(key)) if key == "Sm"
        ));
    }

    #[test]
    fn test_restore_rejects_empty_postings() {
        let mut snapshot = IndexSnapshot::capture(&build_exhaustive(&names()));
        snapshot.words.insert("nobody".to_string(), vec![]);

        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::EmptyPostings(key)) if key == "nobody"
        ));
    }

    #[test]
    fn test_restore_deduplicates_ids() {
        let mut snapshot = IndexSnapshot::capture(&build_exhaustive(&names()));
        snapshot.words.insert("doe".to_string(), vec![2, 2]);

        let restored = snapshot.restore().unwrap();
        assert_eq!(ids(restored.words(), "doe"), [2]);
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn label_strategy() -> impl Strategy<Value = String> {
        prop::string::string_regex("[A-Za-z]{1,16}([ ,.-]{1,2}[A-Za-z0-9]{1,16}){0,3}").unwrap()
    }

    fn labels_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(label_strategy(), 0..24)
    }

    proptest! {
        /// Optimized prefixes are exhaustive prefixes of length 2..=6 from tokens of at most 12 chars.
        #[test]
        fn prop_optimized_prefixes_subset_of_exhaustive(items in labels_strategy()) {
            let exhaustive = build_exhaustive(&items);
            let config = IndexConfig { stop_words: vec![], ..IndexConfig::optimized() };
            let optimized = IndexBuilder::new(config).build(&items);

            for (prefix, ids) in optimized.prefixes().iter() {
                let len = prefix.char_len();
                prop_assert!((2..=6).contains(&len), "prefix {} has length {}", prefix, len);

                let full = exhaustive.prefixes().get(prefix);
                prop_assert!(full.is_some(), "prefix {} missing from exhaustive", prefix);
                prop_assert!(ids.is_subset(full.unwrap()));

                for id in ids {
                    let has_short_source = exhaustive.words().iter().any(|(word, word_ids)| {
                        word_ids.contains(id)
                            && word.char_len() <= 12
                            && word.starts_with(prefix.as_str())
                    });
                    prop_assert!(has_short_source, "prefix {} only comes from long tokens", prefix);
                }
            }
        }

        /// Snapshot round-trip is set-equal per key for both codecs.
        #[test]
        fn prop_snapshot_roundtrip(items in labels_strategy(), json in any::<bool>()) {
            let index = build_exhaustive(&items);
            let codec = if json { SnapshotCodec::Json } else { SnapshotCodec::Postcard };

            let bytes = IndexSnapshot::capture(&index).to_bytes(codec).unwrap();
            let restored = IndexSnapshot::from_bytes(&bytes).unwrap().restore().unwrap();

            prop_assert_eq!(restored, index);
        }

        /// Every id in either index addresses an item.
        #[test]
        fn prop_ids_in_range(items in labels_strategy()) {
            prop_assert!(build_exhaustive(&items).ids_in_range());
            prop_assert!(build_optimized(&items).ids_in_range());
        }
    }
}
