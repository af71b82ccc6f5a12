// tests/tile_tests.rs

use std::collections::HashSet;

use mahjong_eval::utils::tile::{
    FALLBACK_ASSET, Hand, Suit, Tile, decode_tiles, encode_tiles, sort_tiles, tile_image,
};

fn tiles(ids: &[i32]) -> Vec<Tile> {
    ids.iter().copied().map(Tile::new).collect()
}

#[test]
fn all_valid_ids_have_distinct_assets() {
    let names: Vec<String> = Tile::all().map(|t| t.asset_name()).collect();
    assert_eq!(names.len(), 34);
    assert!(names.iter().all(|n| !n.is_empty() && n != FALLBACK_ASSET));

    let unique: HashSet<&String> = names.iter().collect();
    assert_eq!(unique.len(), 34);
}

#[test]
fn suits_map_to_prefixed_ranks() {
    assert_eq!(Tile::new(0).asset_name(), "Man1");
    assert_eq!(Tile::new(8).asset_name(), "Man9");
    assert_eq!(Tile::new(9).asset_name(), "Pin1");
    assert_eq!(Tile::new(17).asset_name(), "Pin9");
    assert_eq!(Tile::new(18).asset_name(), "Sou1");
    assert_eq!(Tile::new(26).asset_name(), "Sou9");
    assert_eq!(Tile::new(13).suit(), Some(Suit::Pin));
}

#[test]
fn honors_follow_wind_then_dragon_order() {
    let honors: Vec<String> = (27..=33).map(|id| Tile::new(id).asset_name()).collect();
    assert_eq!(honors, ["Ton", "Nan", "Shaa", "Pei", "Haku", "Hatsu", "Chun"]);
    assert!((27..=33).all(|id| Tile::new(id).suit() == Some(Suit::Honor)));
}

#[test]
fn out_of_range_ids_fall_back_to_tile_back() {
    for id in [-1, 34, 9999] {
        let tile = Tile::new(id);
        assert!(!tile.is_valid());
        assert_eq!(tile.suit(), None);
        assert_eq!(tile.asset_name(), "Back");
        assert_eq!(tile_image(i64::from(id)), "/tiles/Back.svg");
    }
}

#[test]
fn image_paths_use_tiles_directory() {
    assert_eq!(tile_image(0), "/tiles/Man1.svg");
    assert_eq!(tile_image(29), "/tiles/Shaa.svg");
    assert_eq!(Tile::new(33).to_string(), "Chun");
}

#[test]
fn sorting_orders_by_id() {
    let mut hand = tiles(&[5, 2, 9, 0]);
    sort_tiles(&mut hand);
    assert_eq!(hand, tiles(&[0, 2, 5, 9]));

    let mut sorted = tiles(&[0, 2, 5, 9]);
    sort_tiles(&mut sorted);
    assert_eq!(sorted, tiles(&[0, 2, 5, 9]));

    let mut empty: Vec<Tile> = Vec::new();
    sort_tiles(&mut empty);
    assert!(empty.is_empty());

    let with_pairs = Hand::new(tiles(&[31, 27, 31, 0, 27])).sorted();
    assert_eq!(with_pairs.tiles(), tiles(&[0, 27, 27, 31, 31]).as_slice());
}

#[test]
fn hand_json_round_trip_keeps_order() {
    let original = tiles(&[33, 0, 27, 27, 5]);
    let text = encode_tiles(&original);
    assert_eq!(text, "[33,0,27,27,5]");
    assert_eq!(decode_tiles(&text).unwrap(), original);

    let hand = Hand::from_json_str("[0,1,2,9,10,11,18,19,20,27,27,31,31,32]").unwrap();
    assert_eq!(hand.len(), 14);
    assert!(hand.has_legal_size());
    assert_eq!(Hand::from_json_str(&hand.to_json_string()).unwrap(), hand);
}

#[test]
fn decoding_keeps_invalid_ids_and_rejects_bad_json() {
    let hand = Hand::from_json_str("[0,40]").unwrap();
    assert_eq!(hand.first_invalid(), Some(Tile::new(40)));
    assert!(!hand.has_legal_size());

    assert!(decode_tiles("[0,1").is_err());
    assert!(decode_tiles("\"[0,1]\"").is_err());
}
