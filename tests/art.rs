use vertex_gallery::art::{ArtPiece, Registry};
use vertex_gallery::primitive::PrimitiveMode;
use vertex_gallery::shader::{vertex_source, BODY_TOKEN};
use vertex_gallery::GalleryError;

const BODY: &str = "void main() {}";

#[test]
fn registry_orders_pieces_by_rank() {
    let mut registry = Registry::new();
    registry.register(ArtPiece::new("c", "third", BODY).sort(9)).expect("register c");
    registry.register(ArtPiece::new("a", "first", BODY).sort(1)).expect("register a");
    registry.register(ArtPiece::new("b", "second", BODY).sort(4)).expect("register b");

    let keys: Vec<&str> = registry.pieces().iter().map(|p| p.key).collect();
    assert_eq!(keys, ["a", "b", "c"]);
    assert_eq!(registry.first().map(|p| p.key), Some("a"));
}

#[test]
fn equal_ranks_keep_registration_order() {
    let mut registry = Registry::new();
    registry.register(ArtPiece::new("x", "x", BODY).sort(2)).expect("register x");
    registry.register(ArtPiece::new("y", "y", BODY).sort(2)).expect("register y");
    let keys: Vec<&str> = registry.pieces().iter().map(|p| p.key).collect();
    assert_eq!(keys, ["x", "y"]);
}

#[test]
fn unranked_pieces_sort_first() {
    let mut registry = Registry::new();
    registry.register(ArtPiece::new("ranked", "ranked", BODY).sort(0)).expect("register");
    registry.register(ArtPiece::new("plain", "plain", BODY)).expect("register");
    assert_eq!(registry.first().map(|p| p.key), Some("plain"));
}

#[test]
fn registry_rejects_duplicate_keys() {
    let mut registry = Registry::new();
    registry.register(ArtPiece::new("dup", "one", BODY)).expect("first register");
    let err = registry
        .register(ArtPiece::new("dup", "two", BODY))
        .expect_err("duplicate key must fail");
    assert!(matches!(err, GalleryError::DuplicateKey(ref k) if k == "dup"));
}

#[test]
fn unnamed_pieces_are_not_listed() {
    let mut registry = Registry::new();
    registry.register(ArtPiece::new("hidden", "", BODY)).expect("register");
    assert!(registry.is_empty());
}

#[test]
fn descriptors_have_explicit_defaults() {
    let piece = ArtPiece::new("k", "name", BODY);
    assert_eq!(piece.sort, i32::MIN);
    assert_eq!(piece.primitive, PrimitiveMode::Points);
    assert_eq!(piece.canvas.width, "800px");
    assert_eq!(piece.canvas.height, "600px");
    assert_eq!(piece.source, None);
}

#[test]
fn lookup_accepts_keys_and_menu_labels() {
    let mut registry = Registry::new();
    registry
        .register(ArtPiece::new("ring", "ring", BODY).sort(3).primitive(PrimitiveMode::LineStrip))
        .expect("register");

    assert_eq!(registry.lookup("ring").expect("by key").key, "ring");
    assert_eq!(registry.lookup("(3) ring").expect("by label").key, "ring");
    let err = registry.lookup("missing").expect_err("unknown piece");
    assert!(matches!(err, GalleryError::UnknownPiece(_)));
}

#[test]
fn menu_entries_serialize_for_the_control_surface() {
    let mut registry = Registry::new();
    registry
        .register(ArtPiece::new("ring", "ring", BODY).sort(3).primitive(PrimitiveMode::LineStrip))
        .expect("register");
    let json = serde_json::to_value(registry.menu()).expect("serialize menu");
    assert_eq!(json[0]["key"], "ring");
    assert_eq!(json[0]["label"], "(3) ring");
    assert_eq!(json[0]["primitive"], "line_strip");
    assert!(json[0].get("source").is_none());
}

#[test]
fn published_pieces_carry_their_source_link() {
    let mut registry = Registry::new();
    registry
        .register(ArtPiece::new("wave", "wave", BODY).source("https://www.vertexshaderart.com/art/wave"))
        .expect("register");
    let json = serde_json::to_value(registry.menu()).expect("serialize menu");
    assert_eq!(json[0]["source"], "https://www.vertexshaderart.com/art/wave");
}

#[test]
fn builtin_pieces_are_complete_vertex_bodies() {
    let registry = Registry::builtin().expect("builtin registry");
    assert!(registry.len() >= 2);
    for piece in registry.pieces() {
        assert!(piece.body.contains("void main"), "`{}` has no main", piece.key);
        let source = vertex_source(piece.body);
        assert!(!source.contains(BODY_TOKEN));
        assert!(source.contains("#define vertexId"));
    }
    let ranks: Vec<i32> = registry.pieces().iter().map(|p| p.sort).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(registry.get("empty").map(|p| p.sort), Some(10));
}
