use vertex_gallery::vertex_index::VertexIndices;

fn assert_ordinals(indices: &VertexIndices, n: usize) {
    assert_eq!(indices.len(), n);
    for (i, v) in indices.as_slice().iter().enumerate() {
        assert_eq!(*v, (i + 1) as f32);
    }
}

#[test]
fn starts_with_one_through_n() {
    let indices = VertexIndices::with_count(10_000);
    assert_ordinals(&indices, 10_000);
}

#[test]
fn grows_by_appending_ascending_ordinals() {
    let mut indices = VertexIndices::with_count(1000);
    assert!(indices.reconcile(3000));
    assert_ordinals(&indices, 3000);
}

#[test]
fn shrinks_by_truncating() {
    let mut indices = VertexIndices::with_count(5000);
    assert!(indices.reconcile(2000));
    assert_ordinals(&indices, 2000);
}

#[test]
fn unchanged_count_needs_no_upload() {
    let mut indices = VertexIndices::with_count(4000);
    assert!(!indices.reconcile(4000));
    assert_ordinals(&indices, 4000);
}

#[test]
fn any_sequence_of_counts_ends_at_the_last_one() {
    let mut indices = VertexIndices::default();
    for count in [7, 100_000, 1, 0, 42, 42, 99_000] {
        indices.reconcile(count);
        assert_ordinals(&indices, count as usize);
    }
    assert!(!indices.is_empty());
}
