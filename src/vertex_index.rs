/// Ascending `1..=N` ordinals uploaded as the only per-vertex attribute.
///
/// Shader bodies derive every position and color from this ordinal, so the
/// only thing that matters is that vertex `i` sees the value `i + 1`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexIndices {
    values: Vec<f32>,
}

impl VertexIndices {
    pub fn with_count(count: u32) -> Self {
        let mut indices = Self::default();
        indices.reconcile(count);
        indices
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Grows or truncates to exactly `count` entries. Returns `true` when the
    /// length changed and the GPU copy needs a re-upload.
    pub fn reconcile(&mut self, count: u32) -> bool {
        let target = count as usize;
        let current = self.values.len();
        if current == target {
            return false;
        }
        if current > target {
            self.values.truncate(target);
        } else {
            self.values.extend((current + 1..=target).map(|i| i as f32));
        }
        log::trace!("vertex indices {} -> {}", current, target);
        true
    }
}
