//! The audio feature texture: a 32×32 RGBA image the shaders sample as `sound`.
//!
//! Amplitude blocks arrive from the audio callback at their own cadence. Each
//! update scans one 4-byte group of the (doubled, saturated) block and paints
//! it as a horizontal fade from the group's alpha to fully transparent. When
//! the cursor runs past the block it wraps and the next block is rescaled.
//! Once the audio source is lost the texture is silenced: it goes blank and
//! ignores further blocks.

pub const SOUND_TEXTURE_SIZE: usize = 32;

const GROUP: usize = 4;

#[derive(Clone, Debug)]
pub struct SoundTexture {
    pixels: Vec<u8>,
    scaled: Vec<u8>,
    cursor: usize,
    generation: u64,
    silenced: bool,
}

impl Default for SoundTexture {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundTexture {
    pub fn new() -> Self {
        Self {
            pixels: vec![0; SOUND_TEXTURE_SIZE * SOUND_TEXTURE_SIZE * 4],
            scaled: Vec::new(),
            cursor: 0,
            generation: 0,
            silenced: false,
        }
    }

    /// Tightly packed RGBA8 rows, top row first.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bumped on every change to `pixels`, so uploads can be skipped when idle.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_silenced(&self) -> bool {
        self.silenced
    }

    /// Feeds one block of unsigned time-domain samples (128 = silence).
    pub fn update(&mut self, samples: &[u8]) {
        if samples.is_empty() || self.silenced {
            return;
        }
        if self.cursor >= samples.len() {
            self.cursor = 0;
        }
        if self.cursor == 0 {
            self.scaled.clear();
            self.scaled.extend(samples.iter().map(|&s| rescale(s)));
        }

        let channel = |offset: usize| self.scaled.get(self.cursor + offset).copied().unwrap_or(0);
        let (r, g, b, a) = (channel(0), channel(1), channel(2), channel(3));
        self.paint_fade([r, g, b], a);

        self.cursor += GROUP;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Back to an all-zero image. Later blocks paint again.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.scaled.clear();
        self.cursor = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Blanks the image for good: an analyser with nothing connected still
    /// reports mid-scale bytes, which would otherwise paint a bright fade.
    pub fn silence(&mut self) {
        self.clear();
        self.silenced = true;
    }

    fn paint_fade(&mut self, rgb: [u8; 3], alpha: u8) {
        let row_bytes = SOUND_TEXTURE_SIZE * 4;
        let (first_row, rest) = self.pixels.split_at_mut(row_bytes);
        for (x, px) in first_row.chunks_exact_mut(4).enumerate() {
            let t = (x as f32 + 0.5) / SOUND_TEXTURE_SIZE as f32;
            px[..3].copy_from_slice(&rgb);
            px[3] = (alpha as f32 * (1.0 - t)).round().clamp(0.0, 255.0) as u8;
        }
        for row in rest.chunks_exact_mut(row_bytes) {
            row.copy_from_slice(first_row);
        }
    }
}

/// Doubles a sample and saturates it into the 0..=255 texel range.
pub fn rescale(sample: u8) -> u8 {
    sample.saturating_mul(2)
}
