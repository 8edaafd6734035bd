/// The emitted bundle. `filename` is the last component of the output path.
#[derive(Debug, Clone)]
pub struct OutputAsset {
  pub filename: String,
  pub content: String,
}

impl OutputAsset {
  pub fn content_as_bytes(&self) -> &[u8] {
    self.content.as_bytes()
  }

  #[allow(clippy::cast_precision_loss)]
  pub fn size_in_kib(&self) -> f64 {
    self.content.len() as f64 / 1024.0
  }
}
