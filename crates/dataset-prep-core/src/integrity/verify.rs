use crate::error::Error;
use std::path::Path;

/// Decode-verification seam. Production uses the `image` crate; tests can
/// script failures without writing real image files.
pub trait DecodeVerifier: Send + Sync {
    /// Ok(()) when the file decodes as a structurally valid image. A decoded
    /// image is never corrupt, however visually degraded it may be.
    fn verify(&self, path: &Path) -> Result<(), Error>;
}

/// Verifier backed by `image::open`, which guesses the format and performs a
/// full decode. Never mutates the source file.
pub struct ImageDecodeVerifier;

impl DecodeVerifier for ImageDecodeVerifier {
    fn verify(&self, path: &Path) -> Result<(), Error> {
        match image::open(path) {
            Ok(_) => Ok(()),
            Err(image::ImageError::IoError(e)) => Err(Error::io(path, e)),
            Err(e) => Err(Error::Decode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }
}
