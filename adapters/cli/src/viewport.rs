use glam::Vec2;
use thiserror::Error;

/// Raised when a `WIDTHxHEIGHT` argument cannot be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("could not parse viewport '{0}'; expected WIDTHxHEIGHT with non-zero sides")]
pub(crate) struct ViewportError(String);

/// Parses a canvas size such as `1280x800`.
pub(crate) fn parse_viewport(value: &str) -> Result<Vec2, ViewportError> {
    let invalid = || ViewportError(value.to_owned());
    let (width, height) = value.split_once(['x', 'X']).ok_or_else(invalid)?;

    let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = height.trim().parse::<u32>().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }

    Ok(Vec2::new(width as f32, height as f32))
}
