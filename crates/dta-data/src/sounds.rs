use crate::error::DecodeError;
use crate::reader::{Reader, trim_nul};

/// Decode the `SNDS` name table: a two-byte header, then `(u16 length, bytes)`
/// pairs until the section is exhausted.
pub fn decode_sounds(r: &mut Reader<'_>) -> Result<Vec<String>, DecodeError> {
    r.skip(2)?;
    let mut sounds = Vec::new();
    while !r.is_empty() {
        let len = usize::from(r.read_u16()?);
        sounds.push(trim_nul(r.read_bytes(len)?));
    }
    Ok(sounds)
}
