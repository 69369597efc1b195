//! MD5 content fingerprints for provenance records.
//!
//! These digests identify exact content; they are not a security measure.
//! Because the bytes are hashed verbatim, two texts that differ only in their
//! line endings (`\n` versus `\r\n`) get different digests.


use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use md5::{Digest, Md5};

use crate::error::{Error, Result};

/// Size of each read when digesting a file.
pub const CHUNK_SIZE: usize = 128;

/// In-memory content accepted by [`text_hexdigest`].
///
/// Text is hashed as its UTF-8 encoding, bytes as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextData<'a> {
  Text(&'a str),
  Bytes(&'a [u8]),
}

impl<'a> TextData<'a> {
  pub fn as_bytes(&self) -> &'a [u8] {
    match *self {
      TextData::Text(s) => s.as_bytes(),
      TextData::Bytes(b) => b,
    }
  }
}

impl<'a> From<&'a str> for TextData<'a> {
  fn from(s: &'a str) -> Self {
    TextData::Text(s)
  }
}

impl<'a> From<&'a String> for TextData<'a> {
  fn from(s: &'a String) -> Self {
    TextData::Text(s.as_str())
  }
}

impl<'a> From<&'a [u8]> for TextData<'a> {
  fn from(b: &'a [u8]) -> Self {
    TextData::Bytes(b)
  }
}

impl<'a> From<&'a Vec<u8>> for TextData<'a> {
  fn from(b: &'a Vec<u8>) -> Self {
    TextData::Bytes(b.as_slice())
  }
}

impl<'a, const N: usize> From<&'a [u8; N]> for TextData<'a> {
  fn from(b: &'a [u8; N]) -> Self {
    TextData::Bytes(b.as_slice())
  }
}

/// Returns the lowercase hex MD5 of a file's bytes.
///
/// The file is read in [`CHUNK_SIZE`] pieces, so memory use does not grow with
/// the file size.
pub fn file_hexdigest(path: impl AsRef<Path>) -> Result<String> {
  let path = path.as_ref();
  let mut file = File::open(path).map_err(|e| Error::io(path, e))?;

  let mut hasher = Md5::new();
  let mut buf = [0u8; CHUNK_SIZE];
  loop {
    let n = match file.read(&mut buf) {
      Ok(0) => break,
      Ok(n) => n,
      Err(e) if e.kind() == ErrorKind::Interrupted => continue,
      Err(e) => return Err(Error::io(path, e)),
    };
    hasher.update(&buf[..n]);
  }

  Ok(hex::encode(hasher.finalize()))
}

/// Returns the lowercase hex MD5 of in-memory text or bytes.
///
/// # Example
///
/// ```rust
/// use scitrack::text_hexdigest;
///
/// assert_eq!(text_hexdigest("abcde"), "ab56b4d92b40713acc5af89985d4b786");
/// assert_eq!(text_hexdigest("abcde"), text_hexdigest(b"abcde"));
/// ```
pub fn text_hexdigest<'a>(data: impl Into<TextData<'a>>) -> String {
  let data = data.into();
  hex::encode(Md5::digest(data.as_bytes()))
}
