//! Text collation keys
//!
//! Text keys are compared as byte strings. A collation turns a string into the
//! bytes that get compared. Transcoding CJK text into its legacy national
//! encoding (GBK, Big5, Shift_JIS, EUC-KR) yields the phonetic or radical
//! order those character sets were laid out in, which is what readers of
//! names in those scripts expect; plain UTF-8 bytes give code-point order.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use encoding_rs::{Encoding, EncoderResult, BIG5, EUC_KR, GBK, SHIFT_JIS};

use crate::error::{Result, SortError};

/// Byte written for characters the target encoding cannot represent.
pub const UNMAPPABLE_BYTE: u8 = b'?';

/// Maps text to an order-preserving byte sequence.
pub trait Collation: fmt::Debug + Send + Sync {
    /// Name used in configuration and logs
    fn name(&self) -> &str;

    /// Bytes `text` is ordered by. Borrows when no transcoding is needed.
    fn collation_key<'a>(&self, text: &'a str) -> Cow<'a, [u8]>;

    /// Byte order of the two collation keys.
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collation_key(a).cmp(&self.collation_key(b))
    }
}

/// Unicode code-point order (UTF-8 bytes).
#[derive(Debug, Clone, Copy, Default)]
pub struct CodePointCollation;

impl Collation for CodePointCollation {
    fn name(&self) -> &str {
        "codepoint"
    }

    fn collation_key<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        Cow::Borrowed(text.as_bytes())
    }
}

/// Order of a legacy multi-byte encoding.
#[derive(Clone, Copy)]
pub struct EncodingCollation {
    encoding: &'static Encoding,
}

impl fmt::Debug for EncodingCollation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingCollation")
            .field("encoding", &self.encoding.name())
            .finish()
    }
}

impl EncodingCollation {
    /// Collate by the byte layout of `encoding`.
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// Simplified Chinese pinyin order.
    pub fn gbk() -> Self {
        Self::new(GBK)
    }

    /// Target encoding of the collation keys.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

impl Collation for EncodingCollation {
    fn name(&self) -> &str {
        self.encoding.name()
    }

    fn collation_key<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        if text.is_ascii() && self.encoding.is_ascii_compatible() {
            return Cow::Borrowed(text.as_bytes());
        }

        let mut encoder = self.encoding.new_encoder();
        let mut out = Vec::new();
        let mut rest = text;
        loop {
            let needed = encoder
                .max_buffer_length_from_utf8_without_replacement(rest.len())
                .unwrap_or(rest.len().saturating_mul(4))
                .max(4);
            out.reserve(needed);

            let (result, read) =
                encoder.encode_from_utf8_to_vec_without_replacement(rest, &mut out, true);
            rest = &rest[read..];
            match result {
                EncoderResult::InputEmpty => break,
                EncoderResult::OutputFull => continue,
                EncoderResult::Unmappable(_) => out.push(UNMAPPABLE_BYTE),
            }
        }
        Cow::Owned(out)
    }
}

impl Default for EncodingCollation {
    fn default() -> Self {
        Self::gbk()
    }
}

/// The collation used when none is configured: GBK.
pub fn default_collation() -> Arc<dyn Collation> {
    Arc::new(EncodingCollation::gbk())
}

/// Resolve a locale tag (`zh-CN`, `ja`, …) or an encoding label (`gbk`,
/// `big5`, …) to a collation.
pub fn collation_for(name: &str) -> Result<Arc<dyn Collation>> {
    let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
    let collation: Arc<dyn Collation> = match normalized.as_str() {
        "codepoint" | "unicode" | "utf-8" | "utf8" => Arc::new(CodePointCollation),
        "zh" | "zh-cn" | "zh-sg" | "zh-hans" => Arc::new(EncodingCollation::new(GBK)),
        "zh-tw" | "zh-hk" | "zh-mo" | "zh-hant" => Arc::new(EncodingCollation::new(BIG5)),
        "ja" | "ja-jp" => Arc::new(EncodingCollation::new(SHIFT_JIS)),
        "ko" | "ko-kr" => Arc::new(EncodingCollation::new(EUC_KR)),
        label => match Encoding::for_label(label.as_bytes()) {
            Some(encoding) => Arc::new(EncodingCollation::new(encoding)),
            None => return Err(SortError::UnknownCollation(name.to_string())),
        },
    };
    Ok(collation)
}
