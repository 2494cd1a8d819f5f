//! Type descriptor parsing.
//!
//! A field declares its type with a compact descriptor:
//! - `an..N` / `anN` / `a..N` / `aN`: text with at most (or exactly) N characters
//! - `n..N` / `nN`: integral number with N digits (`int` below 10 digits, `long` otherwise)
//! - `n..N,M` / `nN,M`: decimal number with N digits and M fraction digits
//! - `boolean`, `date`, `datetime`, `uri`, `any`: keyword types
//!
//! The descriptor string itself is never rewritten, only interpreted.

use crate::{DataType, ModelError, ModelResult};
use regex_lite::Regex;
use std::sync::OnceLock;

/// Digit count from which plain numeric descriptors map to `long`.
const LONG_DIGITS: u32 = 10;

fn descriptor_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(an|a|n)(\.\.)?(\d+)(?:,(\d+))?$").expect("descriptor pattern is valid")
    })
}

/// The interpreted form of a type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Resolved storage type.
    pub data_type: DataType,
    /// Maximum length (characters or digits), if the descriptor has one.
    pub max_length: Option<u32>,
}

impl TypeDescriptor {
    fn keyword(data_type: DataType) -> Self {
        Self {
            data_type,
            max_length: None,
        }
    }

    /// Parse a descriptor such as `an..20` or `n10`.
    pub fn parse(descriptor: &str) -> ModelResult<Self> {
        let trimmed = descriptor.trim();
        if trimmed.is_empty() {
            return Err(ModelError::invalid_descriptor(descriptor, "empty descriptor"));
        }

        let lowered = trimmed.to_ascii_lowercase();
        match lowered.as_str() {
            "boolean" => return Ok(Self::keyword(DataType::Boolean)),
            "date" => return Ok(Self::keyword(DataType::Date)),
            "datetime" => return Ok(Self::keyword(DataType::DateTime)),
            "uri" => return Ok(Self::keyword(DataType::Uri)),
            "any" => return Ok(Self::keyword(DataType::Any)),
            _ => {}
        }

        let captures = descriptor_pattern()
            .captures(&lowered)
            .ok_or_else(|| ModelError::invalid_descriptor(descriptor, "unknown notation"))?;

        let kind = &captures[1];
        let length: u32 = captures[3]
            .parse()
            .map_err(|_| ModelError::invalid_descriptor(descriptor, "length out of range"))?;
        if length == 0 {
            return Err(ModelError::invalid_descriptor(descriptor, "length must be positive"));
        }
        let fraction = captures.get(4);

        let data_type = match kind {
            "a" | "an" => {
                if fraction.is_some() {
                    return Err(ModelError::invalid_descriptor(
                        descriptor,
                        "text descriptors have no fraction part",
                    ));
                }
                DataType::Text
            }
            _ if fraction.is_some() => DataType::Double,
            _ if length < LONG_DIGITS => DataType::Int,
            _ => DataType::Long,
        };

        Ok(Self {
            data_type,
            max_length: Some(length),
        })
    }
}
