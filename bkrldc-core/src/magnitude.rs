//! Decoding of amounts written as digit runs followed by Chinese magnitude
//! units, e.g. `5仟6佰萬` or `1億5仟6佰萬`.
//!
//! Only the per-column unit grammar used by the bulletin is supported: the
//! string is cut once at `億` and once at `萬`, and each block is read with
//! the lower units 仟/佰/拾 plus a trailing ones place.

use crate::error::{BulletinError, Result};

pub const YI: char = '億';
pub const WAN: char = '萬';

const YI_VALUE: u64 = 100_000_000;
const WAN_VALUE: u64 = 10_000;

/// Units allowed inside a block.
const LOWER_UNITS: [(char, u64); 3] = [('仟', 1_000), ('佰', 100), ('拾', 10)];

/// Decode a magnitude string into an integer amount.
///
/// Digits must already be ASCII; see [`crate::text::normalize_digits`].
pub fn decode_magnitude(s: &str) -> Result<u64> {
    if let Some(ch) = s.chars().find(|&c| !c.is_ascii_digit() && !is_unit(c)) {
        return Err(BulletinError::UnknownCharacter {
            ch,
            input: s.to_string(),
        });
    }
    if !s.chars().any(|c| c.is_ascii_digit()) {
        return Err(BulletinError::NoDigitsPresent {
            input: s.to_string(),
        });
    }

    let overflow = || BulletinError::AmountOverflow {
        input: s.to_string(),
    };

    let mut total: u64 = 0;
    let mut rest = s;

    if let Some((head, tail)) = rest.split_once(YI) {
        let block = decode_block(head, s)?;
        total = block.checked_mul(YI_VALUE).ok_or_else(overflow)?;
        rest = tail;
    }

    if let Some((head, tail)) = rest.split_once(WAN) {
        let block = decode_block(head, s)?;
        let scaled = block.checked_mul(WAN_VALUE).ok_or_else(overflow)?;
        total = total.checked_add(scaled).ok_or_else(overflow)?;
        rest = tail;
    }

    let ones = decode_block(rest, s)?;
    total.checked_add(ones).ok_or_else(overflow)
}

fn is_unit(ch: char) -> bool {
    ch == YI || ch == WAN || LOWER_UNITS.iter().any(|(unit, _)| *unit == ch)
}

/// Read one block against the lower units. `input` is the whole amount,
/// kept for error messages.
fn decode_block(block: &str, input: &str) -> Result<u64> {
    let overflow = || BulletinError::AmountOverflow {
        input: input.to_string(),
    };

    let mut sum: u64 = 0;
    let mut pending: Option<u64> = None;

    for ch in block.chars() {
        if let Some(digit) = ch.to_digit(10) {
            let n = pending
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|n| n.checked_add(u64::from(digit)))
                .ok_or_else(overflow)?;
            pending = Some(n);
            continue;
        }

        let Some(&(_, value)) = LOWER_UNITS.iter().find(|(unit, _)| *unit == ch) else {
            // 億/萬 are only legal as block separators, a second one lands here
            return Err(BulletinError::UnknownCharacter {
                ch,
                input: input.to_string(),
            });
        };

        let n = pending.take().ok_or_else(|| BulletinError::DanglingUnit {
            unit: ch,
            input: input.to_string(),
        })?;
        let scaled = n.checked_mul(value).ok_or_else(overflow)?;
        sum = sum.checked_add(scaled).ok_or_else(overflow)?;
    }

    sum.checked_add(pending.unwrap_or(0)).ok_or_else(overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_literals() {
        assert_eq!(decode_magnitude("1億").unwrap(), 100_000_000);
        assert_eq!(decode_magnitude("26億").unwrap(), 2_600_000_000);
        assert_eq!(decode_magnitude("5仟萬").unwrap(), 50_000_000);
        assert_eq!(decode_magnitude("2億1仟萬").unwrap(), 210_000_000);
        assert_eq!(decode_magnitude("5仟6佰萬").unwrap(), 56_000_000);
        assert_eq!(decode_magnitude("1億5仟6佰萬").unwrap(), 156_000_000);
    }

    #[test]
    fn test_decode_plain_and_mixed() {
        assert_eq!(decode_magnitude("500").unwrap(), 500);
        assert_eq!(decode_magnitude("300萬").unwrap(), 3_000_000);
        assert_eq!(decode_magnitude("1仟2佰3拾4").unwrap(), 1_234);
        assert_eq!(decode_magnitude("3億20萬").unwrap(), 300_200_000);
    }

    #[test]
    fn test_unknown_character() {
        let err = decode_magnitude("abc").unwrap_err();
        assert!(matches!(err, BulletinError::UnknownCharacter { ch: 'a', .. }));

        let err = decode_magnitude("5a仟").unwrap_err();
        assert_eq!(
            err,
            BulletinError::UnknownCharacter {
                ch: 'a',
                input: "5a仟".to_string()
            }
        );
    }

    #[test]
    fn test_no_digits() {
        let err = decode_magnitude("億萬").unwrap_err();
        assert!(matches!(err, BulletinError::NoDigitsPresent { .. }));

        let err = decode_magnitude("仟佰拾").unwrap_err();
        assert!(matches!(err, BulletinError::NoDigitsPresent { .. }));

        let err = decode_magnitude("").unwrap_err();
        assert!(matches!(err, BulletinError::NoDigitsPresent { .. }));
    }

    #[test]
    fn test_repeated_block_unit_is_rejected() {
        let err = decode_magnitude("1億2億").unwrap_err();
        assert!(matches!(err, BulletinError::UnknownCharacter { ch: '億', .. }));

        let err = decode_magnitude("1萬2萬").unwrap_err();
        assert!(matches!(err, BulletinError::UnknownCharacter { ch: '萬', .. }));

        // 萬 before 億 ends up inside the 億 block
        let err = decode_magnitude("1萬2億").unwrap_err();
        assert!(matches!(err, BulletinError::UnknownCharacter { ch: '萬', .. }));
    }

    #[test]
    fn test_dangling_unit() {
        let err = decode_magnitude("1億仟").unwrap_err();
        assert!(matches!(err, BulletinError::DanglingUnit { unit: '仟', .. }));
    }

    #[test]
    fn test_fullwidth_digits_need_normalizing() {
        let err = decode_magnitude("５仟萬").unwrap_err();
        assert!(matches!(err, BulletinError::UnknownCharacter { ch: '５', .. }));
        let ascii = crate::text::normalize_digits("５仟萬");
        assert_eq!(decode_magnitude(&ascii).unwrap(), 50_000_000);
    }

    #[test]
    fn test_overflow() {
        let err = decode_magnitude("99999999999999999999").unwrap_err();
        assert!(matches!(err, BulletinError::AmountOverflow { .. }));

        let err = decode_magnitude("999999999999億").unwrap_err();
        assert!(matches!(err, BulletinError::AmountOverflow { .. }));
    }
}
