//! Amount model for token quantities in smallest units
//!
//! Wraps a 256-bit unsigned integer and serializes as a decimal string so
//! arbitrary-precision values survive JSON transport without losing digits.

use primitive_types::{U256, U512};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::AmountError;

/// Basis points in one whole (100%)
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Token amount in the token's smallest unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(pub U256);

impl Amount {
	pub fn zero() -> Self {
		Self(U256::zero())
	}

	pub fn is_zero(&self) -> bool {
		self.0.is_zero()
	}

	/// Parse a plain decimal string (digits only, no separators)
	pub fn from_decimal_str(value: &str) -> Result<Self, AmountError> {
		if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
			return Err(AmountError::InvalidDecimal {
				value: value.to_string(),
			});
		}
		U256::from_dec_str(value)
			.map(Self)
			.map_err(|_| AmountError::Overflow {
				value: value.to_string(),
			})
	}

	pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
		self.0.checked_add(other.0).map(Amount)
	}

	pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
		self.0.checked_sub(other.0).map(Amount)
	}

	pub fn saturating_sub(&self, other: &Amount) -> Amount {
		Amount(self.0.saturating_sub(other.0))
	}

	/// Multiply by an integer factor, saturating at the 256-bit ceiling
	pub fn saturating_mul(&self, factor: u64) -> Amount {
		Amount(
			self.0
				.checked_mul(U256::from(factor))
				.unwrap_or_else(U256::max_value),
		)
	}

	/// Reduce this amount by `bps` basis points (50 bps = 0.50%).
	///
	/// Returns the amount unchanged for zero bps and zero for bps >= 100%.
	pub fn apply_haircut_bps(&self, bps: u32) -> Amount {
		if bps == 0 {
			return *self;
		}
		if bps >= BPS_DENOMINATOR {
			return Amount::zero();
		}
		Amount(mul_bps(self.0, BPS_DENOMINATOR - bps))
	}

	/// Take `bps` basis points of this amount (fee computation)
	pub fn portion_bps(&self, bps: u32) -> Amount {
		Amount(mul_bps(self.0, bps.min(BPS_DENOMINATOR)))
	}
}

/// `value * bps / 10_000` through a 512-bit intermediate, so the product
/// cannot overflow before the divide. For `bps <= 10_000` the result always
/// fits back into 256 bits.
fn mul_bps(value: U256, bps: u32) -> U256 {
	let scaled = value.full_mul(U256::from(bps)) / U512::from(BPS_DENOMINATOR);
	U256::try_from(scaled).unwrap_or_else(|_| U256::max_value())
}

/// Convert a human-readable decimal string into smallest units.
///
/// `parse_units("1.5", 6)` == 1_500_000. Fractional digits beyond `decimals`
/// are rejected rather than silently truncated.
pub fn parse_units(value: &str, decimals: u8) -> Result<Amount, AmountError> {
	let value = value.trim();
	if value.is_empty() || value.starts_with('-') {
		return Err(AmountError::InvalidDecimal {
			value: value.to_string(),
		});
	}

	let (int_part, frac_part) = match value.split_once('.') {
		Some((i, f)) => (i, f),
		None => (value, ""),
	};

	if int_part.is_empty() && frac_part.is_empty() {
		return Err(AmountError::InvalidDecimal {
			value: value.to_string(),
		});
	}
	if !int_part.chars().all(|c| c.is_ascii_digit())
		|| !frac_part.chars().all(|c| c.is_ascii_digit())
	{
		return Err(AmountError::InvalidDecimal {
			value: value.to_string(),
		});
	}
	if frac_part.len() > decimals as usize {
		return Err(AmountError::TooManyFractionalDigits {
			value: value.to_string(),
			decimals,
		});
	}

	let int_units = if int_part.is_empty() {
		U256::zero()
	} else {
		U256::from_dec_str(int_part).map_err(|_| AmountError::Overflow {
			value: value.to_string(),
		})?
	};

	let scale = U256::from(10u64)
		.checked_pow(U256::from(decimals))
		.ok_or_else(|| AmountError::Overflow {
			value: value.to_string(),
		})?;
	let scaled = int_units
		.checked_mul(scale)
		.ok_or_else(|| AmountError::Overflow {
			value: value.to_string(),
		})?;

	let frac_units = if frac_part.is_empty() {
		U256::zero()
	} else {
		let padded = format!("{:0<width$}", frac_part, width = decimals as usize);
		U256::from_dec_str(&padded).map_err(|_| AmountError::Overflow {
			value: value.to_string(),
		})?
	};

	scaled
		.checked_add(frac_units)
		.map(Amount)
		.ok_or_else(|| AmountError::Overflow {
			value: value.to_string(),
		})
}

/// Convert smallest units into a human-readable decimal string.
///
/// Trailing fractional zeros are trimmed; `format_units(1_500_000, 6)` ==
/// `"1.5"`. Round-trips through [`parse_units`] for any amount.
pub fn format_units(amount: &Amount, decimals: u8) -> String {
	if decimals == 0 {
		return amount.0.to_string();
	}

	let scale = match U256::from(10u64).checked_pow(U256::from(decimals)) {
		Some(scale) => scale,
		// Unreachable for any sane token config
		None => return amount.0.to_string(),
	};
	let int_part = amount.0 / scale;
	let frac_part = amount.0 % scale;

	if frac_part.is_zero() {
		return int_part.to_string();
	}

	let frac = format!("{:0>width$}", frac_part.to_string(), width = decimals as usize);
	let frac = frac.trim_end_matches('0');
	format!("{}.{}", int_part, frac)
}

impl fmt::Display for Amount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for Amount {
	type Err = AmountError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_decimal_str(s)
	}
}

impl From<u64> for Amount {
	fn from(value: u64) -> Self {
		Self(U256::from(value))
	}
}

impl From<u128> for Amount {
	fn from(value: u128) -> Self {
		Self(U256::from(value))
	}
}

impl From<U256> for Amount {
	fn from(value: U256) -> Self {
		Self(value)
	}
}

// Serialize as a decimal string to keep full precision in JSON
impl Serialize for Amount {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.0.to_string())
	}
}

impl<'de> Deserialize<'de> for Amount {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value = String::deserialize(deserializer)?;
		Amount::from_decimal_str(&value).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_amount_decimal_parsing() {
		let amount = Amount::from_decimal_str("1000000000000000000").unwrap();
		assert_eq!(amount, Amount::from(1_000_000_000_000_000_000u128));

		assert!(Amount::from_decimal_str("").is_err());
		assert!(Amount::from_decimal_str("12a4").is_err());
		assert!(Amount::from_decimal_str("-5").is_err());
	}

	#[test]
	fn test_parse_units_whole_and_fractional() {
		assert_eq!(parse_units("1.5", 6).unwrap(), Amount::from(1_500_000u64));
		assert_eq!(parse_units("0.000001", 6).unwrap(), Amount::from(1u64));
		assert_eq!(parse_units("42", 0).unwrap(), Amount::from(42u64));
		assert_eq!(
			parse_units("1", 18).unwrap(),
			Amount::from(1_000_000_000_000_000_000u128)
		);
	}

	#[test]
	fn test_parse_units_rejects_excess_precision() {
		assert!(parse_units("1.0000001", 6).is_err());
		assert!(parse_units("1.5", 0).is_err());
		assert!(parse_units("abc", 6).is_err());
		assert!(parse_units("-1", 6).is_err());
		assert!(parse_units(".", 6).is_err());
	}

	#[test]
	fn test_format_units() {
		assert_eq!(format_units(&Amount::from(1_500_000u64), 6), "1.5");
		assert_eq!(format_units(&Amount::from(1u64), 6), "0.000001");
		assert_eq!(format_units(&Amount::from(42u64), 0), "42");
		assert_eq!(
			format_units(&Amount::from(1_000_000_000_000_000_000u128), 18),
			"1"
		);
	}

	#[test]
	fn test_units_round_trip() {
		for decimals in [0u8, 1, 6, 9, 18] {
			for raw in [0u128, 1, 999, 1_000_000, 123_456_789_012_345_678] {
				let amount = Amount::from(raw);
				let text = format_units(&amount, decimals);
				assert_eq!(
					parse_units(&text, decimals).unwrap(),
					amount,
					"round-trip failed for {} with {} decimals",
					raw,
					decimals
				);
			}
		}
	}

	#[test]
	fn test_apply_haircut_bps() {
		let amount = Amount::from(10_000u64);
		assert_eq!(amount.apply_haircut_bps(0), amount);
		assert_eq!(amount.apply_haircut_bps(50), Amount::from(9_950u64));
		assert_eq!(amount.apply_haircut_bps(10_000), Amount::zero());
		assert_eq!(amount.apply_haircut_bps(20_000), Amount::zero());
	}

	#[test]
	fn test_bps_math_at_the_256_bit_ceiling() {
		// Venue-supplied amounts deserialize up to U256::MAX; the bps helpers
		// must stay total over that whole range
		let max = Amount(U256::max_value());

		assert_eq!(max.apply_haircut_bps(0), max);
		assert_eq!(max.apply_haircut_bps(10_000), Amount::zero());
		let cut = max.apply_haircut_bps(50);
		assert!(cut < max);
		assert!(!cut.is_zero());

		assert_eq!(max.portion_bps(10_000), max);
		let fee = max.portion_bps(30);
		assert!(fee < max);
		assert!(!fee.is_zero());
	}

	#[test]
	fn test_portion_bps() {
		let amount = Amount::from(10_000u64);
		assert_eq!(amount.portion_bps(30), Amount::from(30u64));
		assert_eq!(amount.portion_bps(10_000), amount);
	}

	#[test]
	fn test_amount_serde_decimal_string() {
		let amount = Amount::from(1_000_000_000_000_000_000u128);
		let json = serde_json::to_string(&amount).unwrap();
		assert_eq!(json, "\"1000000000000000000\"");

		let back: Amount = serde_json::from_str(&json).unwrap();
		assert_eq!(back, amount);

		assert!(serde_json::from_str::<Amount>("\"abc\"").is_err());
		assert!(serde_json::from_str::<Amount>("\"\"").is_err());
	}
}
