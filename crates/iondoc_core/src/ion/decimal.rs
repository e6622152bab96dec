use std::fmt;

/// Exact Ion decimal: `(-1)^negative * digits * 10^exponent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
	/// Sign flag; kept for negative zero.
	pub negative: bool,
	/// Coefficient as ASCII digits without leading zeros (`"0"` for zero).
	pub digits: String,
	/// Base-10 exponent; wider than the wire's so adjustments cannot overflow.
	pub exponent: i128,
}

impl Decimal {
	/// Decimal zero with exponent 0 (`0d0`).
	pub fn zero() -> Self {
		Self {
			negative: false,
			digits: "0".to_owned(),
			exponent: 0,
		}
	}

	/// Read Ion text notation: `-12.34`, `1234d-2`, `1.5D3`, `0.`.
	pub fn from_ion_text(text: &str) -> Option<Self> {
		let text = text.trim();
		let (negative, body) = match text.strip_prefix('-') {
			Some(rest) => (true, rest),
			None => (false, text.strip_prefix('+').unwrap_or(text)),
		};
		let (mantissa, exponent) = match body.find(['d', 'D']) {
			Some(idx) => (&body[..idx], body[idx + 1..].parse::<i128>().ok()?),
			None => (body, 0),
		};
		let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
		if whole.is_empty() && fraction.is_empty() {
			return None;
		}
		if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
			return None;
		}

		let digits: String = whole.chars().chain(fraction.chars()).collect();
		let digits = match digits.trim_start_matches('0') {
			"" => "0".to_owned(),
			trimmed => trimmed.to_owned(),
		};
		let exponent = exponent.checked_sub(i128::try_from(fraction.len()).ok()?)?;
		Some(Self {
			negative,
			digits,
			exponent,
		})
	}
}

impl fmt::Display for Decimal {
	/// Scientific-string rendering: plain digits while the adjusted exponent
	/// stays at or above -6 and the exponent is not positive, `dE±n` otherwise.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let digits = self.digits.as_str();
		let precision = digits.len() as i128;
		let adjusted = self.exponent.saturating_add(precision - 1);

		if self.negative {
			f.write_str("-")?;
		}

		if self.exponent <= 0 && adjusted >= -6 {
			if self.exponent == 0 {
				return f.write_str(digits);
			}

			// adjusted >= -6 bounds the scale by precision + 5
			let scale = self.exponent.unsigned_abs() as usize;
			if digits.len() <= scale {
				return write!(f, "0.{}{}", "0".repeat(scale - digits.len()), digits);
			}

			let (int_part, frac_part) = digits.split_at(digits.len() - scale);
			return write!(f, "{int_part}.{frac_part}");
		}

		let (lead, rest) = digits.split_at(1);
		f.write_str(lead)?;
		if !rest.is_empty() {
			write!(f, ".{rest}")?;
		}
		if adjusted >= 0 {
			write!(f, "E+{adjusted}")
		} else {
			write!(f, "E{adjusted}")
		}
	}
}

#[cfg(test)]
mod tests {
	use super::Decimal;

	fn dec(negative: bool, digits: &str, exponent: i128) -> String {
		Decimal {
			negative,
			digits: digits.to_owned(),
			exponent,
		}
		.to_string()
	}

	#[test]
	fn plain_rendering_for_small_scales() {
		assert_eq!(dec(false, "123", 0), "123");
		assert_eq!(dec(false, "123", -2), "1.23");
		assert_eq!(dec(false, "123", -5), "0.00123");
		assert_eq!(dec(true, "5", -1), "-0.5");
		assert_eq!(dec(false, "0", -2), "0.00");
	}

	#[test]
	fn scientific_rendering_for_positive_or_tiny_exponents() {
		assert_eq!(dec(false, "123", 3), "1.23E+5");
		assert_eq!(dec(false, "1", 1), "1E+1");
		assert_eq!(dec(false, "1", -10), "1E-10");
	}

	#[test]
	fn extreme_exponents_render_without_overflow() {
		assert_eq!(dec(false, "10", i64::MAX.into()), "1.0E+9223372036854775808");
		assert_eq!(dec(true, "12", i64::MIN.into()), "-1.2E-9223372036854775807");
		assert_eq!(dec(false, "99", i128::MAX), format!("9.9E+{}", i128::MAX));
	}

	#[test]
	fn negative_zero_keeps_sign() {
		assert_eq!(dec(true, "0", 0), "-0");
		assert_eq!(Decimal::zero().to_string(), "0");
	}

	#[test]
	fn ion_text_forms_are_read() {
		let read = |text: &str| Decimal::from_ion_text(text).map(|decimal| decimal.to_string());

		assert_eq!(read("1.23").as_deref(), Some("1.23"));
		assert_eq!(read("123d-2").as_deref(), Some("1.23"));
		assert_eq!(read("1.5D3").as_deref(), Some("1.5E+3"));
		assert_eq!(read("0.000123").as_deref(), Some("0.000123"));
		assert_eq!(read("-0.").as_deref(), Some("-0"));
		assert_eq!(read("0d-2").as_deref(), Some("0.00"));
		assert_eq!(read("10d9223372036854775807").as_deref(), Some("1.0E+9223372036854775808"));
		assert_eq!(read("abc"), None);
		assert_eq!(read("."), None);
		assert_eq!(read("1d"), None);
	}
}
