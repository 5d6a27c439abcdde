use crate::error::FormatError;
use crate::types::RoundingMode;

/// Exact decimal digits of a magnitude
///
/// The value is `0.d1 d2 ... dn * 10^decimal_at`. `digits` never has leading
/// or trailing zeros; zero is the empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DigitList {
    digits: Vec<u8>,
    decimal_at: i64,
}

impl DigitList {
    pub(crate) fn from_integer(value: u64) -> Self {
        Self::from_decimal_str(&value.to_string())
    }

    /// Shortest digits that round-trip to `value`; `value` must be finite
    pub(crate) fn from_f64(value: f64) -> Self {
        // Display for f64 never switches to exponent notation
        Self::from_decimal_str(&value.abs().to_string())
    }

    fn from_decimal_str(text: &str) -> Self {
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
        let mut digits: Vec<u8> = int_part
            .bytes()
            .chain(frac_part.bytes())
            .map(|b| b - b'0')
            .collect();
        let mut decimal_at = int_part.len() as i64;

        let leading_zeros = digits.iter().take_while(|d| **d == 0).count();
        digits.drain(..leading_zeros);
        decimal_at -= leading_zeros as i64;

        let mut list = Self { digits, decimal_at };
        list.normalize();
        list
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    fn normalize(&mut self) {
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.decimal_at = 0;
        }
    }

    /// Multiply by a positive factor without losing digits
    pub(crate) fn multiply(&mut self, factor: u64) {
        if self.is_zero() || factor == 1 {
            return;
        }
        let mut product = Vec::with_capacity(self.digits.len() + 20);
        let mut carry: u128 = 0;
        for &digit in self.digits.iter().rev() {
            let v = u128::from(digit) * u128::from(factor) + carry;
            product.push((v % 10) as u8);
            carry = v / 10;
        }
        while carry > 0 {
            product.push((carry % 10) as u8);
            carry /= 10;
        }
        product.reverse();

        self.decimal_at += product.len() as i64 - self.digits.len() as i64;
        self.digits = product;
        self.normalize();
    }

    /// Round to at most `max_fraction` fraction digits
    ///
    /// `negative` is the sign of the value the digits belong to; only the
    /// directional modes look at it.
    pub(crate) fn round(
        &mut self,
        max_fraction: usize,
        mode: RoundingMode,
        negative: bool,
    ) -> Result<(), FormatError> {
        let keep = self
            .decimal_at
            .saturating_add(i64::try_from(max_fraction).unwrap_or(i64::MAX));
        if keep >= self.digits.len() as i64 {
            return Ok(());
        }

        // Digits past `keep` are dropped; when keep < 0 even the first
        // dropped digit is an implied zero.
        let keep_len = keep.max(0) as usize;
        let (first_dropped, rest_nonzero) = if keep >= 0 {
            (
                self.digits[keep_len],
                self.digits[keep_len + 1..].iter().any(|d| *d != 0),
            )
        } else {
            (0, true)
        };
        let last_kept_odd = keep_len > 0 && self.digits[keep_len - 1] % 2 == 1;

        let round_up = match mode {
            RoundingMode::Unnecessary => {
                return Err(FormatError::RoundingNecessary {
                    fraction_digits: max_fraction,
                });
            }
            RoundingMode::Up => true,
            RoundingMode::Down => false,
            RoundingMode::Ceiling => !negative,
            RoundingMode::Floor => negative,
            RoundingMode::HalfUp => first_dropped >= 5,
            RoundingMode::HalfDown => first_dropped > 5 || (first_dropped == 5 && rest_nonzero),
            RoundingMode::HalfEven => {
                first_dropped > 5 || (first_dropped == 5 && (rest_nonzero || last_kept_odd))
            }
        };

        self.digits.truncate(keep_len);
        if round_up {
            self.increment_last_kept(keep);
        }
        self.normalize();
        Ok(())
    }

    /// Add one unit in the place of the last kept digit
    fn increment_last_kept(&mut self, keep: i64) {
        if keep <= 0 {
            self.decimal_at = self.decimal_at - keep + 1;
            self.digits = vec![1];
            return;
        }
        for i in (0..keep as usize).rev() {
            if self.digits[i] == 9 {
                self.digits[i] = 0;
            } else {
                self.digits[i] += 1;
                return;
            }
        }
        self.digits.insert(0, 1);
        self.decimal_at += 1;
    }

    /// Integer digits without grouping; empty when the value is below one
    pub(crate) fn integer_digits(&self) -> String {
        if self.decimal_at <= 0 {
            return String::new();
        }
        let int_len = self.decimal_at as usize;
        let mut out: String = self
            .digits
            .iter()
            .take(int_len)
            .map(|d| char::from(b'0' + d))
            .collect();
        for _ in self.digits.len()..int_len {
            out.push('0');
        }
        out
    }

    /// Fraction digits without trailing zeros
    pub(crate) fn fraction_digits(&self) -> String {
        let len = self.digits.len() as i64;
        if self.decimal_at >= len {
            return String::new();
        }
        let mut out = "0".repeat((-self.decimal_at).max(0) as usize);
        out.extend(
            self.digits[self.decimal_at.max(0) as usize..]
                .iter()
                .map(|d| char::from(b'0' + d)),
        );
        out
    }
}
