//! Monetary amounts: denominations, integer coins and decimal coins
//!
//! Amounts are written the way the chain CLI writes them: digits immediately
//! followed by the denomination (`10000000uakt`, `0.025uakt`).

use crate::error::WasmAkashError;
use crate::proto::cosmos;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// IBC denomination of USDC on Akash mainnet
pub const USDC_IBC_DENOM: &str =
    "ibc/170C677610AC31DF0904FFE09CD3B5C657492170E7E52372E48756B71E56F2AC";

/// Fractional digits of a cosmos-sdk `Dec`
pub const DEC_PRECISION: u32 = 18;

const DEC_ONE: u128 = 10u128.pow(DEC_PRECISION);

/// Denominations accepted by the Akash escrow and market modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denom {
    /// Native token, micro-AKT
    Uakt,
    /// Bridged USDC
    Usdc,
}

impl Denom {
    pub fn as_str(self) -> &'static str {
        match self {
            Denom::Uakt => "uakt",
            Denom::Usdc => USDC_IBC_DENOM,
        }
    }
}

impl FromStr for Denom {
    type Err = WasmAkashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uakt" => Ok(Denom::Uakt),
            USDC_IBC_DENOM => Ok(Denom::Usdc),
            "" => Err(WasmAkashError::validation("Missing denomination")),
            other => Err(WasmAkashError::validation(format!(
                "Unrecognized denomination: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split `<amount><denom>` at the first character that cannot be part of the amount
fn split_amount(input: &str, allow_decimal: bool) -> Result<(&str, Denom), WasmAkashError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(WasmAkashError::validation("Missing amount"));
    }
    if input.starts_with('-') {
        return Err(WasmAkashError::validation(format!(
            "Amount must be positive: {}",
            input
        )));
    }

    let split = input
        .find(|c: char| !(c.is_ascii_digit() || (allow_decimal && c == '.')))
        .unwrap_or(input.len());
    let (amount, denom) = input.split_at(split);
    if amount.is_empty() {
        return Err(WasmAkashError::validation(format!(
            "Missing amount in {}",
            input
        )));
    }

    Ok((amount, denom.parse()?))
}

/// Integer amount with a denomination (`cosmos.base.v1beta1.Coin`)
///
/// A `Coin` is always strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CoinRepr", into = "String")]
pub struct Coin {
    amount: u128,
    denom: Denom,
}

impl Coin {
    pub fn new(amount: u128, denom: Denom) -> Result<Self, WasmAkashError> {
        if amount == 0 {
            return Err(WasmAkashError::validation(format!(
                "Amount must be positive: 0{}",
                denom
            )));
        }
        Ok(Coin { amount, denom })
    }

    pub fn amount(&self) -> u128 {
        self.amount
    }

    pub fn denom(&self) -> Denom {
        self.denom
    }

    pub fn to_proto(&self) -> cosmos::Coin {
        cosmos::Coin {
            denom: self.denom.as_str().to_string(),
            amount: self.amount.to_string(),
        }
    }
}

impl FromStr for Coin {
    type Err = WasmAkashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, denom) = split_amount(s, false)?;
        let amount: u128 = amount
            .parse()
            .map_err(|e| WasmAkashError::validation(format!("Invalid amount {}: {}", s, e)))?;
        Coin::new(amount, denom)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl From<Coin> for String {
    fn from(coin: Coin) -> Self {
        coin.to_string()
    }
}

/// Fixed-point amount with a denomination (`cosmos.base.v1beta1.DecCoin`)
///
/// Stored as the 18-decimal integer the chain puts on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CoinRepr", into = "String")]
pub struct DecCoin {
    atomics: u128,
    denom: Denom,
}

impl DecCoin {
    pub(crate) fn from_atomics(atomics: u128, denom: Denom) -> Self {
        DecCoin { atomics, denom }
    }

    pub fn denom(&self) -> Denom {
        self.denom
    }

    /// Amount scaled by 10^18
    pub fn atomics(&self) -> u128 {
        self.atomics
    }

    /// Multiply by an integer and round up to a whole `Coin`
    pub fn mul_ceil(&self, factor: u64) -> Result<Coin, WasmAkashError> {
        let scaled = self.atomics.checked_mul(factor as u128).ok_or_else(|| {
            WasmAkashError::encoding(format!("Fee overflow: {} x {}", self, factor))
        })?;
        let amount = scaled.div_ceil(DEC_ONE);
        Coin::new(amount, self.denom).map_err(|_| {
            WasmAkashError::encoding(format!("Fee rounds to zero: {} x {}", self, factor))
        })
    }

    pub fn to_proto(&self) -> cosmos::DecCoin {
        cosmos::DecCoin {
            denom: self.denom.as_str().to_string(),
            amount: self.atomics.to_string(),
        }
    }
}

impl FromStr for DecCoin {
    type Err = WasmAkashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, denom) = split_amount(s, true)?;
        let (whole, frac) = amount.split_once('.').unwrap_or((amount, ""));
        if frac.len() > DEC_PRECISION as usize || frac.contains('.') {
            return Err(WasmAkashError::validation(format!(
                "Invalid decimal amount: {}",
                s
            )));
        }

        let parse = |digits: &str| -> Result<u128, WasmAkashError> {
            if digits.is_empty() {
                return Ok(0);
            }
            digits
                .parse::<u128>()
                .map_err(|e| WasmAkashError::validation(format!("Invalid amount {}: {}", s, e)))
        };
        let frac_scaled = parse(frac)? * 10u128.pow(DEC_PRECISION - frac.len() as u32);
        let atomics = parse(whole)?
            .checked_mul(DEC_ONE)
            .and_then(|w| w.checked_add(frac_scaled))
            .ok_or_else(|| WasmAkashError::validation(format!("Amount too large: {}", s)))?;

        if atomics == 0 {
            return Err(WasmAkashError::validation(format!(
                "Amount must be positive: {}",
                s
            )));
        }
        Ok(DecCoin { atomics, denom })
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.atomics / DEC_ONE;
        let frac = self.atomics % DEC_ONE;
        if frac == 0 {
            write!(f, "{}{}", whole, self.denom)
        } else {
            let frac = format!("{:018}", frac);
            write!(f, "{}.{}{}", whole, frac.trim_end_matches('0'), self.denom)
        }
    }
}

impl From<DecCoin> for String {
    fn from(coin: DecCoin) -> Self {
        coin.to_string()
    }
}

/// Accepts `"10uakt"` or `{ "amount": "10", "denom": "uakt" }`
#[derive(Deserialize)]
#[serde(untagged)]
enum CoinRepr {
    Text(String),
    Object { amount: AmountRepr, denom: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Number(u64),
    Text(String),
}

impl CoinRepr {
    fn into_text(self) -> String {
        match self {
            CoinRepr::Text(s) => s,
            CoinRepr::Object { amount, denom } => match amount {
                AmountRepr::Number(n) => format!("{}{}", n, denom),
                AmountRepr::Text(s) => format!("{}{}", s, denom),
            },
        }
    }
}

impl TryFrom<CoinRepr> for Coin {
    type Error = WasmAkashError;

    fn try_from(repr: CoinRepr) -> Result<Self, Self::Error> {
        repr.into_text().parse()
    }
}

impl TryFrom<CoinRepr> for DecCoin {
    type Error = WasmAkashError;

    fn try_from(repr: CoinRepr) -> Result<Self, Self::Error> {
        repr.into_text().parse()
    }
}
