use std::fmt;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic simulation runs.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator handed to every sampling function. Using the same seed
/// reproduces the same samples and censoring patterns, so a report can be
/// regenerated bit for bit.
///
/// Serialized as a 32-character hex string.
///
/// # Example
///
/// ```
/// use ewsurv_model::SimulationSeed;
/// use rand::Rng as _;
///
/// let seed = SimulationSeed::from(42);
/// let a: f64 = seed.rng().random();
/// let b: f64 = seed.rng().random();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSeed([u8; 16]);

impl SimulationSeed {
    /// Creates a fresh random number generator positioned at the start of this seed's stream.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl From<u64> for SimulationSeed {
    fn from(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }
}

impl fmt::Display for SimulationSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl Serialize for SimulationSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SimulationSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

/// Allows generating random `SimulationSeed` values with `rng.random()`.
impl Distribution<SimulationSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SimulationSeed(seed)
    }
}
