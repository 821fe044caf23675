use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::Piece;

/// Random source for new pieces.
///
/// Every shape is drawn uniformly and independently; there is no bag or
/// history. The generator is a seeded [`Pcg32`], so two factories built from
/// the same [`PieceSeed`] produce the same sequence.
///
/// # Example
///
/// ```
/// use fallblock_engine::{PieceFactory, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut a = PieceFactory::with_seed(seed);
/// let mut b = PieceFactory::with_seed(seed);
///
/// assert_eq!(a.next_piece(5, 1), b.next_piece(5, 1));
/// ```
#[derive(Debug, Clone)]
pub struct PieceFactory {
    seed: PieceSeed,
    rng: Pcg32,
}

impl Default for PieceFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceFactory {
    /// Creates a new piece factory with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Returns the seed this factory was created with.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    /// Draws the next shape and anchors it at `(x, y)`.
    pub fn next_piece(&mut self, x: i32, y: i32) -> Piece {
        Piece::new_random(&mut self.rng, x, y)
    }
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator of a [`PieceFactory`]. Its text form (used by [`FromStr`],
/// [`fmt::Display`] and serde) is 32 hexadecimal digits, most significant first.
///
/// # Example
///
/// ```
/// use fallblock_engine::PieceSeed;
///
/// let seed: PieceSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
/// assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
/// assert!("xyz".parse::<PieceSeed>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex: expected 32 hex digits, got '{input}'")]
pub struct ParsePieceSeedError {
    input: String,
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParsePieceSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::core::PieceKind;

    use super::*;

    const SEQUENTIAL: [u8; 16] = [
        0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54, 0x32,
        0x10,
    ];

    #[test]
    fn test_deterministic_piece_generation() {
        let seed = PieceSeed::from_bytes(SEQUENTIAL);
        let mut factory1 = PieceFactory::with_seed(seed);
        let mut factory2 = PieceFactory::with_seed(seed);

        for _ in 0..20 {
            assert_eq!(factory1.next_piece(5, 1), factory2.next_piece(5, 1));
        }
        assert_eq!(factory1.seed(), seed);
    }

    #[test]
    fn test_pieces_spawn_at_anchor() {
        let mut factory = PieceFactory::new();
        for _ in 0..20 {
            let piece = factory.next_piece(3, 1);
            assert_eq!(piece.center().position(), (3, 1));
            assert!(piece.contains(3, 1));
        }
    }

    #[test]
    fn test_all_kinds_are_drawn() {
        let mut factory = PieceFactory::with_seed(PieceSeed::from_bytes([7; 16]));
        let colors: HashSet<_> = (0..600).map(|_| factory.next_piece(5, 1).color()).collect();
        assert_eq!(colors.len(), PieceKind::LEN, "{colors:?}");
    }

    mod piece_seed_text {
        use super::*;

        #[test]
        fn test_known_values() {
            let zeros = PieceSeed::from_bytes([0; 16]);
            assert_eq!(
                serde_json::to_string(&zeros).unwrap(),
                "\"00000000000000000000000000000000\""
            );

            // Big-endian: bytes appear in order as hex pairs
            let sequential = PieceSeed::from_bytes(SEQUENTIAL);
            assert_eq!(
                serde_json::to_string(&sequential).unwrap(),
                "\"0123456789abcdeffedcba9876543210\""
            );
            let deserialized: PieceSeed =
                serde_json::from_str("\"0123456789abcdeffedcba9876543210\"").unwrap();
            assert_eq!(deserialized, sequential);
        }

        #[test]
        fn test_uppercase_hex() {
            let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed, PieceSeed::from_bytes(SEQUENTIAL));
        }

        #[test]
        fn test_invalid_input() {
            for input in [
                "",
                "0123456789abcdef0123456789abcde",
                "0123456789abcdef0123456789abcdef0",
                "ghijklmnopqrstuvwxyzghijklmnopqr",
                "+123456789abcdef0123456789abcdef",
            ] {
                let err = input.parse::<PieceSeed>().unwrap_err();
                assert!(err.to_string().contains("invalid hex"), "{input}");

                let json = format!("\"{input}\"");
                assert!(serde_json::from_str::<PieceSeed>(&json).is_err(), "{input}");
            }
        }

        #[test]
        fn test_serialized_seed_preserves_piece_generation() {
            let original: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&original).unwrap();
            let restored: PieceSeed = serde_json::from_str(&serialized).unwrap();

            let mut factory1 = PieceFactory::with_seed(original);
            let mut factory2 = PieceFactory::with_seed(restored);
            for _ in 0..20 {
                assert_eq!(factory1.next_piece(4, 1), factory2.next_piece(4, 1));
            }
        }
    }
}
