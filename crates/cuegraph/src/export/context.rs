//! Per-conversion state: naming counters and identity token generation.

use std::collections::HashMap;

use rand::{Rng, SeedableRng, rngs::StdRng};

use cuegraph_core::identifier::Guid;

use crate::config::ExportConfig;

/// Source of 128-bit identity tokens.
///
/// # Variants
///
/// * `Random` - Tokens drawn from a seeded generator; seeded from the
///   operating system unless a seed is configured.
/// * `Sequential` - Tokens `1, 2, 3, ...`, for byte-reproducible output.
#[derive(Debug, Clone)]
pub enum TokenSource {
    Random(StdRng),
    Sequential(u128),
}

impl TokenSource {
    /// Random tokens, reproducible when `seed` is set.
    pub fn random(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Random(StdRng::seed_from_u64(seed)),
            None => Self::Random(StdRng::from_os_rng()),
        }
    }

    /// Sequential tokens starting at `1`.
    pub fn sequential() -> Self {
        Self::Sequential(0)
    }

    /// Returns the next token.
    pub fn next_token(&mut self) -> Guid {
        match self {
            Self::Random(rng) => Guid::from_u128(rng.random::<u128>()),
            Self::Sequential(last) => {
                *last += 1;
                Guid::from_u128(*last)
            }
        }
    }
}

/// State threaded through a single conversion.
///
/// Nothing in here outlives the conversion, so two conversions never
/// influence each other's names or tokens.
#[derive(Debug, Clone)]
pub struct ConversionContext {
    tokens: TokenSource,
    counters: HashMap<String, usize>,
    include_identity_tokens: bool,
}

impl ConversionContext {
    pub fn new(tokens: TokenSource, include_identity_tokens: bool) -> Self {
        Self {
            tokens,
            counters: HashMap::new(),
            include_identity_tokens,
        }
    }

    /// Create a context with the token source selected by `config`.
    pub fn from_config(config: &ExportConfig, include_identity_tokens: bool) -> Self {
        let tokens = if config.stable_tokens() {
            TokenSource::sequential()
        } else {
            TokenSource::random(config.seed())
        };
        Self::new(tokens, include_identity_tokens)
    }

    /// Returns the next name for a node of type `type_tag`: `<type_tag>_<n>`
    /// where `n` counts the nodes of that type named so far.
    pub fn next_name(&mut self, type_tag: &str) -> String {
        let counter = self.counters.entry(type_tag.to_string()).or_insert(0);
        let name = format!("{type_tag}_{counter}");
        *counter += 1;
        name
    }

    /// Returns the next pin id.
    pub fn next_pin(&mut self) -> Guid {
        self.tokens.next_token()
    }

    /// Returns the next node identity token, or zero when identity tokens
    /// are disabled.
    pub fn next_node_guid(&mut self) -> Guid {
        if self.include_identity_tokens {
            self.tokens.next_token()
        } else {
            Guid::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_tokens() {
        let mut tokens = TokenSource::sequential();
        assert_eq!(tokens.next_token().to_string(), "00000000000000000000000000000001");
        assert_eq!(tokens.next_token().to_string(), "00000000000000000000000000000002");
    }

    #[test]
    fn test_seeded_tokens_repeat() {
        let mut first = TokenSource::random(Some(42));
        let mut second = TokenSource::random(Some(42));
        for _ in 0..4 {
            assert_eq!(first.next_token(), second.next_token());
        }
    }

    #[test]
    fn test_names_count_per_type() {
        let mut context = ConversionContext::new(TokenSource::sequential(), true);
        assert_eq!(context.next_name("SoundNodeWavePlayer"), "SoundNodeWavePlayer_0");
        assert_eq!(context.next_name("SoundNodeMixer"), "SoundNodeMixer_0");
        assert_eq!(context.next_name("SoundNodeWavePlayer"), "SoundNodeWavePlayer_1");
    }

    #[test]
    fn test_disabled_identity_tokens_do_not_consume_tokens() {
        let mut context = ConversionContext::new(TokenSource::sequential(), false);
        assert!(context.next_node_guid().is_zero());
        assert_eq!(context.next_pin(), Guid::from_u128(1));
    }
}
