use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::RandomSource;
use crate::infra::rng_seed::{RngSeed, RngStream};

/// Системный RNG (thread_rng) для обычной работы.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn next_index(&mut self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же розыгрыши и разбиения при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_bytes(seed: [u8; 32]) -> Self {
        Self {
            inner: StdRng::from_seed(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn next_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }
}

/// RNG сессии: либо системный, либо воспроизводимый по seed.
///
/// Удобно для CLI/сервиса, где выбор делается по конфигу.
#[derive(Clone, Debug)]
pub enum SessionRng {
    System(SystemRng),
    Seeded(DeterministicRng),
}

impl SessionRng {
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => SessionRng::Seeded(DeterministicRng::from_seed(s)),
            None => SessionRng::System(SystemRng),
        }
    }

    /// RNG отдельного потока сессии: seed потока выводится из общего seed,
    /// чтобы розыгрыш и разбиение не сдвигали друг другу последовательность.
    pub fn for_stream(seed: Option<u64>, stream: RngStream) -> Self {
        match seed {
            Some(s) => SessionRng::Seeded(RngSeed::from_u64(s).derive(stream, 0).to_rng()),
            None => SessionRng::System(SystemRng),
        }
    }
}

impl RandomSource for SessionRng {
    fn next_index(&mut self, upper: usize) -> usize {
        match self {
            SessionRng::System(r) => r.next_index(upper),
            SessionRng::Seeded(r) => r.next_index(upper),
        }
    }
}
