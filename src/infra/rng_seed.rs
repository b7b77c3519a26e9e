//! RngSeed — доменный seed для RNG сессии.
//!
//! Позволяет:
//!   - хранить базовый seed (из u64)
//!   - выводить независимые потоки для розыгрыша и для разбиения:
//!         new = H(domain || seed || stream || index)
//!   - создавать DeterministicRng из seed
//!
//! Один seed сессии -> воспроизводимые розыгрыши и команды, при этом
//! перемешивание команд не сдвигает последовательность розыгрыша.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng::DeterministicRng;

/// Независимый поток случайности внутри сессии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RngStream {
    Draw,
    Partition,
}

impl RngStream {
    fn tag(self) -> &'static [u8] {
        match self {
            RngStream::Draw => b"draw",
            RngStream::Partition => b"partition",
        }
    }
}

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    /// Seed из u64 (для CLI и тестов).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Вывести seed потока `stream` с порядковым номером `index`.
    pub fn derive(&self, stream: RngStream, index: u64) -> Self {
        let mut hasher = Sha256::new();

        hasher.update(b"RAFFLE_ENGINE_RNG_V1");
        hasher.update(self.bytes);
        hasher.update(stream.tag());
        hasher.update(index.to_le_bytes());

        let hash = hasher.finalize();

        let mut out = [0u8; 32];
        out.copy_from_slice(&hash[..32]);

        Self { bytes: out }
    }

    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed_bytes(self.bytes)
    }
}
