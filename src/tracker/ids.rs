//! Id generation for visits and history entries.

use crate::core::VisitId;
use uuid::Uuid;

/// Length of ids produced by [`RandomIds`].
pub const ID_LEN: usize = 9;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of fresh visit ids.
///
/// Generators need not guarantee uniqueness; the tracker discards ids that
/// are already in use and asks again.
pub trait IdGenerator: Send + Sync {
    fn next_id(&mut self) -> VisitId;
}

/// Short random base-36 tokens drawn from a v4 UUID.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> VisitId {
        VisitId::new(base36(Uuid::new_v4().as_u128(), ID_LEN))
    }
}

/// Deterministic ids `<prefix>1`, `<prefix>2`, ... for tests and demos.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("v")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> VisitId {
        let id = VisitId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Lowest `len` base-36 digits of `value`, least significant first.
fn base36(mut value: u128, len: usize) -> String {
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        out.push(BASE36[(value % 36) as usize] as char);
        value /= 36;
    }
    out
}
