//! Id Generation
//!
//! Fresh ids for sections and fields are drawn from an injected `IdSource`.

use uuid::Uuid;

/// What the id is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Section,
    Field,
}

impl IdKind {
    fn prefix(&self) -> &'static str {
        match self {
            IdKind::Section => "section",
            IdKind::Field => "field",
        }
    }
}

pub trait IdSource {
    fn next_id(&mut self, kind: IdKind) -> String;
}

/// Random UUID v4 ids (production)
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self, kind: IdKind) -> String {
        format!("{}-{}", kind.prefix(), Uuid::new_v4())
    }
}

/// Deterministic `section-1`, `field-2`, ... ids
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, kind: IdKind) -> String {
        self.next += 1;
        format!("{}-{}", kind.prefix(), self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(IdKind::Section), "section-1");
        assert_eq!(ids.next_id(IdKind::Field), "field-2");
    }

    #[test]
    fn test_uuid_ids_are_prefixed() {
        let id = UuidIds.next_id(IdKind::Field);
        assert!(id.starts_with("field-"));
        assert_ne!(id, UuidIds.next_id(IdKind::Field));
    }
}
