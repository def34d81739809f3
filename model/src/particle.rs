use crate::shared::Term;

/// Schema Component: Particle. Wraps a term with its occurrence constraints.
#[derive(Clone, Debug)]
pub struct Particle {
    pub min_occurs: u64,
    pub max_occurs: MaxOccurs,
    pub term: Term,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaxOccurs {
    Unbounded,
    Count(u64),
}

impl MaxOccurs {
    /// Whether more than one occurrence is allowed.
    pub fn is_multiple(&self) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Count(n) => *n > 1,
        }
    }
}

impl Particle {
    pub fn required_single(term: Term) -> Self {
        Self {
            min_occurs: 1,
            max_occurs: MaxOccurs::Count(1),
            term,
        }
    }
}
