use crate::particle::Particle;
use crate::xstypes::Sequence;

/// Schema Component: Model Group, a kind of Term.
///
/// Groups are kept as a recursive tree; nested groups are only flattened at
/// classification time, as an explicit transform.
#[derive(Clone, Debug)]
pub struct ModelGroup {
    pub compositor: Compositor,
    pub particles: Sequence<Particle>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Compositor {
    All,
    Choice,
    Sequence,
}
