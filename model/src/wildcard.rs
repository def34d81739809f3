/// Schema Component: Wildcard, a kind of Term.
#[derive(Clone, Debug)]
pub struct Wildcard {
    pub process_contents: ProcessContents,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessContents {
    Strict,
    Lax,
    Skip,
}

impl Default for Wildcard {
    fn default() -> Self {
        Self {
            process_contents: ProcessContents::Lax,
        }
    }
}
