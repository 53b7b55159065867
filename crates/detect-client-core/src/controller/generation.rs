use strum::EnumCount;

/// Identifies one issued request among those of the same kind
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

#[derive(Debug, Default, Clone, Copy)]
pub struct GenerationCounter {
    latest: Generation,
}

impl GenerationCounter {
    /// Moves to a new generation making all earlier ones stale
    pub fn advance(&mut self) -> Generation {
        self.latest = Generation(self.latest.0 + 1);
        self.latest
    }

    pub fn latest(&self) -> Generation {
        self.latest
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest == generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumCount)]
pub enum RequestKind {
    Login,
    Register,
    CurrentUser,
    UpdateUser,
    Users,
    Predict,
}

impl RequestKind {
    /// Responses to these are only meaningful for the session they were
    /// issued in
    pub fn is_session_bound(self) -> bool {
        !matches!(self, RequestKind::Register)
    }
}

/// One counter per kind of request
#[derive(Debug, Default)]
pub struct RequestGenerations {
    counters: [GenerationCounter; RequestKind::COUNT],
}

impl RequestGenerations {
    pub fn advance(&mut self, kind: RequestKind) -> Generation {
        self.counters[kind as usize].advance()
    }

    pub fn is_current(&self, kind: RequestKind, generation: Generation) -> bool {
        self.counters[kind as usize].is_current(generation)
    }
}
