/// What a collaborator request is for; each purpose has its own token sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestPurpose {
    Entries,
    Layers,
    Stats,
}

impl RequestPurpose {
    fn slot(self) -> usize {
        match self {
            RequestPurpose::Entries => 0,
            RequestPurpose::Layers => 1,
            RequestPurpose::Stats => 2,
        }
    }
}

/// Monotonically increasing request identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Stale-response guard.
///
/// Every issued request gets a fresh token and becomes the latest for its purpose.
/// A response is applied only if its token is still the latest; anything older has
/// been superseded and is discarded.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next: u64,
    latest: [Option<RequestToken>; 3],
    pending: [bool; 3],
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a new request, superseding any in flight for `purpose`
    pub fn issue(&mut self, purpose: RequestPurpose) -> RequestToken {
        self.next += 1;
        let token = RequestToken(self.next);
        self.latest[purpose.slot()] = Some(token);
        self.pending[purpose.slot()] = true;
        token
    }

    pub fn is_current(&self, purpose: RequestPurpose, token: RequestToken) -> bool {
        self.latest[purpose.slot()] == Some(token)
    }

    /// Record a response; returns `true` when it should be applied
    pub fn complete(&mut self, purpose: RequestPurpose, token: RequestToken) -> bool {
        if !self.is_current(purpose, token) {
            return false;
        }
        self.pending[purpose.slot()] = false;
        true
    }

    /// Whether the latest request for `purpose` is still outstanding
    pub fn is_pending(&self, purpose: RequestPurpose) -> bool {
        self.pending[purpose.slot()]
    }

    pub fn any_pending(&self) -> bool {
        self.pending.iter().any(|p| *p)
    }
}
