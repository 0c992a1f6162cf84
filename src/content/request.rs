// Latest-request-wins bookkeeping for asynchronous content loads

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
    identifier: Option<String>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; every earlier ticket becomes stale
    pub fn issue(&mut self, identifier: impl Into<String>) -> Ticket {
        self.latest += 1;
        self.identifier = Some(identifier.into());
        Ticket(self.latest)
    }

    /// Supersede the in-flight request without starting a new one
    pub fn invalidate(&mut self) {
        self.latest += 1;
        self.identifier = None;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest != 0 && ticket.0 == self.latest
    }

    pub fn current(&self) -> Option<(Ticket, &str)> {
        self.identifier
            .as_deref()
            .map(|identifier| (Ticket(self.latest), identifier))
    }
}
