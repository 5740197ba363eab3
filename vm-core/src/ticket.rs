/// Identifies one issued request.
///
/// Tickets are handed out in strictly increasing order,
/// only the most recently issued one is accepted on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default)]
pub struct Tickets {
    latest: u64,
}

impl Tickets {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    #[must_use]
    pub const fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Number of tickets issued so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.latest
    }
}
