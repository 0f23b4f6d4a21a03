//! Test suites for the host-control daemons.

mod socket_behaviour;
pub(crate) mod support;
