#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Board model and protocol driver for a bot playing turn-based multiplayer
//! snake on a toroidal (wrap-around) grid. Each process plays one snake: it
//! reads a line protocol from standard input, mirrors the shared board in a
//! [`board::TorusBoard`], and answers every `move` prompt with a single
//! direction token. Trails are permanent, so move legality is one
//! wrapped-index lookup, and the only strategy is trying candidate
//! directions until one is legal.

use wire_protocol::Setup;

pub mod board;
pub mod strategy;
pub mod turn_loop;
pub mod types;
pub mod wire_protocol;

/// Loads a startup-header fixture from a given string
pub fn setup_fixture(header: &str) -> Setup {
    let s = Setup::read_from(&mut header.as_bytes());
    s.expect("the header literal is valid")
}
