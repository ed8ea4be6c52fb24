//! Entity Store: every function borrows a connection so the caller owns the
//! transaction boundary (`pool.begin()` in the handlers).

pub mod attendance;
pub mod employee;
