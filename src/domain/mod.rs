// Domain layer: backend DTOs, the escrow fee model, display rules, forms and
// the gateway ports the HTTP client implements.

pub mod classify;
pub mod escrow;
pub mod forms;
pub mod model;
pub mod ports;
pub mod wallet;
