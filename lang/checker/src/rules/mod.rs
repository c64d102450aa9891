//! One module per consistency rule. Each rule appends its violations in declaration order.

pub mod builtins;
pub mod embeds;
pub mod receivers;
pub mod uniqueness;
pub mod variadic;
