//! Output guardrail: the profanity classifier and the validation gate

pub mod classifier;
pub mod gate;
