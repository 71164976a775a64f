//! Supporting types for the `LLMProvider` trait.
//!
//! Currently empty: capability, model and context types the trait signature
//! references all live in `crate::core::types`. Kept as its own module to
//! match the split layout of the surrounding `provider/` directory.
