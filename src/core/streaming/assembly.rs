//! Synthetic tool-call index assignment for streaming responses.
//!
//! Some adapters omit the `index` field on tool-call deltas (or only send it
//! on the first delta for a given call); OpenAI-shaped consumers require a
//! stable, sequential index per choice starting at 0. `ToolCallAssembler`
//! tracks, per choice, the next synthetic index to hand out and the mapping
//! from a tool-call id to the index already assigned to it, so repeated
//! deltas for the same call (e.g. streamed argument fragments) keep using
//! the index assigned on first sight rather than incrementing again.

use std::collections::HashMap;

/// Per-choice tool-call index bookkeeping across a single stream's lifetime.
#[derive(Debug, Default)]
pub struct ToolCallAssembler {
    /// choice index -> (tool_call_id -> assigned index)
    assigned: HashMap<u32, HashMap<String, u32>>,
    /// choice index -> next synthetic index to hand out
    next_index: HashMap<u32, u32>,
}

impl ToolCallAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the index to emit for a tool-call delta.
    ///
    /// - If the upstream chunk already carries an `index`, trust it and
    ///   record it so later deltas referencing the same `id` stay
    ///   consistent even if a later chunk omits the index.
    /// - Otherwise, look up the `id` in what's already been assigned for
    ///   this choice; if it's new, assign the next sequential index
    ///   (starting at 0) and remember it.
    pub fn resolve_index(
        &mut self,
        choice_index: u32,
        upstream_index: Option<u32>,
        tool_call_id: Option<&str>,
    ) -> u32 {
        if let Some(index) = upstream_index {
            if let Some(id) = tool_call_id {
                self.assigned
                    .entry(choice_index)
                    .or_default()
                    .insert(id.to_string(), index);
            }
            let next = self.next_index.entry(choice_index).or_insert(0);
            *next = (*next).max(index + 1);
            return index;
        }

        let Some(id) = tool_call_id else {
            // No id and no upstream index: treat every such delta as the
            // next sequential call on this choice.
            let next = self.next_index.entry(choice_index).or_insert(0);
            let assigned = *next;
            *next += 1;
            return assigned;
        };

        if let Some(&existing) = self.assigned.get(&choice_index).and_then(|m| m.get(id)) {
            return existing;
        }

        let next = self.next_index.entry(choice_index).or_insert(0);
        let assigned = *next;
        *next += 1;
        self.assigned
            .entry(choice_index)
            .or_default()
            .insert(id.to_string(), assigned);
        assigned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesizes_sequential_indices_starting_at_zero() {
        let mut assembler = ToolCallAssembler::new();
        assert_eq!(assembler.resolve_index(0, None, Some("call_1")), 0);
        assert_eq!(assembler.resolve_index(0, None, Some("call_2")), 1);
        // Repeated fragments for call_1 keep its original index.
        assert_eq!(assembler.resolve_index(0, None, Some("call_1")), 0);
    }

    #[test]
    fn choices_are_independent() {
        let mut assembler = ToolCallAssembler::new();
        assert_eq!(assembler.resolve_index(0, None, Some("a")), 0);
        assert_eq!(assembler.resolve_index(1, None, Some("b")), 0);
    }

    #[test]
    fn honors_upstream_index_when_present() {
        let mut assembler = ToolCallAssembler::new();
        assert_eq!(assembler.resolve_index(0, Some(3), Some("call_x")), 3);
        // A later fragment for the same id omitting the index should
        // resolve back to the index it was first seen with.
        assert_eq!(assembler.resolve_index(0, None, Some("call_x")), 3);
    }
}
