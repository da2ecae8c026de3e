//! Helpers for the audio thread's command backlog.
//!
//! Commands are applied strictly in arrival order. The only rewrite is
//! dropping a `Load` that is immediately followed by another `Load`: the
//! first one would be released before anything could use it.

use super::types::AudioCmd;

pub(crate) fn supersede_loads(batch: &mut Vec<AudioCmd>) {
    let mut i = 0;
    while i + 1 < batch.len() {
        if matches!(batch[i], AudioCmd::Load(_)) && matches!(batch[i + 1], AudioCmd::Load(_)) {
            batch.remove(i);
        } else {
            i += 1;
        }
    }
}
