//! Process-wide grammar cache.
//!
//! One slot per [`GrammarKey`]. The slot's `OnceLock` makes concurrent first
//! requests for the same key build the graph once; requests for different
//! keys only contend on the map lock, never on a build.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use super::{CxxGrammar, GrammarError};
use crate::GrammarKey;

type Slot = Arc<OnceLock<Result<Arc<CxxGrammar>, GrammarError>>>;

static GRAMMARS: OnceLock<Mutex<HashMap<GrammarKey, Slot>>> = OnceLock::new();

pub(super) fn get_or_build(key: &GrammarKey) -> Result<Arc<CxxGrammar>, GrammarError> {
    let slot = {
        let mut map = GRAMMARS
            .get_or_init(Default::default)
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.entry(*key).or_default().clone()
    };

    if slot.get().is_some() {
        log::trace!("grammar cache hit for {key:?}");
    }
    slot.get_or_init(|| CxxGrammar::build(key).map(Arc::new))
        .clone()
}
