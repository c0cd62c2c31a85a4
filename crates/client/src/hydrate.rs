//! One-shot seeding from the embedded hydration document.

use jweb_shared::{HydrationDoc, StateEntry};

use crate::dom::Dom;

/// What hydration produced. An absent or malformed document yields the
/// default (no context, no entries): hydration failure is never fatal,
/// the runtime attempts a connection regardless.
#[derive(Debug, Default)]
pub struct HydrationSeed {
    pub context_id: Option<String>,
    pub entries: Vec<StateEntry>,
}

pub fn read_seed(dom: &dyn Dom, element_id: &str) -> HydrationSeed {
    let Some(raw) = dom.text_of(element_id) else {
        crate::log_debug!("no hydration element #{element_id}, starting with empty state");
        return HydrationSeed::default();
    };

    match HydrationDoc::parse(&raw) {
        Ok(doc) => HydrationSeed {
            context_id: Some(doc.context_id),
            entries: doc.state,
        },
        Err(e) => {
            crate::log_error!("hydration document is malformed, continuing with empty state: {e}");
            HydrationSeed::default()
        }
    }
}
