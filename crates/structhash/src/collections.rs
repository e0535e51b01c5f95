//! Order-independent encoding of keyed collections and set-like sequences.
//!
//! Each key, value, or set element is digested on its own with a fresh
//! walker. The resulting fixed-length digests are sorted byte-wise and
//! written in order, so the enclosing digest never depends on iteration
//! order.

use tracing::trace;

use crate::error::HashError;
use crate::node::{Elements, Entries, VisitCtx};
use crate::walker::Walker;

impl Walker<'_> {
    /// Visits a sequence, as a set when the field or options ask for it.
    pub(crate) fn visit_seq(
        &mut self,
        elements: Elements<'_>,
        ctx: Option<VisitCtx<'_>>,
    ) -> Result<(), HashError> {
        let set = self.opts.slices_as_sets || ctx.is_some_and(|c| c.is_set());
        if set {
            return self.visit_set(elements);
        }
        for element in elements {
            self.visit(element, None)?;
        }
        Ok(())
    }

    /// Visits a sequence as an unordered set.
    pub(crate) fn visit_set(&mut self, elements: Elements<'_>) -> Result<(), HashError> {
        let mut hashes = elements
            .map(|element| self.sub_hash(element))
            .collect::<Result<Vec<_>, _>>()?;
        hashes.sort_unstable();
        for h in &hashes {
            self.write(h);
        }
        Ok(())
    }

    /// Visits a keyed collection.
    ///
    /// When the collection is a record field and the record implements
    /// [`EntryFilter`](crate::EntryFilter), rejected entries are left out.
    pub(crate) fn visit_map(
        &mut self,
        entries: Entries<'_>,
        ctx: Option<VisitCtx<'_>>,
    ) -> Result<(), HashError> {
        let filter = ctx.and_then(|c| c.parent.as_entry_filter().map(|f| (c.field, f)));

        let (capacity, _) = entries.size_hint();
        let mut key_hashes = Vec::with_capacity(capacity);
        let mut value_hashes = Vec::with_capacity(capacity);
        for (key, value) in entries {
            if let Some((field, filter)) = filter {
                let include = filter
                    .include_entry(field, key, value)
                    .map_err(|e| HashError::hook("entry filter", field, e))?;
                if !include {
                    trace!(field = field, "entry rejected by entry filter");
                    continue;
                }
            }
            key_hashes.push(self.sub_hash(key)?);
            value_hashes.push(self.sub_hash(value)?);
        }

        key_hashes.sort_unstable();
        value_hashes.sort_unstable();
        for h in key_hashes.iter().chain(&value_hashes) {
            self.write(h);
        }
        Ok(())
    }
}
