//! Field-by-field traversal of records.

use tracing::trace;

use crate::error::HashError;
use crate::node::{VisitCtx, VisitFlags};
use crate::traits::{FieldTag, Record, StructHash};
use crate::walker::Walker;

impl Walker<'_> {
    /// Visits a record.
    ///
    /// A record with the [`SelfHash`](crate::SelfHash) capability owns its
    /// representation outright. Otherwise the type name is written, then each
    /// visible field's name and value in declaration order, honoring field
    /// metadata and the [`FieldFilter`](crate::FieldFilter) capability.
    pub(crate) fn visit_record(&mut self, record: &dyn Record) -> Result<(), HashError> {
        let type_name = record.type_name();

        if let Some(this) = record.as_self_hash() {
            let h = this
                .self_hash()
                .map_err(|e| HashError::hook("self-hash", type_name, e))?;
            self.write(h.to_string().as_bytes());
            return Ok(());
        }

        let filter = record.as_field_filter();
        self.write(type_name.as_bytes());

        for field in record.fields() {
            let name = field.name();
            let tag = field.tag(self.tag);
            if tag == Some(FieldTag::Ignore) {
                trace!(record = type_name, field = name, "field ignored by metadata");
                continue;
            }

            let mut value: &dyn StructHash = field.value();
            if self.opts.ignore_zero_value && self.skips_as_zero(value) {
                trace!(record = type_name, field = name, "zero-valued field skipped");
                continue;
            }

            let rendered: String;
            if tag == Some(FieldTag::String) || self.opts.use_stringer {
                match value.render_text() {
                    Some(text) => {
                        rendered = text;
                        value = &rendered;
                    }
                    None if tag == Some(FieldTag::String) => {
                        return Err(HashError::NotStringer {
                            field: name.to_string(),
                        });
                    }
                    None => {}
                }
            }

            if let Some(filter) = filter {
                let include = filter
                    .include_field(name, value)
                    .map_err(|e| HashError::hook("field filter", name, e))?;
                if !include {
                    trace!(
                        record = type_name,
                        field = name,
                        "field rejected by field filter"
                    );
                    continue;
                }
            }

            let flags = if tag == Some(FieldTag::Set) {
                VisitFlags::SET
            } else {
                VisitFlags::NONE
            };

            self.write(name.as_bytes());
            self.visit(
                value,
                Some(VisitCtx {
                    flags,
                    parent: record,
                    field: name,
                }),
            )?;
        }

        Ok(())
    }

    /// With zero-nil on, an absent reference is the zero of its target, so a
    /// present zero is skipped the same way.
    fn skips_as_zero(&self, value: &dyn StructHash) -> bool {
        if self.opts.zero_nil {
            value.is_zero_or_nil()
        } else {
            value.is_zero()
        }
    }
}
