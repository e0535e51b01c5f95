//! The recursive visitor that feeds a value graph into a digest sink.
//!
//! Indirection (boxes, shared pointers, references, trait objects) is
//! stripped by the [`StructHash`] impls themselves, which delegate to the
//! value they point at. What reaches [`Walker::visit_node`] is already a
//! concrete kind, except for [`Node::Nil`], which is resolved here according
//! to the zero-nil policy.

use crate::error::HashError;
use crate::format::{DigestSink, Format};
use crate::node::{Node, VisitCtx};
use crate::options::HashOptions;
use crate::traits::StructHash;

/// Walks one value graph and accumulates its canonical byte stream.
///
/// Owned by a single traversal. Sub-digests of map keys, map values, and
/// set elements each get their own walker.
pub struct Walker<'o> {
    format: Format,
    sink: Box<dyn DigestSink>,
    pub(crate) opts: &'o HashOptions,
    pub(crate) tag: &'o str,
}

impl<'o> Walker<'o> {
    pub(crate) fn new(format: Format, opts: &'o HashOptions) -> Self {
        Self {
            format,
            sink: format.sink(),
            opts,
            tag: opts.tag(),
        }
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.sink.finish()
    }

    /// Visits a value, writing its canonical encoding into the digest.
    pub fn visit(
        &mut self,
        value: &dyn StructHash,
        ctx: Option<VisitCtx<'_>>,
    ) -> Result<(), HashError> {
        self.visit_node(value.node(), ctx)
    }

    /// Visits an already-described value.
    pub fn visit_node(
        &mut self,
        node: Node<'_>,
        ctx: Option<VisitCtx<'_>>,
    ) -> Result<(), HashError> {
        match node {
            Node::Nil(zero) => {
                if self.opts.zero_nil {
                    zero(self, ctx)
                } else {
                    // A bare nil is the signed zero; the golden digests depend on it.
                    self.write_int(0);
                    Ok(())
                }
            }
            Node::Int(v) => {
                self.write_int(v);
                Ok(())
            }
            Node::Uint(v) => {
                self.write_uint(v);
                Ok(())
            }
            Node::Bool(v) => {
                self.write(&[u8::from(v)]);
                Ok(())
            }
            Node::Float(v) => {
                self.write(&v.to_le_bytes());
                Ok(())
            }
            Node::Text(s) => {
                self.write(s.as_bytes());
                Ok(())
            }
            Node::Time(ts) => {
                let bytes = ts.to_binary()?;
                self.write(&bytes);
                Ok(())
            }
            Node::Array(elements) => {
                for element in elements {
                    self.visit(element, None)?;
                }
                Ok(())
            }
            Node::Seq(elements) => self.visit_seq(elements, ctx),
            Node::Set(elements) => self.visit_set(elements),
            Node::Map(entries) => self.visit_map(entries, ctx),
            Node::Record(record) => self.visit_record(record),
            Node::Optional(value) => self.visit_optional(value),
            Node::Unsupported(kind) => Err(HashError::UnsupportedKind {
                kind: kind.to_string(),
            }),
        }
    }

    /// Digests `value` independently with a fresh walker sharing this
    /// walker's format and options.
    pub(crate) fn sub_hash(&self, value: &dyn StructHash) -> Result<Vec<u8>, HashError> {
        let mut walker = Walker::new(self.format, self.opts);
        walker.visit(value, None)?;
        Ok(walker.finish())
    }

    pub(crate) fn write(&mut self, bytes: &[u8]) {
        self.sink.write(bytes);
    }

    pub(crate) fn write_int(&mut self, v: i64) {
        self.write(&v.to_le_bytes());
    }

    pub(crate) fn write_uint(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }
}
