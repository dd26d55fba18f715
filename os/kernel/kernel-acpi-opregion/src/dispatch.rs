//! The operation protocol shared by all address-space handlers.
//!
//! Each region goes through a closed lifecycle:
//!
//! ```text
//! Unattached ──Attach──► Attached ──Detach──► Detached
//!                          │   ▲
//!                          └───┘ Read / Write
//! ```
//!
//! `Attach` produces an owned context, `Read`/`Write` borrow it and `Detach`
//! consumes it, so accesses after detach and double detach cannot be
//! expressed by safe callers.
//!
//! Interpreters that pass the operation as a raw tag byte decode it with
//! [`RegionOp::from_raw`] before calling [`RegionHandler::handle`].

use kernel_acpi::{Namespace, RegionError};

/// Raw operation tag as passed across the interpreter boundary.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RegionOpKind {
    Attach = 0,
    Detach = 1,
    Read = 2,
    Write = 3,
}

impl TryFrom<u8> for RegionOpKind {
    type Error = RegionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Attach),
            1 => Ok(Self::Detach),
            2 => Ok(Self::Read),
            3 => Ok(Self::Write),
            _ => Err(RegionError::InvalidArgument),
        }
    }
}

/// One operation on a region together with its payload.
#[derive(Debug)]
pub enum RegionOp<'a, Node, Ctx> {
    /// First access to the region at `region`.
    Attach { region: Node },
    /// Teardown of an attached region.
    Detach { context: Ctx },
    /// Read `width` bytes at `address`.
    Read {
        context: &'a Ctx,
        address: u64,
        width: u8,
    },
    /// Write the low `width` bytes of `value` at `address`.
    Write {
        context: &'a Ctx,
        address: u64,
        width: u8,
        value: u64,
    },
}

/// Payload of an operation whose kind is only known as a raw tag.
#[derive(Debug)]
pub enum RegionPayload<'a, Node, Ctx> {
    /// Payload of [`RegionOpKind::Attach`].
    Region(Node),
    /// Payload of [`RegionOpKind::Detach`].
    Context(Ctx),
    /// Payload of [`RegionOpKind::Read`] and [`RegionOpKind::Write`];
    /// reads ignore `value`.
    Access {
        context: &'a Ctx,
        address: u64,
        width: u8,
        value: u64,
    },
}

/// A raw operation that could not be decoded.
///
/// The payload is handed back untouched, so a context passed along with a
/// bad tag can still be detached.
#[derive(Debug)]
pub struct RejectedOp<'a, Node, Ctx> {
    pub error: RegionError,
    pub payload: RegionPayload<'a, Node, Ctx>,
}

impl<'a, Node, Ctx> RegionOp<'a, Node, Ctx> {
    /// Combine a raw operation tag with its payload.
    ///
    /// # Errors
    /// [`RegionError::InvalidArgument`] for an unknown tag or a payload that
    /// does not belong to the tag.
    pub fn from_raw(
        tag: u8,
        payload: RegionPayload<'a, Node, Ctx>,
    ) -> Result<Self, RejectedOp<'a, Node, Ctx>> {
        let kind = match RegionOpKind::try_from(tag) {
            Ok(kind) => kind,
            Err(error) => return Err(RejectedOp { error, payload }),
        };

        match (kind, payload) {
            (RegionOpKind::Attach, RegionPayload::Region(region)) => Ok(Self::Attach { region }),
            (RegionOpKind::Detach, RegionPayload::Context(context)) => Ok(Self::Detach { context }),
            (
                RegionOpKind::Read,
                RegionPayload::Access {
                    context,
                    address,
                    width,
                    ..
                },
            ) => Ok(Self::Read {
                context,
                address,
                width,
            }),
            (
                RegionOpKind::Write,
                RegionPayload::Access {
                    context,
                    address,
                    width,
                    value,
                },
            ) => Ok(Self::Write {
                context,
                address,
                width,
                value,
            }),
            (_, payload) => Err(RejectedOp {
                error: RegionError::InvalidArgument,
                payload,
            }),
        }
    }
}

/// Result of a successful [`RegionOp`].
#[derive(Debug, PartialEq, Eq)]
pub enum RegionOutcome<Ctx> {
    Attached(Ctx),
    Detached,
    Read(u64),
    Written,
}

/// An address-space handler.
///
/// The meaning of `address` in [`read`](Self::read) and [`write`](Self::write)
/// depends on the address space and is documented by each implementation.
pub trait RegionHandler {
    /// Per-region state created by `attach` and released by `detach`.
    type Context;

    /// Acquire whatever the region at `region` needs for later accesses.
    ///
    /// # Errors
    /// A [`RegionError`] if the region cannot be served; nothing stays
    /// allocated or mapped in that case.
    fn attach<N: Namespace>(
        &self,
        namespace: &N,
        region: N::Node,
    ) -> Result<Self::Context, RegionError>;

    /// Release everything `attach` acquired.
    fn detach(&self, context: Self::Context);

    /// # Errors
    /// [`RegionError::InvalidArgument`] for unsupported widths or accesses
    /// the handler can tell lie outside the region, otherwise whatever the
    /// underlying primitive reports.
    fn read(&self, context: &Self::Context, address: u64, width: u8) -> Result<u64, RegionError>;

    /// # Errors
    /// [`RegionError::InvalidArgument`] for unsupported widths or accesses
    /// the handler can tell lie outside the region, otherwise whatever the
    /// underlying primitive reports.
    fn write(
        &self,
        context: &Self::Context,
        address: u64,
        width: u8,
        value: u64,
    ) -> Result<(), RegionError>;

    /// Single entry point used by the interpreter.
    ///
    /// # Errors
    /// Whatever the selected operation reports.
    fn handle<N: Namespace>(
        &self,
        namespace: &N,
        op: RegionOp<'_, N::Node, Self::Context>,
    ) -> Result<RegionOutcome<Self::Context>, RegionError> {
        match op {
            RegionOp::Attach { region } => self
                .attach(namespace, region)
                .map(RegionOutcome::Attached),
            RegionOp::Detach { context } => {
                self.detach(context);
                Ok(RegionOutcome::Detached)
            }
            RegionOp::Read {
                context,
                address,
                width,
            } => self.read(context, address, width).map(RegionOutcome::Read),
            RegionOp::Write {
                context,
                address,
                width,
                value,
            } => self
                .write(context, address, width, value)
                .map(|()| RegionOutcome::Written),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_tags() {
        assert_eq!(RegionOpKind::try_from(0), Ok(RegionOpKind::Attach));
        assert_eq!(RegionOpKind::try_from(1), Ok(RegionOpKind::Detach));
        assert_eq!(RegionOpKind::try_from(2), Ok(RegionOpKind::Read));
        assert_eq!(RegionOpKind::try_from(3), Ok(RegionOpKind::Write));
    }

    #[test]
    fn rejects_unknown_tags() {
        for tag in 4..=u8::MAX {
            assert_eq!(RegionOpKind::try_from(tag), Err(RegionError::InvalidArgument));
        }
    }

    #[test]
    fn raw_ops_decode_with_their_payload() {
        let context = 5_u32;
        let op = RegionOp::<'_, u32, u32>::from_raw(
            3,
            RegionPayload::Access {
                context: &context,
                address: 0x10,
                width: 4,
                value: 0xAA,
            },
        );
        assert!(matches!(
            op,
            Ok(RegionOp::Write {
                context: &5,
                address: 0x10,
                width: 4,
                value: 0xAA
            })
        ));

        let op = RegionOp::<'_, u32, u32>::from_raw(0, RegionPayload::Region(7));
        assert!(matches!(op, Ok(RegionOp::Attach { region: 7 })));
    }

    #[test]
    fn unknown_tags_hand_the_payload_back() {
        let Err(rejected) = RegionOp::<'_, u32, u32>::from_raw(9, RegionPayload::Context(42)) else {
            panic!("tag 9 must be rejected");
        };
        assert_eq!(rejected.error, RegionError::InvalidArgument);
        assert!(matches!(rejected.payload, RegionPayload::Context(42)));
    }

    #[test]
    fn mismatched_payloads_are_rejected() {
        let Err(rejected) = RegionOp::<'_, u32, u32>::from_raw(1, RegionPayload::Region(3)) else {
            panic!("detach needs a context");
        };
        assert_eq!(rejected.error, RegionError::InvalidArgument);
        assert!(matches!(rejected.payload, RegionPayload::Region(3)));
    }
}
