//! Test doubles for the namespace, the host platform and the handler registry.

#![allow(dead_code)]

use kernel_acpi::{
    AccessWidth, AddressSpace, Lookup, NameSeg, Namespace, NodeObject, OperationRegion, PciAddress,
    PnpId, PnpIdList, Platform, RegionError,
};
use kernel_acpi_opregion::{HandlerRegistry, Installation, RegionHandler};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::ptr::NonNull;
use std::rc::Rc;

pub type NodeId = usize;

struct NodeEntry {
    name: NameSeg,
    parent: Option<NodeId>,
    object: Option<NodeObject>,
    integers: HashMap<NameSeg, Lookup<u64>>,
    ids: HashMap<NameSeg, Lookup<PnpIdList>>,
}

/// In-memory namespace with explicit evaluation results per node.
pub struct MockNamespace {
    nodes: Vec<NodeEntry>,
    evaluations: RefCell<Vec<(NodeId, NameSeg)>>,
}

impl MockNamespace {
    pub const ROOT: NodeId = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![NodeEntry {
                name: NameSeg::ROOT,
                parent: None,
                object: None,
                integers: HashMap::new(),
                ids: HashMap::new(),
            }],
            evaluations: RefCell::new(Vec::new()),
        }
    }

    pub fn add(&mut self, parent: NodeId, name: &str, object: Option<NodeObject>) -> NodeId {
        self.nodes.push(NodeEntry {
            name: NameSeg::try_from(name).expect("valid name"),
            parent: Some(parent),
            object,
            integers: HashMap::new(),
            ids: HashMap::new(),
        });
        self.nodes.len() - 1
    }

    pub fn add_scope(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.add(parent, name, None)
    }

    pub fn add_device(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.add(parent, name, Some(NodeObject::Device))
    }

    pub fn add_region(
        &mut self,
        parent: NodeId,
        name: &str,
        space: AddressSpace,
        offset: u64,
        length: u64,
    ) -> NodeId {
        let region = OperationRegion::new(space, offset, length).expect("valid region");
        self.add(parent, name, Some(NodeObject::OperationRegion(region)))
    }

    /// A device that identifies itself as a PCI Express host bridge.
    pub fn add_host_bridge(&mut self, parent: NodeId, name: &str) -> NodeId {
        let node = self.add_device(parent, name);
        self.set_hid(node, "PNP0A08");
        node
    }

    pub fn set_integer(&mut self, node: NodeId, name: NameSeg, value: Lookup<u64>) {
        self.nodes[node].integers.insert(name, value);
    }

    pub fn set_ids(&mut self, node: NodeId, name: NameSeg, value: Lookup<PnpIdList>) {
        self.nodes[node].ids.insert(name, value);
    }

    pub fn set_hid(&mut self, node: NodeId, id: &str) {
        self.set_ids(node, NameSeg::HID, Lookup::Found(PnpId::from(id).into()));
    }

    pub fn set_cid(&mut self, node: NodeId, ids: &[&str]) {
        let list = ids.iter().copied().map(PnpId::from).collect();
        self.set_ids(node, NameSeg::CID, Lookup::Found(list));
    }

    /// Every `(node, name)` the handlers asked to evaluate, in order.
    pub fn evaluations(&self) -> Vec<(NodeId, NameSeg)> {
        self.evaluations.borrow().clone()
    }
}

impl Namespace for MockNamespace {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        Self::ROOT
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].parent
    }

    fn name(&self, node: NodeId) -> NameSeg {
        self.nodes[node].name
    }

    fn object(&self, node: NodeId) -> Option<NodeObject> {
        self.nodes[node].object.clone()
    }

    fn evaluate_integer(&self, node: NodeId, name: NameSeg) -> Lookup<u64> {
        self.evaluations.borrow_mut().push((node, name));
        self.nodes[node]
            .integers
            .get(&name)
            .cloned()
            .unwrap_or(Lookup::NotPresent)
    }

    fn evaluate_ids(&self, node: NodeId, name: NameSeg) -> Lookup<PnpIdList> {
        self.evaluations.borrow_mut().push((node, name));
        self.nodes[node]
            .ids
            .get(&name)
            .cloned()
            .unwrap_or(Lookup::NotPresent)
    }
}

/// Handle returned by [`MockPlatform::io_map`].
#[derive(Debug, PartialEq, Eq)]
pub struct MockIoHandle {
    pub id: usize,
    pub base: u64,
    pub len: u64,
}

/// One call into the mock platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Map { phys: u64, len: usize },
    Unmap { virt: usize, len: usize },
    IoMap { base: u64, len: u64 },
    IoUnmap { id: usize },
    IoRead { id: usize, offset: u64, width: AccessWidth },
    IoWrite { id: usize, offset: u64, width: AccessWidth, value: u64 },
    PciRead { address: PciAddress, offset: u64, width: AccessWidth },
    PciWrite { address: PciAddress, offset: u64, width: AccessWidth, value: u64 },
}

struct Mapping {
    phys: u64,
    virt: *mut u8,
    len: usize,
    words: *mut u64,
    word_count: usize,
}

#[derive(Default)]
struct PlatformState {
    calls: Vec<PlatformCall>,
    mappings: Vec<Mapping>,
    next_io_id: usize,
    fail_map: bool,
    keep_low_bits: bool,
    io_map_error: Option<RegionError>,
    pci_error: Option<RegionError>,
    io_values: HashMap<u64, u64>,
    pci_values: HashMap<u64, u64>,
}

/// Host platform that records every call. Mapped memory is real, zeroed heap
/// memory, 8-byte aligned unless [`MockPlatform::keep_low_bits`] is set.
#[derive(Clone, Default)]
pub struct MockPlatform {
    state: Rc<RefCell<PlatformState>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_mappings(&self) {
        self.state.borrow_mut().fail_map = true;
    }

    /// Map like a direct map does: the virtual address keeps the low three
    /// bits of the physical one.
    pub fn keep_low_bits(&self) {
        self.state.borrow_mut().keep_low_bits = true;
    }

    pub fn fail_io_map(&self, error: RegionError) {
        self.state.borrow_mut().io_map_error = Some(error);
    }

    pub fn fail_pci(&self, error: RegionError) {
        self.state.borrow_mut().pci_error = Some(error);
    }

    pub fn set_io_value(&self, offset: u64, value: u64) {
        self.state.borrow_mut().io_values.insert(offset, value);
    }

    pub fn set_pci_value(&self, offset: u64, value: u64) {
        self.state.borrow_mut().pci_values.insert(offset, value);
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.state.borrow().calls.clone()
    }

    pub fn live_mappings(&self) -> usize {
        self.state.borrow().mappings.len()
    }

    /// Byte at physical address `phys` inside a live mapping.
    pub fn peek(&self, phys: u64) -> u8 {
        let state = self.state.borrow();
        let mapping = state
            .mappings
            .iter()
            .find(|m| phys >= m.phys && phys < m.phys + m.len as u64)
            .expect("address is mapped");
        let offset = usize::try_from(phys - mapping.phys).unwrap();
        unsafe { mapping.virt.add(offset).read() }
    }

    fn record(&self, call: PlatformCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl Platform for MockPlatform {
    type IoHandle = MockIoHandle;

    fn map(&self, phys: u64, len: usize) -> Option<NonNull<u8>> {
        self.record(PlatformCall::Map { phys, len });
        let mut state = self.state.borrow_mut();
        if state.fail_map {
            return None;
        }
        let shift = if state.keep_low_bits {
            usize::try_from(phys & 7).unwrap()
        } else {
            0
        };
        let word_count = (len + shift).div_ceil(8);
        let words = Box::into_raw(vec![0_u64; word_count].into_boxed_slice()).cast::<u64>();
        let virt = unsafe { words.cast::<u8>().add(shift) };
        state.mappings.push(Mapping {
            phys,
            virt,
            len,
            words,
            word_count,
        });
        NonNull::new(virt)
    }

    unsafe fn unmap(&self, virt: NonNull<u8>, len: usize) {
        self.record(PlatformCall::Unmap {
            virt: virt.as_ptr() as usize,
            len,
        });
        let mut state = self.state.borrow_mut();
        let index = state
            .mappings
            .iter()
            .position(|m| m.virt == virt.as_ptr())
            .expect("unmapping a live mapping");
        let mapping = state.mappings.remove(index);
        assert_eq!(mapping.len, len, "unmap length matches map");
        drop(unsafe {
            Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                mapping.words,
                mapping.word_count,
            ))
        });
    }

    fn io_map(&self, base: u64, len: u64) -> Result<MockIoHandle, RegionError> {
        self.record(PlatformCall::IoMap { base, len });
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.io_map_error {
            return Err(error);
        }
        state.next_io_id += 1;
        Ok(MockIoHandle {
            id: state.next_io_id,
            base,
            len,
        })
    }

    fn io_unmap(&self, handle: MockIoHandle) {
        self.record(PlatformCall::IoUnmap { id: handle.id });
    }

    fn io_read(
        &self,
        handle: &MockIoHandle,
        offset: u64,
        width: AccessWidth,
    ) -> Result<u64, RegionError> {
        self.record(PlatformCall::IoRead {
            id: handle.id,
            offset,
            width,
        });
        Ok(self.state.borrow().io_values.get(&offset).copied().unwrap_or(0))
    }

    fn io_write(
        &self,
        handle: &MockIoHandle,
        offset: u64,
        width: AccessWidth,
        value: u64,
    ) -> Result<(), RegionError> {
        self.record(PlatformCall::IoWrite {
            id: handle.id,
            offset,
            width,
            value,
        });
        Ok(())
    }

    fn pci_read(
        &self,
        address: PciAddress,
        offset: u64,
        width: AccessWidth,
    ) -> Result<u64, RegionError> {
        self.record(PlatformCall::PciRead {
            address,
            offset,
            width,
        });
        let state = self.state.borrow();
        if let Some(error) = state.pci_error {
            return Err(error);
        }
        Ok(state.pci_values.get(&offset).copied().unwrap_or(0))
    }

    fn pci_write(
        &self,
        address: PciAddress,
        offset: u64,
        width: AccessWidth,
        value: u64,
    ) -> Result<(), RegionError> {
        self.record(PlatformCall::PciWrite {
            address,
            offset,
            width,
            value,
        });
        self.state.borrow().pci_error.map_or(Ok(()), Err)
    }
}

/// Object-safe view of a [`RegionHandler`], as an interpreter would store it.
pub trait ErasedHandler {
    fn attach(
        &self,
        namespace: &MockNamespace,
        region: NodeId,
    ) -> Result<Box<dyn Any>, RegionError>;
    fn detach(&self, context: Box<dyn Any>);
    fn read(&self, context: &dyn Any, address: u64, width: u8) -> Result<u64, RegionError>;
    fn write(
        &self,
        context: &dyn Any,
        address: u64,
        width: u8,
        value: u64,
    ) -> Result<(), RegionError>;
}

impl<H> ErasedHandler for H
where
    H: RegionHandler,
    H::Context: 'static,
{
    fn attach(
        &self,
        namespace: &MockNamespace,
        region: NodeId,
    ) -> Result<Box<dyn Any>, RegionError> {
        let context = RegionHandler::attach(self, namespace, region)?;
        Ok(Box::new(context))
    }

    fn detach(&self, context: Box<dyn Any>) {
        let context = context.downcast::<H::Context>().expect("context of this handler");
        RegionHandler::detach(self, *context);
    }

    fn read(&self, context: &dyn Any, address: u64, width: u8) -> Result<u64, RegionError> {
        let context = context
            .downcast_ref::<H::Context>()
            .ok_or(RegionError::InvalidArgument)?;
        RegionHandler::read(self, context, address, width)
    }

    fn write(
        &self,
        context: &dyn Any,
        address: u64,
        width: u8,
        value: u64,
    ) -> Result<(), RegionError> {
        let context = context
            .downcast_ref::<H::Context>()
            .ok_or(RegionError::InvalidArgument)?;
        RegionHandler::write(self, context, address, width, value)
    }
}

/// Handler registry keyed by `(scope node, address space)`.
#[derive(Default)]
pub struct MockRegistry {
    handlers: HashMap<(NodeId, AddressSpace), Box<dyn ErasedHandler>>,
    pub installs: Vec<(NodeId, AddressSpace, Installation)>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// The handler responsible for `region`: the one installed closest above it.
    pub fn handler_for(
        &self,
        namespace: &MockNamespace,
        region: NodeId,
    ) -> Option<&dyn ErasedHandler> {
        let space = namespace.operation_region(region)?.space();
        let mut current = Some(region);
        while let Some(node) = current {
            if let Some(handler) = self.handlers.get(&(node, space)) {
                return Some(handler.as_ref());
            }
            current = namespace.parent(node);
        }
        None
    }
}

impl HandlerRegistry<MockNamespace> for MockRegistry {
    fn install<H>(&mut self, node: NodeId, space: AddressSpace, handler: H) -> Installation
    where
        H: RegionHandler + 'static,
    {
        let outcome = match self.handlers.insert((node, space), Box::new(handler)) {
            Some(_) => Installation::Replaced,
            None => Installation::Fresh,
        };
        self.installs.push((node, space, outcome));
        outcome
    }
}

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// `log` backend keeping records per test thread.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()));
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Route log records of the current thread into a buffer and clear it.
pub fn capture_logs() {
    // Only the first test to get here installs the logger.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Messages logged on this thread at `level` since [`capture_logs`].
pub fn logged(level: Level) -> Vec<String> {
    RECORDS.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    })
}
