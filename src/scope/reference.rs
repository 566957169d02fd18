use bitflags::bitflags;
use id_arena::{Arena, Id};
use tree_sitter::Node;

use super::binding::Binding;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct ReadWriteFlags: u32 {
        const READ = 0x1;
        const WRITE = 0x2;
        const RW = Self::READ.bits() | Self::WRITE.bits();
    }
}

/// One reference-position identifier and the binding it resolved to.
#[derive(Debug)]
pub struct Reference<'a> {
    pub identifier: Node<'a>,
    pub resolved: Option<Id<Binding<'a>>>,
    pub flag: ReadWriteFlags,
}

impl<'a> Reference<'a> {
    pub fn new(
        arena: &mut Arena<Self>,
        identifier: Node<'a>,
        flag: ReadWriteFlags,
    ) -> Id<Self> {
        arena.alloc(Self {
            identifier,
            resolved: Default::default(),
            flag,
        })
    }

    pub fn is_read(&self) -> bool {
        self.flag.intersects(ReadWriteFlags::READ)
    }
}
