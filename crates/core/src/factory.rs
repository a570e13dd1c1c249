//! Factory capability - instantiation of renderable pieces
//!
//! The core owns geometry and colour only. Whenever a cube instance should
//! come into existence (first block, each falling block) or a trimmed
//! remainder should drop away, the session calls out through this trait.
//! Returned handles are for the renderer's bookkeeping; the core discards
//! them.

use stack_tower_types::{Rgba, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrashHandle(pub u64);

pub trait PieceFactory {
    fn create_block(&mut self, position: Vec3, scale: Vec3, color: Rgba) -> BlockHandle;
    fn create_trash(&mut self, position: Vec3, size: Vec3, color: Rgba) -> TrashHandle;
}

impl<F: PieceFactory + ?Sized> PieceFactory for &mut F {
    fn create_block(&mut self, position: Vec3, scale: Vec3, color: Rgba) -> BlockHandle {
        (**self).create_block(position, scale, color)
    }

    fn create_trash(&mut self, position: Vec3, size: Vec3, color: Rgba) -> TrashHandle {
        (**self).create_trash(position, size, color)
    }
}

/// Factory that instantiates nothing. Used headless and in tests that do
/// not care about spawned instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFactory;

impl PieceFactory for NullFactory {
    fn create_block(&mut self, _position: Vec3, _scale: Vec3, _color: Rgba) -> BlockHandle {
        BlockHandle(0)
    }

    fn create_trash(&mut self, _position: Vec3, _size: Vec3, _color: Rgba) -> TrashHandle {
        TrashHandle(0)
    }
}
